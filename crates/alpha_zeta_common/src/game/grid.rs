use std::fmt::{Display, Formatter};

use rstar::{Envelope, AABB};

use crate::game::ship::ShipID;
use crate::game::ActionValidationError;

/// Board coordinate. Row 0 is the northern edge, column 0 the western edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    pub fn new(row: i32, column: i32) -> Self {
        Position { row, column }
    }

    /// Manhattan distance.
    pub fn distance(&self, other: &Position) -> i32 {
        (self.row - other.row).abs() + (self.column - other.column).abs()
    }

    fn point(&self) -> [i32; 2] {
        [self.row, self.column]
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Cover(u8),
    Occupied(ShipID),
}

/// Square occupancy grid. Keeping exactly one occupied cell per live ship is up
/// to the caller; the grid itself does not know about ships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Grid {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Builds a grid from row-major rows. Returns `None` if the rows are not square.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }

        Some(Grid {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bounds(&self) -> AABB<[i32; 2]> {
        let max = self.size as i32 - 1;
        AABB::from_corners([0, 0], [max, max])
    }

    pub fn contains(&self, position: &Position) -> bool {
        self.size > 0 && self.bounds().contains_point(&position.point())
    }

    fn index(&self, position: &Position) -> Result<usize, ActionValidationError> {
        if self.contains(position) {
            Ok(position.row as usize * self.size + position.column as usize)
        } else {
            Err(ActionValidationError::OutOfBounds)
        }
    }

    pub fn at(&self, position: &Position) -> Result<Cell, ActionValidationError> {
        self.index(position).map(|index| self.cells[index])
    }

    pub fn is_empty_at(&self, position: &Position) -> Result<bool, ActionValidationError> {
        Ok(matches!(self.at(position)?, Cell::Empty))
    }

    pub fn cover_at(&self, position: &Position) -> Option<u8> {
        match self.at(position) {
            Ok(Cell::Cover(value)) => Some(value),
            _ => None,
        }
    }

    pub fn place(&mut self, position: &Position, ship: ShipID) -> Result<(), ActionValidationError> {
        let index = self.index(position)?;
        self.cells[index] = Cell::Occupied(ship);
        Ok(())
    }

    pub fn set(&mut self, position: &Position, cell: Cell) -> Result<(), ActionValidationError> {
        let index = self.index(position)?;
        self.cells[index] = cell;
        Ok(())
    }

    pub fn clear(&mut self, position: &Position) -> Result<(), ActionValidationError> {
        self.set(position, Cell::Empty)
    }

    /// Moves `ship` from `from` to `to` without checking that `to` is free.
    pub fn move_ship(
        &mut self,
        ship: ShipID,
        from: &Position,
        to: &Position,
    ) -> Result<(), ActionValidationError> {
        let to_index = self.index(to)?;
        self.clear(from)?;
        self.cells[to_index] = Cell::Occupied(ship);
        Ok(())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.size.max(1))
    }

    /// All occupied cells with their ship, row-major.
    pub fn occupants(&self) -> impl Iterator<Item = (Position, ShipID)> + '_ {
        self.cells.iter().enumerate().filter_map(|(index, cell)| match cell {
            Cell::Occupied(id) => Some((
                Position::new((index / self.size) as i32, (index % self.size) as i32),
                *id,
            )),
            _ => None,
        })
    }
}
