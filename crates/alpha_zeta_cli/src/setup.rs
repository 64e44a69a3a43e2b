//! Turns the match configuration, the fleet loadouts and the board layout into
//! a running [`Match`].

use std::collections::BTreeMap;

use log::debug;
use thiserror::Error;

use alpha_zeta_common::{Cell, Fleet, Grid, Match, MatchSetupError, ModuleKind, Position, SeededDice, Ship, ShipID, SideID};

use crate::config_provider::GameConfig;

pub const ALPHA_COLLECTOR: ShipID = 'A';
pub const ZETA_COLLECTOR: ShipID = 'Z';
pub const ALPHA_ATTACKERS: [ShipID; 3] = ['B', 'C', 'D'];
pub const ZETA_ATTACKERS: [ShipID; 3] = ['W', 'X', 'Y'];

const MAX_MODULES: usize = 3;
const MAX_WEAPONS: usize = 2;
const MIN_LAYOUT_LENGTH: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("given parameters are not valid.")]
    InvalidParameters,
    #[error("You can select maximum 3 modules.")]
    TooManyModules,
    #[error("invalid input.")]
    InvalidInput,
    #[error("Sensor is already module of Ship {0}")]
    SensorTaken(ShipID),
    #[error("The string must be 25 characters long")]
    LayoutTooShort,
    #[error("the length of the board should match the parameter for board length given in the beginning.")]
    LayoutLengthMismatch,
    #[error("board should be symmetrical")]
    NotSymmetrical,
    #[error("no empty tile can be completely surrounded by cover.")]
    EnclosedTile,
    #[error("you should place each ship one time.")]
    ShipPlacement,
    #[error("ship {0} has no loadout")]
    MissingLoadout(ShipID),
    #[error(transparent)]
    Match(#[from] MatchSetupError),
}

pub fn side_of(ship_id: ShipID) -> Option<SideID> {
    if ship_id == ALPHA_COLLECTOR || ALPHA_ATTACKERS.contains(&ship_id) {
        Some(SideID::Alpha)
    } else if ship_id == ZETA_COLLECTOR || ZETA_ATTACKERS.contains(&ship_id) {
        Some(SideID::Zeta)
    } else {
        None
    }
}

/// Parses a comma separated module list. An empty line is an attacker without
/// extra modules.
pub fn parse_loadout(input: &str) -> Result<Vec<ModuleKind>, SetupError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let names: Vec<&str> = input.split(',').collect();
    if names.len() > MAX_MODULES {
        return Err(SetupError::TooManyModules);
    }

    let modules = names
        .into_iter()
        .map(|name| {
            name.parse::<ModuleKind>()
                .ok()
                .filter(|kind| ModuleKind::SELECTABLE.contains(kind))
                .ok_or(SetupError::InvalidInput)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let count = |kind: ModuleKind| modules.iter().filter(|m| **m == kind).count();
    let unique = [
        ModuleKind::RailGun,
        ModuleKind::Propulsion,
        ModuleKind::Shield,
        ModuleKind::Sensor,
    ];
    if unique.into_iter().any(|kind| count(kind) > 1)
        || modules.iter().filter(|kind| kind.is_weapon()).count() > MAX_WEAPONS
    {
        return Err(SetupError::InvalidInput);
    }

    Ok(modules)
}

/// A parsed and validated board: the grid with all ships placed and where each
/// ship sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub grid: Grid,
    pub positions: BTreeMap<ShipID, Position>,
}

pub fn parse_layout(input: &str, board_length: usize) -> Result<Layout, SetupError> {
    let tiles: Vec<char> = input.trim().chars().map(|c| c.to_ascii_uppercase()).collect();
    if tiles.len() < MIN_LAYOUT_LENGTH {
        return Err(SetupError::LayoutTooShort);
    }
    if tiles.len() != board_length * board_length {
        return Err(SetupError::LayoutLengthMismatch);
    }

    let cells = tiles
        .iter()
        .map(|tile| match tile {
            '.' => Ok(Cell::Empty),
            '1' => Ok(Cell::Cover(1)),
            '2' => Ok(Cell::Cover(2)),
            ship if side_of(*ship).is_some() => Ok(Cell::Occupied(*ship)),
            _ => Err(SetupError::InvalidInput),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let rows = cells
        .chunks(board_length)
        .map(<[Cell]>::to_vec)
        .collect();
    let grid = Grid::from_rows(rows).ok_or(SetupError::LayoutLengthMismatch)?;

    check_symmetry(&grid)?;
    check_enclosed_tiles(&grid)?;

    let mut positions = BTreeMap::new();
    for (position, ship_id) in grid.occupants() {
        if positions.insert(ship_id, position).is_some() {
            return Err(SetupError::ShipPlacement);
        }
    }
    if positions.len() != 2 * (1 + ALPHA_ATTACKERS.len()) {
        return Err(SetupError::ShipPlacement);
    }

    Ok(Layout { grid, positions })
}

fn cover(grid: &Grid, row: i32, column: i32) -> Option<u8> {
    grid.cover_at(&Position::new(row, column))
}

/// Cover has to mirror itself across the anti-diagonal.
fn check_symmetry(grid: &Grid) -> Result<(), SetupError> {
    let last = grid.size() as i32 - 1;
    let symmetric = (0..=last).all(|row| {
        (0..=last).all(|column| cover(grid, row, column) == cover(grid, last - column, last - row))
    });

    if symmetric {
        Ok(())
    } else {
        Err(SetupError::NotSymmetrical)
    }
}

fn check_enclosed_tiles(grid: &Grid) -> Result<(), SetupError> {
    let size = grid.size() as i32;
    let blocked = |row: i32, column: i32| {
        let position = Position::new(row, column);
        !grid.contains(&position) || grid.cover_at(&position).is_some()
    };

    let enclosed = (0..size).any(|row| {
        (0..size).any(|column| {
            !blocked(row, column)
                && blocked(row - 1, column)
                && blocked(row + 1, column)
                && blocked(row, column - 1)
                && blocked(row, column + 1)
        })
    });

    if enclosed {
        Err(SetupError::EnclosedTile)
    } else {
        Ok(())
    }
}

/// Collects the loadouts of both fleets before the board is known.
#[derive(Debug, Clone)]
pub struct MatchSetup {
    seed: i64,
    board_length: usize,
    containers: usize,
    loadouts: BTreeMap<ShipID, Vec<ModuleKind>>,
}

impl MatchSetup {
    pub fn new(config: &GameConfig) -> Result<Self, SetupError> {
        if !config.is_valid() {
            return Err(SetupError::InvalidParameters);
        }

        Ok(MatchSetup {
            seed: config.seed,
            board_length: config.board_length,
            containers: config.containers,
            loadouts: BTreeMap::new(),
        })
    }

    /// Parses and stores the loadout of an attacker. Reconfiguring a ship
    /// replaces its previous loadout.
    pub fn configure(&mut self, ship_id: ShipID, input: &str) -> Result<(), SetupError> {
        let side = side_of(ship_id).ok_or(SetupError::InvalidInput)?;
        if ship_id == ALPHA_COLLECTOR || ship_id == ZETA_COLLECTOR {
            return Err(SetupError::InvalidInput);
        }

        let modules = parse_loadout(input)?;
        if modules.contains(&ModuleKind::Sensor) {
            if let Some(other) = self.sensor_ship(side).filter(|other| *other != ship_id) {
                return Err(SetupError::SensorTaken(other));
            }
        }

        debug!("ship {ship_id} configured with {modules:?}");
        self.loadouts.insert(ship_id, modules);
        Ok(())
    }

    pub fn is_configured(&self, ship_id: ShipID) -> bool {
        self.loadouts.contains_key(&ship_id)
    }

    fn sensor_ship(&self, side: SideID) -> Option<ShipID> {
        self.loadouts
            .iter()
            .find(|(ship_id, modules)| {
                side_of(**ship_id) == Some(side) && modules.contains(&ModuleKind::Sensor)
            })
            .map(|(ship_id, _)| *ship_id)
    }

    fn fleet(
        &self,
        layout: &Layout,
        collector: ShipID,
        attackers: [ShipID; 3],
    ) -> Result<Fleet, SetupError> {
        let position = |ship_id: ShipID| {
            layout
                .positions
                .get(&ship_id)
                .copied()
                .ok_or(SetupError::ShipPlacement)
        };
        let attacker = |ship_id: ShipID| -> Result<Ship, SetupError> {
            let modules = self
                .loadouts
                .get(&ship_id)
                .ok_or(SetupError::MissingLoadout(ship_id))?;
            Ok(Ship::attacker(ship_id, position(ship_id)?, modules))
        };

        let [first, second, third] = attackers;
        Fleet::new(
            Ship::collector(collector, position(collector)?, self.containers),
            [attacker(first)?, attacker(second)?, attacker(third)?],
        )
        .ok_or(SetupError::InvalidInput)
    }

    /// Validates the layout against the configured board and starts the match.
    pub fn build(&self, layout: &str) -> Result<Match, SetupError> {
        let layout = parse_layout(layout, self.board_length)?;
        let alpha = self.fleet(&layout, ALPHA_COLLECTOR, ALPHA_ATTACKERS)?;
        let zeta = self.fleet(&layout, ZETA_COLLECTOR, ZETA_ATTACKERS)?;

        // negative seeds wrap around
        let dice = SeededDice::new(self.seed as u64);
        Ok(Match::new(layout.grid, alpha, zeta, dice)?)
    }
}
