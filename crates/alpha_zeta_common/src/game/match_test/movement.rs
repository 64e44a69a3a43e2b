use pretty_assertions::assert_eq;

use crate::game::grid::{Cell, Position};
use crate::game::module::{ActionToken, ModuleKind};
use crate::game::ship_builder::{attacker, MatchBuilder};
use crate::game::ActionValidationError;

#[test]
fn actions_move() {
    let mut game = MatchBuilder::new(9)
        .ship(attacker('B', 0, 0, &[]))
        .build();

    assert_eq!(game.move_ship('B', Position::new(2, 1)), Ok(()));
    assert_eq!(game.grid().at(&Position::new(0, 0)), Ok(Cell::Empty));
    assert_eq!(game.grid().at(&Position::new(2, 1)), Ok(Cell::Occupied('B')));
    assert_eq!(game.find_ship('B').unwrap().position(), Position::new(2, 1));
    assert!(!game.registry().contains('B', ActionToken::Move));

    assert_eq!(
        game.move_ship('B', Position::new(3, 1)),
        Err(ActionValidationError::ActionUnavailable {
            token: ActionToken::Move
        })
    );
}

#[test]
fn actions_move_validation() {
    let mut game = MatchBuilder::new(9)
        .ship(attacker('B', 0, 0, &[]))
        .ship(attacker('C', 0, 2, &[]))
        .cover(1, 0, 1)
        .build();
    let before = format!("{game:?}");

    assert_eq!(
        game.move_ship('B', Position::new(2, 2)),
        Err(ActionValidationError::OutOfRange)
    );
    assert_eq!(
        game.move_ship('B', Position::new(0, 0)),
        Err(ActionValidationError::OutOfRange)
    );
    assert_eq!(
        game.move_ship('B', Position::new(0, 2)),
        Err(ActionValidationError::TargetOccupied)
    );
    assert_eq!(
        game.move_ship('B', Position::new(1, 0)),
        Err(ActionValidationError::TargetOccupied)
    );
    assert_eq!(
        game.move_ship('B', Position::new(-1, 0)),
        Err(ActionValidationError::OutOfBounds)
    );
    assert_eq!(
        game.move_ship('W', Position::new(4, 4)),
        Err(ActionValidationError::NotYourTurn)
    );
    assert_eq!(
        game.move_ship('Q', Position::new(4, 4)),
        Err(ActionValidationError::ShipNotFound { id: 'Q' })
    );
    assert_eq!(format!("{game:?}"), before);
}

#[test]
fn actions_propel() {
    let mut game = MatchBuilder::new(9)
        .ship(attacker('B', 0, 0, &[ModuleKind::Propulsion]))
        .ship(attacker('C', 4, 4, &[]))
        .build();

    assert_eq!(game.propel('B', Position::new(0, 3)), Ok(()));
    assert_eq!(game.move_ship('B', Position::new(3, 3)), Ok(()));
    assert_eq!(game.grid().at(&Position::new(3, 3)), Ok(Cell::Occupied('B')));
    assert_eq!(
        game.propel('B', Position::new(3, 4)),
        Err(ActionValidationError::ActionUnavailable {
            token: ActionToken::Propel
        })
    );

    assert_eq!(
        game.propel('C', Position::new(4, 5)),
        Err(ActionValidationError::ActionUnavailable {
            token: ActionToken::Propel
        })
    );
}

#[test]
fn actions_propel_needs_intact_propulsion() {
    let mut game = MatchBuilder::new(9)
        .ship(attacker(
            'B',
            0,
            0,
            &[ModuleKind::Propulsion, ModuleKind::Sword],
        ))
        .build();

    game.remove_module(ModuleKind::Propulsion, 'B').unwrap();
    assert_eq!(
        game.propel('B', Position::new(0, 1)),
        Err(ActionValidationError::ActionUnavailable {
            token: ActionToken::Propel
        })
    );
    assert_eq!(game.move_ship('B', Position::new(0, 1)), Ok(()));
}
