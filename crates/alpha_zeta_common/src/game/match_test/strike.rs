use pretty_assertions::assert_eq;

use crate::game::combat::{CombatAction, HitNotice, HitOutcome, LossResolution};
use crate::game::module::{ActionToken, Module, ModuleKind};
use crate::game::ship_builder::{attacker, MatchBuilder};
use crate::game::ActionValidationError;

#[test]
fn actions_strike_removes_the_only_support_module() {
    let mut game = MatchBuilder::new(9)
        .ship(attacker(
            'B',
            0,
            0,
            &[ModuleKind::Sword, ModuleKind::Propulsion],
        ))
        .ship(attacker('W', 0, 1, &[ModuleKind::Sword]))
        .rolls([3])
        .build();

    let report = game.strike('B', 'W').unwrap();
    assert_eq!(report.action, CombatAction::Strike);
    assert_eq!(report.roll, 3);
    assert_eq!(report.modifier, 0);
    assert_eq!(report.effective, 3);
    assert_eq!(
        report.outcome,
        HitOutcome::Hit {
            loser: 'W',
            modules: 1,
            notice: HitNotice::Normal
        }
    );
    assert_eq!(
        report.resolution,
        Some(LossResolution::Removed {
            ship: 'W',
            lost: vec![ModuleKind::Sword]
        })
    );
    assert_eq!(report.winner, None);

    let w = game.find_ship('W').unwrap();
    assert_eq!(w.intact_modules(), vec![Module::new(ModuleKind::Engine)]);
    assert!(!game.registry().contains('B', ActionToken::Strike));
    assert!(game.registry().contains('B', ActionToken::Propel));
    assert!(!game.is_game_over());
}

#[test]
fn actions_strike_critical_and_miss() {
    let mut game = MatchBuilder::new(9)
        .ship(attacker('B', 0, 0, &[ModuleKind::Sword]))
        .ship(attacker('C', 2, 0, &[ModuleKind::Sword]))
        .ship(attacker(
            'W',
            0,
            1,
            &[ModuleKind::Shield, ModuleKind::Sensor, ModuleKind::Sword],
        ))
        .ship(attacker('X', 2, 1, &[ModuleKind::Sword, ModuleKind::Sword]))
        .rolls([2, 6])
        .build();

    // shield takes the roll of 2 down to 1
    let report = game.strike('B', 'W').unwrap();
    assert_eq!(report.modifier, 1);
    assert_eq!(report.effective, 1);
    assert_eq!(report.outcome, HitOutcome::Miss);
    assert_eq!(report.resolution, None);
    assert!(!game.registry().contains('B', ActionToken::Strike));
    assert_eq!(game.find_ship('W').unwrap().intact_modules().len(), 4);

    let report = game.strike('C', 'X').unwrap();
    assert_eq!(
        report.outcome,
        HitOutcome::Hit {
            loser: 'X',
            modules: 1,
            notice: HitNotice::Critical
        }
    );
    assert_eq!(
        report.resolution,
        Some(LossResolution::Removed {
            ship: 'X',
            lost: vec![ModuleKind::Sword]
        })
    );
}

#[test]
fn actions_strike_validation() {
    let mut game = MatchBuilder::new(9)
        .ship(attacker('B', 0, 0, &[ModuleKind::Sword]))
        .ship(attacker('C', 0, 1, &[]))
        .ship(attacker('D', 1, 0, &[ModuleKind::Sword]))
        .ship(attacker('W', 3, 3, &[ModuleKind::Sword]))
        .ship(attacker('X', 2, 0, &[]))
        .rolls([4])
        .build();
    let before = format!("{game:?}");

    assert_eq!(
        game.strike('B', 'W'),
        Err(ActionValidationError::OutOfRange)
    );
    assert_eq!(
        game.strike('B', 'C'),
        Err(ActionValidationError::FriendlyFire)
    );
    assert_eq!(
        game.strike('C', 'X'),
        Err(ActionValidationError::ActionUnavailable {
            token: ActionToken::Strike
        })
    );
    assert_eq!(
        game.strike('W', 'B'),
        Err(ActionValidationError::NotYourTurn)
    );
    assert_eq!(
        game.strike('B', 'Q'),
        Err(ActionValidationError::ShipNotFound { id: 'Q' })
    );
    assert_eq!(format!("{game:?}"), before);

    assert!(game.strike('D', 'X').is_ok());
    assert_eq!(
        game.strike('D', 'X'),
        Err(ActionValidationError::ShipAlreadyDestroyed { id: 'X' })
    );
}

#[test]
fn actions_strike_needs_an_intact_sword() {
    let mut game = MatchBuilder::new(9)
        .ship(attacker('B', 0, 0, &[ModuleKind::Sword, ModuleKind::Shield]))
        .ship(attacker('W', 0, 1, &[ModuleKind::Sword]))
        .build();

    game.remove_module(ModuleKind::Sword, 'B').unwrap();
    assert!(game.registry().contains('B', ActionToken::Strike));
    assert_eq!(
        game.strike('B', 'W'),
        Err(ActionValidationError::ActionUnavailable {
            token: ActionToken::Strike
        })
    );
}
