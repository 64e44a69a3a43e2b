use pretty_assertions::assert_eq;

use crate::game::combat::{HitNotice, HitOutcome, LossResolution};
use crate::game::grid::{Cell, Position};
use crate::game::module::{ActionToken, ModuleKind};
use crate::game::ship_builder::{attacker, collector, MatchBuilder};
use crate::game::side::SideID;
use crate::game::ActionValidationError;

#[test]
fn actions_long_shot_destroys_marked_small_ship() {
    let mut game = MatchBuilder::new(9)
        .ship(attacker('C', 0, 0, &[ModuleKind::RailGun]))
        .ship(attacker('D', 4, 4, &[ModuleKind::Sensor]))
        .ship(attacker('W', 2, 3, &[ModuleKind::Sword]))
        .rolls([1])
        .build();

    game.mark('W', 'D').unwrap();
    let report = game.long_shot('C', 'W').unwrap();

    assert_eq!(report.effective, 1);
    assert_eq!(
        report.outcome,
        HitOutcome::Hit {
            loser: 'W',
            modules: 2,
            notice: HitNotice::Marked
        }
    );
    assert_eq!(
        report.resolution,
        Some(LossResolution::Destroyed {
            ship: 'W',
            lost: vec![ModuleKind::Engine, ModuleKind::Sword]
        })
    );
    assert!(game.find_ship('W').unwrap().is_destroyed());
    assert_eq!(game.grid().at(&Position::new(2, 3)), Ok(Cell::Empty));
    assert!(!game.side(SideID::Zeta).has_lost());
    assert_eq!(report.winner, None);
}

#[test]
fn actions_long_shot_cover_softens_the_hit() {
    let mut game = MatchBuilder::new(9)
        .ship(attacker('C', 0, 0, &[ModuleKind::RailGun]))
        .ship(attacker(
            'W',
            0,
            5,
            &[ModuleKind::Sword, ModuleKind::Sword, ModuleKind::Sword],
        ))
        .cover(0, 4, 2)
        .rolls([4])
        .build();

    let report = game.long_shot('C', 'W').unwrap();
    assert_eq!(report.modifier, 2);
    assert_eq!(report.effective, 2);
    assert_eq!(
        report.resolution,
        Some(LossResolution::Removed {
            ship: 'W',
            lost: vec![ModuleKind::Sword]
        })
    );
    assert!(!game.registry().contains('C', ActionToken::LongShot));
}

#[test]
fn actions_long_shot_heavy_hit_on_collector() {
    let mut game = MatchBuilder::new(9)
        .ship(attacker('C', 0, 0, &[ModuleKind::RailGun]))
        .ship(collector('Z', 3, 3, 3))
        .rolls([5])
        .build();

    let report = game.long_shot('C', 'Z').unwrap();
    assert_eq!(
        report.outcome,
        HitOutcome::Hit {
            loser: 'Z',
            modules: 2,
            notice: HitNotice::Normal
        }
    );
    assert_eq!(
        report.resolution,
        Some(LossResolution::Removed {
            ship: 'Z',
            lost: vec![ModuleKind::Container, ModuleKind::Container]
        })
    );
    assert_eq!(game.find_ship('Z').unwrap().intact_modules().len(), 2);
    assert!(!game.is_game_over());
}

#[test]
fn actions_long_shot_destroying_the_collector_ends_the_match() {
    let mut game = MatchBuilder::new(9)
        .ship(attacker('C', 0, 0, &[ModuleKind::RailGun]))
        .ship(collector('Z', 0, 6, 1))
        .rolls([6])
        .build();

    let report = game.long_shot('C', 'Z').unwrap();
    assert_eq!(
        report.outcome,
        HitOutcome::Hit {
            loser: 'Z',
            modules: 2,
            notice: HitNotice::Critical
        }
    );
    assert_eq!(report.winner, Some(SideID::Alpha));
    assert!(game.is_game_over());
    assert_eq!(game.winner(), Some(SideID::Alpha));
    assert_eq!(game.grid().at(&Position::new(0, 6)), Ok(Cell::Empty));

    assert_eq!(game.end_turn(), Err(ActionValidationError::GameOver));
    assert_eq!(
        game.move_ship('C', Position::new(1, 0)),
        Err(ActionValidationError::GameOver)
    );
}

#[test]
fn actions_long_shot_range() {
    let mut game = MatchBuilder::new(9)
        .ship(attacker('C', 0, 0, &[ModuleKind::RailGun]))
        .ship(attacker('W', 0, 4, &[]))
        .ship(attacker('X', 4, 3, &[]))
        .build();

    assert_eq!(
        game.long_shot('C', 'W'),
        Err(ActionValidationError::OutOfRange)
    );
    assert_eq!(
        game.long_shot('C', 'X'),
        Err(ActionValidationError::OutOfRange)
    );
    assert!(game.registry().contains('C', ActionToken::LongShot));
}
