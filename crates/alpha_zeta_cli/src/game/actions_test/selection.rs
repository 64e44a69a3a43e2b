use pretty_assertions::assert_eq;

use crate::game::actions_test::{game, run, TEST_LAYOUT};
use crate::game::states::GameState;

#[test]
fn actions_select_single_module() {
    let mut game = game(TEST_LAYOUT, 1, [3]);
    run(&mut game, "b strike w");

    assert_eq!(
        run(&mut game, "engine"),
        vec!["Error, please select a valid module."]
    );
    assert_eq!(
        run(&mut game, "railgun"),
        vec!["Error, please select a valid module."]
    );
    assert_eq!(game.get_state(), GameState::AwaitingSelection);

    assert_eq!(run(&mut game, "Shield"), vec!["W looses SHIELD"]);
    assert_eq!(game.get_state(), GameState::InGame);
    assert!(!game.engine().find_ship('W').unwrap().contains_shield());
}

#[test]
fn actions_select_two_modules() {
    let mut game = game(TEST_LAYOUT, 1, [6]);

    assert_eq!(
        run(&mut game, "c longshot w"),
        vec![
            "Roll 6",
            "Bonus -1",
            "Zeta must select 2 of W's module(s) (separated by comma):",
            "SENSOR, SHIELD, SWORD",
        ]
    );

    assert_eq!(
        run(&mut game, "sword, laser"),
        vec!["Error, please select a valid module."]
    );
    assert_eq!(
        game.engine().pending_selection().map(|pending| pending.remaining),
        Some(2)
    );

    // the second sword is gone after the first pick
    assert_eq!(
        run(&mut game, "sword, sword"),
        vec!["W looses SWORD", "Error, please select a valid module."]
    );
    assert_eq!(game.get_state(), GameState::AwaitingSelection);

    assert_eq!(
        run(&mut game, "endturn"),
        vec!["Error, please select a valid module."]
    );
    assert_eq!(run(&mut game, "sensor"), vec!["W looses SENSOR"]);
    assert_eq!(game.get_state(), GameState::InGame);
    assert_eq!(run(&mut game, "endturn"), vec!["Zeta's turn"]);
}

#[test]
fn actions_select_both_at_once() {
    let mut game = game(TEST_LAYOUT, 1, [6]);
    run(&mut game, "c longshot w");

    assert_eq!(
        run(&mut game, "shield, sensor, sword"),
        vec!["W looses SHIELD", "W looses SENSOR"]
    );
    assert_eq!(game.get_state(), GameState::InGame);
    assert_eq!(
        run(&mut game, "fleet")[7],
        "<-> W:ENGINE, SWORD"
    );
}

#[test]
fn actions_queries_while_selecting() {
    let mut game = game(TEST_LAYOUT, 1, [3]);
    run(&mut game, "b strike w");

    assert_eq!(
        run(&mut game, "actions w"),
        vec!["Available actions of W: MARK, MOVE, RAMM, STRIKE"]
    );
    assert_eq!(run(&mut game, "board").len(), 5);
    assert_eq!(game.get_state(), GameState::AwaitingSelection);
}
