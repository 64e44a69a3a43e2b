use pretty_assertions::assert_eq;

use crate::game::actions_test::{game, run, COLLECTOR_LAYOUT, TEST_LAYOUT};
use crate::game::states::GameState;

#[test]
fn actions_strike_opens_selection() {
    let mut game = game(TEST_LAYOUT, 1, [3]);

    assert_eq!(
        run(&mut game, "b strike w"),
        vec![
            "Roll 3",
            "Bonus -1",
            "Zeta must select 1 of W's module(s) (separated by comma):",
            "SENSOR, SHIELD, SWORD",
        ]
    );
    assert_eq!(game.get_state(), GameState::AwaitingSelection);
}

#[test]
fn actions_strike_missed() {
    let mut game = game(TEST_LAYOUT, 1, [1]);

    assert_eq!(
        run(&mut game, "B STRIKE W"),
        vec!["Roll 1", "Bonus -1", "missed"]
    );
    assert_eq!(game.get_state(), GameState::InGame);
    assert_eq!(
        run(&mut game, "b strike w"),
        vec!["Error, this command is not executable."]
    );
}

#[test]
fn actions_long_shot_destroys_ship() {
    let mut game = game(TEST_LAYOUT, 1, [6]);

    assert_eq!(
        run(&mut game, "c longshot x"),
        vec![
            "Roll 6",
            "Bonus 0",
            "X looses ENGINE",
            "X looses RAILGUN",
            "X was destroyed",
        ]
    );
    assert_eq!(
        run(&mut game, "board"),
        vec!["A...C", ".B...", ".W...", "D....", "...YZ"]
    );
    assert_eq!(
        run(&mut game, "actions x"),
        vec!["Error, ship X is destroyed."]
    );
}

#[test]
fn actions_strike_on_collector() {
    let mut game = game(COLLECTOR_LAYOUT, 1, [2]);

    assert_eq!(
        run(&mut game, "b strike z"),
        vec!["Roll 2", "Bonus 0", "Z looses CONTAINER"]
    );
    assert_eq!(game.get_state(), GameState::InGame);
}

#[test]
fn actions_destroying_the_collector_wins() {
    let mut game = game(COLLECTOR_LAYOUT, 0, [2]);

    assert_eq!(
        run(&mut game, "b strike z"),
        vec![
            "Roll 2",
            "Bonus 0",
            "Z looses ENGINE",
            "Z was destroyed",
            "Alpha won!",
        ]
    );
    assert_eq!(game.get_state(), GameState::End);
    assert_eq!(
        run(&mut game, "board"),
        vec!["Error, this command is not executable while the game is End."]
    );
}

#[test]
fn actions_combat_validation() {
    let mut game = game(TEST_LAYOUT, 1, []);

    assert_eq!(run(&mut game, "b strike c"), vec!["Error, you cannot attack a ship from same fleet."]);
    assert_eq!(run(&mut game, "b strike x"), vec!["Error, not in range."]);
    assert_eq!(run(&mut game, "w strike b"), vec!["Error, the AI of this ship is not attacking at the moment."]);
    assert_eq!(run(&mut game, "c strike w"), vec!["Error, this command is not executable."]);
    assert_eq!(run(&mut game, "d mark z"), vec!["Error, collectors cannot be targeted by this action."]);
    assert_eq!(run(&mut game, "d mark w"), Vec::<String>::new());
    assert_eq!(run(&mut game, "d mark w"), vec!["Error, this command is not executable."]);
}
