use pretty_assertions::assert_eq;

use crate::game::grid::Position;
use crate::game::ship_builder::MatchBuilder;

#[test]
fn cover_without_neighbours() {
    let game = MatchBuilder::new(9).cover(0, 0, 2).build();
    assert_eq!(
        game.calculate_cover(Position::new(0, 4), Position::new(4, 4)),
        0
    );
}

#[test]
fn cover_on_the_attacker_side_only() {
    let game = MatchBuilder::new(9)
        .cover(3, 2, 2)
        .cover(5, 2, 1)
        .cover(4, 1, 1)
        .build();

    // attacker to the north
    assert_eq!(
        game.calculate_cover(Position::new(0, 2), Position::new(4, 2)),
        2
    );
    // attacker to the south
    assert_eq!(
        game.calculate_cover(Position::new(7, 2), Position::new(4, 2)),
        1
    );
    // attacker to the east sees no cover; the west neighbour is behind the defender
    assert_eq!(
        game.calculate_cover(Position::new(4, 6), Position::new(4, 2)),
        0
    );
    assert_eq!(
        game.calculate_cover(Position::new(4, 0), Position::new(4, 2)),
        1
    );
}

#[test]
fn cover_diagonal_takes_the_larger_value() {
    let game = MatchBuilder::new(9)
        .cover(2, 3, 1)
        .cover(3, 2, 2)
        .build();

    assert_eq!(
        game.calculate_cover(Position::new(0, 0), Position::new(3, 3)),
        2
    );
    assert_eq!(
        game.calculate_cover(Position::new(0, 6), Position::new(3, 3)),
        1
    );
}

#[test]
fn cover_at_the_board_edge() {
    let game = MatchBuilder::new(9).build();
    assert_eq!(
        game.calculate_cover(Position::new(0, 5), Position::new(0, 0)),
        0
    );
}
