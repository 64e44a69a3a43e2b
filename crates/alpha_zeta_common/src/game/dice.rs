use std::fmt::Debug;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const DIE_SIDES: u8 = 6;

/// Source of six-sided die rolls for a match.
pub trait Dice: Debug {
    /// A value in `1..=6`.
    fn roll(&mut self) -> u8;
}

/// The match die. The same seed always yields the same sequence, which makes a
/// match replayable from its seed and its command log.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        SeededDice {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Dice for SeededDice {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_SIDES)
    }
}

/// Replays a fixed sequence of rolls, starting over when exhausted.
#[derive(Debug, Clone)]
pub struct LoadedDice {
    rolls: Vec<u8>,
    next: usize,
}

impl LoadedDice {
    /// Values are clamped into `1..=6`. An empty sequence always rolls 1.
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        LoadedDice {
            rolls: rolls
                .into_iter()
                .map(|roll| roll.clamp(1, DIE_SIDES))
                .collect(),
            next: 0,
        }
    }
}

impl Dice for LoadedDice {
    fn roll(&mut self) -> u8 {
        if self.rolls.is_empty() {
            return 1;
        }

        let roll = self.rolls[self.next % self.rolls.len()];
        self.next += 1;
        roll
    }
}
