use alpha_zeta_common::Match;

use crate::game::states::GameState;

/// A running console session: the match plus the state gating which commands
/// are accepted.
#[derive(Debug)]
pub struct Game {
    pub(crate) engine: Match,
    pub(crate) state: GameState,
}

impl Game {
    pub fn new(engine: Match) -> Self {
        let mut game = Game {
            engine,
            state: GameState::InGame,
        };
        game.sync_state();
        game
    }

    pub fn get_state(&self) -> GameState {
        self.state
    }

    pub fn engine(&self) -> &Match {
        &self.engine
    }

    /// Follows the match into a pending choice and out of it again. Once the
    /// session has ended it stays ended.
    pub(crate) fn sync_state(&mut self) {
        self.state = match self.state {
            GameState::End => GameState::End,
            _ if self.engine.is_game_over() => GameState::End,
            _ if self.engine.pending_selection().is_some() => GameState::AwaitingSelection,
            _ => GameState::InGame,
        };
    }
}
