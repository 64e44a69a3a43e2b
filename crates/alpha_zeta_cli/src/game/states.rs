use std::fmt::{Display, Formatter};

use log::debug;

use crate::game::actions::{Action, ActionExecutionError, ActionResult};
use crate::game::data::Game;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameState {
    InGame,
    AwaitingSelection,
    End,
}

impl Display for GameState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GameState::InGame => f.write_str("InGame"),
            GameState::AwaitingSelection => f.write_str("AwaitingSelection"),
            GameState::End => f.write_str("End"),
        }
    }
}

impl GameState {
    pub fn is_action_valid(&self, action: &Action) -> bool {
        match self {
            GameState::InGame => !matches!(action, Action::SelectModules { .. }),
            GameState::AwaitingSelection => matches!(
                action,
                Action::Help
                    | Action::Quit
                    | Action::Board
                    | Action::Fleet
                    | Action::Actions { .. }
                    | Action::SelectModules { .. }
            ),
            GameState::End => false,
        }
    }

    pub fn execute_action(
        &self,
        action: Action,
        game: &mut Game,
    ) -> Result<ActionResult, ActionExecutionError> {
        if !self.is_action_valid(&action) {
            return Err(ActionExecutionError::OutOfState(*self));
        }

        debug!("execute {:?} action on game", action);
        let result = action.apply_on(game);
        game.sync_state();
        result
    }
}
