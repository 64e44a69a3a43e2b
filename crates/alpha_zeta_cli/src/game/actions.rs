use std::collections::BTreeSet;

use log::{debug, info};
use thiserror::Error;

use alpha_zeta_common::{
    ActionToken, ActionValidationError, CombatReport, ModuleKind, Position, SelectionProgress,
    ShipID, SideID,
};

use crate::game::data::Game;
use crate::game::states::GameState;

const SHIP_LETTERS: &str = "ABCDZWXY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Session commands
    Help,
    Quit,
    Board,
    Fleet,
    Actions { ship_id: ShipID },
    EndTurn,

    // Ship commands, targets are board positions
    Move { ship_id: ShipID, target: Position },
    Propel { ship_id: ShipID, target: Position },

    // Ship commands, targets are ships
    Ramm { ship_id: ShipID, target: ShipID },
    Strike { ship_id: ShipID, target: ShipID },
    LongShot { ship_id: ShipID, target: ShipID },
    Mark { ship_id: ShipID, target: ShipID },

    // Answer to a pending module choice
    SelectModules { modules: Vec<ModuleKind> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionParseError {
    #[error("not a valid command")]
    InvalidCommand,
    #[error("please select a valid module.")]
    InvalidModule,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionExecutionError {
    #[error("{0}")]
    Validation(#[from] ActionValidationError),
    #[error("this command is not executable while the game is {0}.")]
    OutOfState(GameState),
}

/// What an applied action produced, everything the console needs to report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    Help,
    Quit,
    Board,
    Fleet,
    Actions {
        ship_id: ShipID,
        tokens: BTreeSet<ActionToken>,
    },
    TurnEnded(SideID),
    Moved,
    Marked,
    Combat(CombatReport),
    Selected {
        progress: Vec<SelectionProgress>,
        rejected: Option<ActionValidationError>,
    },
}

impl Action {
    /// Parses one console line. While a module choice is pending, lines that
    /// are not session commands are read as a comma separated module list.
    pub fn parse(line: &str, state: GameState) -> Result<Action, ActionParseError> {
        let lowered = line.trim().to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();

        let action = match words.as_slice() {
            ["help"] => Some(Action::Help),
            ["quit"] => Some(Action::Quit),
            ["board"] => Some(Action::Board),
            ["fleet"] => Some(Action::Fleet),
            ["endturn"] => Some(Action::EndTurn),
            ["actions", ship] => parse_ship(ship).map(|ship_id| Action::Actions { ship_id }),
            [ship, command @ ("move" | "propel"), x, y] => {
                match (parse_ship(ship), parse_coordinate(x), parse_coordinate(y)) {
                    (Some(ship_id), Some(column), Some(row)) => {
                        let target = Position::new(row, column);
                        Some(match *command {
                            "move" => Action::Move { ship_id, target },
                            _ => Action::Propel { ship_id, target },
                        })
                    }
                    _ => None,
                }
            }
            [ship, command @ ("ramm" | "strike" | "longshot" | "mark"), target] => {
                match (parse_ship(ship), parse_ship(target)) {
                    (Some(ship_id), Some(target)) => Some(match *command {
                        "ramm" => Action::Ramm { ship_id, target },
                        "strike" => Action::Strike { ship_id, target },
                        "longshot" => Action::LongShot { ship_id, target },
                        _ => Action::Mark { ship_id, target },
                    }),
                    _ => None,
                }
            }
            _ => None,
        };

        match (action, state) {
            (Some(action), GameState::AwaitingSelection) if state.is_action_valid(&action) => {
                Ok(action)
            }
            (_, GameState::AwaitingSelection) => parse_modules(&lowered),
            (Some(action), _) => Ok(action),
            (None, _) => Err(ActionParseError::InvalidCommand),
        }
    }

    pub(crate) fn apply_on(&self, game: &mut Game) -> Result<ActionResult, ActionExecutionError> {
        match self {
            Action::Help => Ok(ActionResult::Help),
            Action::Quit => {
                info!("session closed");
                game.state = GameState::End;
                Ok(ActionResult::Quit)
            }
            Action::Board => Ok(ActionResult::Board),
            Action::Fleet => Ok(ActionResult::Fleet),
            Action::Actions { ship_id } => Ok(ActionResult::Actions {
                ship_id: *ship_id,
                tokens: game.engine.available_actions(*ship_id)?,
            }),
            Action::EndTurn => Ok(ActionResult::TurnEnded(game.engine.end_turn()?)),
            Action::Move { ship_id, target } => {
                game.engine.move_ship(*ship_id, *target)?;
                Ok(ActionResult::Moved)
            }
            Action::Propel { ship_id, target } => {
                game.engine.propel(*ship_id, *target)?;
                Ok(ActionResult::Moved)
            }
            Action::Ramm { ship_id, target } => {
                Ok(ActionResult::Combat(game.engine.ramm(*ship_id, *target)?))
            }
            Action::Strike { ship_id, target } => {
                Ok(ActionResult::Combat(game.engine.strike(*ship_id, *target)?))
            }
            Action::LongShot { ship_id, target } => {
                Ok(ActionResult::Combat(game.engine.long_shot(*ship_id, *target)?))
            }
            Action::Mark { ship_id, target } => {
                game.engine.mark(*target, *ship_id)?;
                Ok(ActionResult::Marked)
            }
            Action::SelectModules { modules } => select_modules(game, modules),
        }
    }
}

/// Applies the picks one by one until the choice is settled. Picks beyond
/// that are ignored, the first invalid one stops the rest.
fn select_modules(
    game: &mut Game,
    modules: &[ModuleKind],
) -> Result<ActionResult, ActionExecutionError> {
    let mut progress = Vec::new();

    for kind in modules {
        match game.engine.select_module(*kind) {
            Ok(step) => {
                let complete = matches!(step, SelectionProgress::Complete { .. });
                progress.push(step);
                if complete {
                    break;
                }
            }
            Err(e) if progress.is_empty() => return Err(e.into()),
            Err(e) => {
                debug!("module selection stopped at {kind}: {e}");
                return Ok(ActionResult::Selected {
                    progress,
                    rejected: Some(e),
                });
            }
        }
    }

    Ok(ActionResult::Selected {
        progress,
        rejected: None,
    })
}

fn parse_ship(word: &str) -> Option<ShipID> {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => {
            let letter = letter.to_ascii_uppercase();
            SHIP_LETTERS.contains(letter).then_some(letter)
        }
        _ => None,
    }
}

fn parse_coordinate(word: &str) -> Option<i32> {
    match word.as_bytes() {
        [digit @ b'0'..=b'9'] => Some(i32::from(digit - b'0')),
        _ => None,
    }
}

fn parse_modules(line: &str) -> Result<Action, ActionParseError> {
    let modules = line
        .split(',')
        .map(|name| name.parse::<ModuleKind>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ActionParseError::InvalidModule)?;

    Ok(Action::SelectModules { modules })
}
