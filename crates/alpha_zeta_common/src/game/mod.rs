use thiserror::Error;

use crate::game::module::ActionToken;
use crate::game::ship::ShipID;

pub mod combat;
pub mod dice;
pub mod grid;
pub mod match_state;
pub mod module;
pub mod registry;
pub mod ship;
pub mod side;


/// Reasons a command is refused. Every check runs before the match is touched,
/// so an `Err` always leaves the state as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionValidationError {
    #[error("ship {id} not found.")]
    ShipNotFound { id: ShipID },
    #[error("the AI of this ship is not attacking at the moment.")]
    NotYourTurn,
    #[error("this command is not executable.")]
    ActionUnavailable { token: ActionToken },
    #[error("not in range.")]
    OutOfRange,
    #[error("target tile is not empty.")]
    TargetOccupied,
    #[error("target tile is outside of the board.")]
    OutOfBounds,
    #[error("ship {id} is destroyed.")]
    ShipAlreadyDestroyed { id: ShipID },
    #[error("you cannot attack a ship from same fleet.")]
    FriendlyFire,
    #[error("collectors cannot be targeted by this action.")]
    CollectorTargeted,
    #[error("please select a valid module.")]
    InvalidModuleSelection,
    #[error("a module selection is pending.")]
    SelectionPending,
    #[error("no module selection is pending.")]
    NoSelectionPending,
    #[error("the game is over.")]
    GameOver,
}

/// The grid and the fleets handed to [`match_state::Match::new`] disagree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchSetupError {
    #[error("ship {0} is not placed on the board")]
    ShipNotPlaced(ShipID),
    #[error("ship {0} is placed more than once")]
    ShipPlacedTwice(ShipID),
    #[error("ship {0} is unknown to both fleets")]
    UnknownShip(ShipID),
    #[error("ship identity {0} is used more than once")]
    DuplicateIdentity(ShipID),
    #[error("ship {0} is positioned outside of the board")]
    ShipOutOfBounds(ShipID),
}
