pub mod game;

pub use game::combat::{
    CombatAction, CombatReport, HitNotice, HitOutcome, LossResolution, PendingSelection,
    SelectionProgress,
};
pub use game::dice::{Dice, LoadedDice, SeededDice};
pub use game::grid::{Cell, Grid, Position};
pub use game::match_state::Match;
pub use game::module::{ActionToken, Module, ModuleKind, UnknownModule};
pub use game::ship::{Ship, ShipID};
pub use game::side::{Fleet, Side, SideID};
pub use game::{ActionValidationError, MatchSetupError};
