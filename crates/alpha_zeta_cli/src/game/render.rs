//! Console texts for everything an action can produce.

use std::collections::BTreeSet;

use alpha_zeta_common::{
    ActionToken, Cell, CombatReport, Grid, LossResolution, Match, Module,
    ModuleKind, PendingSelection, SelectionProgress, Ship, ShipID, SideID,
};

use crate::game::actions::ActionResult;
use crate::game::data::Game;

pub const HELP: &str = "HELP - shows this text
QUIT - quits the game
BOARD - shows the whole board
FLEET - shows details of all ships of the AIs
ACTIONS [NAME] - shows available actions of ship [NAME]
ENDTURN - ends the current player's turn
[SHIP] [ACTION] [X] [Y] - let [SHIP] perform [ACTION] on field (X,Y)
[SHIP] [ACTION] [TARGET] - let [SHIP] perform [ACTION] on [TARGET]";

pub fn describe(result: &ActionResult, game: &Game) -> Vec<String> {
    let engine = game.engine();
    match result {
        ActionResult::Help => HELP.lines().map(String::from).collect(),
        ActionResult::Quit | ActionResult::Moved | ActionResult::Marked => vec![],
        ActionResult::Board => board(engine.grid()),
        ActionResult::Fleet => fleet(engine),
        ActionResult::Actions { ship_id, tokens } => vec![actions(*ship_id, tokens)],
        ActionResult::TurnEnded(side) => vec![turn(*side)],
        ActionResult::Combat(report) => combat(report, engine),
        ActionResult::Selected { progress, rejected } => {
            let mut lines: Vec<String> = progress.iter().flat_map(selection).collect();
            if let Some(e) = rejected {
                lines.push(format!("Error, {e}"));
            }
            lines
        }
    }
}

pub fn turn(side: SideID) -> String {
    format!("{side}'s turn")
}

pub fn board(grid: &Grid) -> Vec<String> {
    grid.rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Cell::Empty => '.',
                    Cell::Cover(value) => char::from(b'0' + value),
                    Cell::Occupied(ship_id) => *ship_id,
                })
                .collect::<String>()
        })
        .collect()
}

fn module_names(modules: &[Module]) -> Vec<&'static str> {
    let mut names: Vec<_> = modules.iter().map(|module| module.kind().name()).collect();
    names.sort_unstable();
    names
}

fn ship_line(ship: &Ship) -> String {
    let tag = if ship.is_collector() { "<C>" } else { "<->" };
    format!(
        "{tag} {}:{}",
        ship.id(),
        module_names(&ship.intact_modules()).join(", ")
    )
}

/// Intact ships of both sides with their modules, destroyed ones after them.
pub fn fleet(engine: &Match) -> Vec<String> {
    [SideID::Alpha, SideID::Zeta]
        .into_iter()
        .flat_map(|side| {
            let ships: Vec<&Ship> = engine.side(side).fleet().ships().collect();
            let intact = ships
                .iter()
                .filter(|ship| !ship.is_destroyed())
                .map(|ship| ship_line(ship));
            let destroyed = ships
                .iter()
                .filter(|ship| ship.is_destroyed())
                .map(|ship| format!("~X~ {}", ship.id()));

            std::iter::once(format!("{side}'s fleet"))
                .chain(intact)
                .chain(destroyed)
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn actions(ship_id: ShipID, tokens: &BTreeSet<ActionToken>) -> String {
    if tokens.is_empty() {
        return format!("No available actions for {ship_id}");
    }

    let mut names: Vec<String> = tokens.iter().map(ToString::to_string).collect();
    names.sort_unstable();
    format!("Available actions of {ship_id}: {}", names.join(", "))
}

fn losses(ship: ShipID, lost: &[ModuleKind]) -> impl Iterator<Item = String> + '_ {
    lost.iter().map(move |kind| format!("{ship} looses {kind}"))
}

pub fn selection_prompt(pending: &PendingSelection, engine: &Match) -> Vec<String> {
    let candidates = engine
        .find_ship(pending.ship)
        .map(|ship| module_names(&ship.intact_support_modules()).join(", "))
        .unwrap_or_default();

    vec![
        format!(
            "{} must select {} of {}'s module(s) (separated by comma):",
            pending.side, pending.remaining, pending.ship
        ),
        candidates,
    ]
}

pub fn combat(report: &CombatReport, engine: &Match) -> Vec<String> {
    let mut lines = vec![
        format!("Roll {}", report.roll),
        format!("Bonus {}", -i32::from(report.modifier)),
    ];

    match &report.resolution {
        None => lines.push(String::from("missed")),
        Some(LossResolution::Removed { ship, lost }) => lines.extend(losses(*ship, lost)),
        Some(LossResolution::Destroyed { ship, lost }) => {
            lines.extend(losses(*ship, lost));
            lines.push(format!("{ship} was destroyed"));
        }
        Some(LossResolution::Pending(pending)) => {
            lines.extend(selection_prompt(pending, engine));
        }
    }

    if let Some(winner) = report.winner {
        lines.push(format!("{winner} won!"));
    }
    lines
}

pub fn selection(progress: &SelectionProgress) -> Vec<String> {
    match progress {
        SelectionProgress::Remaining { ship, lost, .. } => vec![format!("{ship} looses {lost}")],
        SelectionProgress::Complete {
            ship,
            lost,
            destroyed,
            winner,
        } => {
            let mut lines = vec![format!("{ship} looses {lost}")];
            if *destroyed {
                lines.push(format!("{ship} was destroyed"));
            }
            if let Some(winner) = winner {
                lines.push(format!("{winner} won!"));
            }
            lines
        }
    }
}
