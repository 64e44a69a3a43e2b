//! The console session: fleet setup prompts followed by the command loop.

use std::io::{BufRead, Write};

use eyre::eyre;
use log::{debug, info, warn};

use alpha_zeta_common::{ModuleKind, ShipID, SideID};

use crate::config_provider::GameConfig;
use crate::game::actions::Action;
use crate::game::data::Game;
use crate::game::render;
use crate::game::states::GameState;
use crate::setup::{MatchSetup, SetupError, ALPHA_ATTACKERS, ZETA_ATTACKERS};

const LAYOUT_PROMPT: &str = "Enter the Board layout as string:
Use . for free tiles; 1,2 for cover; and A,B,C,D,Z,W,X,Y for ships";

fn error_line(output: &mut impl Write, error: impl std::fmt::Display) -> eyre::Result<()> {
    writeln!(output, "Error, {error}")?;
    Ok(())
}

/// Reads lines until `attempt` accepts one. Rejections are reported and asked
/// again.
fn prompt_until<T>(
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
    output: &mut impl Write,
    mut attempt: impl FnMut(&str) -> Result<T, SetupError>,
) -> eyre::Result<T> {
    loop {
        let line = lines
            .next()
            .ok_or_else(|| eyre!("input closed during setup"))??;
        match attempt(&line) {
            Ok(value) => return Ok(value),
            Err(e) => error_line(output, e)?,
        }
    }
}

fn module_prompt(ship_id: ShipID) -> String {
    let names: Vec<_> = ModuleKind::SELECTABLE.iter().map(ModuleKind::name).collect();
    format!(
        "Choose upto 3 modules for ship {ship_id} (separated by comma):\n{}",
        names.join(", ")
    )
}

fn configure_side(
    setup: &mut MatchSetup,
    config: &GameConfig,
    side: SideID,
    attackers: [ShipID; 3],
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
    output: &mut impl Write,
) -> eyre::Result<()> {
    writeln!(output, "{side} configures its ships")?;

    for ship_id in attackers {
        if let Some(loadout) = config.loadout(ship_id) {
            if let Err(e) = setup.configure(ship_id, loadout) {
                warn!("configured loadout of {ship_id} rejected: {e}");
                error_line(output, e)?;
            }
        }
        if setup.is_configured(ship_id) {
            continue;
        }

        writeln!(output, "{}", module_prompt(ship_id))?;
        prompt_until(lines, output, |line| setup.configure(ship_id, line))?;
    }

    Ok(())
}

/// Runs a whole session on the given streams. Returns once the match is won,
/// the players quit or the input ends.
pub fn interactive_main(
    config: &GameConfig,
    input: impl BufRead,
    output: &mut impl Write,
) -> eyre::Result<()> {
    let mut setup = match MatchSetup::new(config) {
        Ok(setup) => setup,
        Err(e) => return error_line(output, e),
    };
    let mut lines = input.lines();

    writeln!(output, "Welcome to AlphaZeta!")?;
    configure_side(&mut setup, config, SideID::Alpha, ALPHA_ATTACKERS, &mut lines, output)?;
    configure_side(&mut setup, config, SideID::Zeta, ZETA_ATTACKERS, &mut lines, output)?;

    let configured = match config.layout.as_deref().map(|layout| setup.build(layout)) {
        Some(Ok(engine)) => Some(engine),
        Some(Err(e)) => {
            warn!("configured layout rejected: {e}");
            error_line(output, e)?;
            None
        }
        None => None,
    };
    let engine = match configured {
        Some(engine) => engine,
        None => {
            writeln!(output, "{LAYOUT_PROMPT}")?;
            prompt_until(&mut lines, output, |line| setup.build(line))?
        }
    };

    let mut game = Game::new(engine);
    info!("match started with seed {}", config.seed);
    writeln!(output, "{}", render::turn(game.engine().attacking()))?;

    while game.get_state() != GameState::End {
        let Some(line) = lines.next().transpose()? else {
            info!("input closed");
            break;
        };

        let action = match Action::parse(&line, game.get_state()) {
            Ok(action) => action,
            Err(e) => {
                error_line(output, e)?;
                continue;
            }
        };

        let state = game.get_state();
        match state.execute_action(action, &mut game) {
            Ok(result) => {
                for text in render::describe(&result, &game) {
                    writeln!(output, "{text}")?;
                }
            }
            Err(e) => {
                debug!("command {line:?} rejected: {e}");
                error_line(output, e)?;
            }
        }
    }

    Ok(())
}
