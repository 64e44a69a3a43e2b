use std::io;

use clap::Parser;
use eyre::bail;
use log::{debug, info};

use crate::cli::Cli;
use crate::config_provider::ConfigProvider;

mod cli;
mod config_provider;
mod game;
mod interactive;
mod setup;


fn main() -> eyre::Result<()> {
    pretty_env_logger::init_timed();
    let cli = Cli::parse();
    debug!("Command line arguments: {cli:#?}");
    info!("AlphaZeta startup");

    let arguments = (cli.seed, cli.board_length, cli.containers);
    let provider: Box<dyn ConfigProvider> = match (&cli.config, arguments) {
        (Some(path), _) => config_provider::file_config_provider(path)?,
        (None, (Some(seed), Some(board_length), Some(containers))) => {
            config_provider::default_config_provider(seed, board_length, containers)
        }
        _ => bail!("either pass seed, board length and containers or a --config file"),
    };

    let config = provider.game_config();
    debug!("match configuration: {config:?}");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    interactive::interactive_main(&config, stdin.lock(), &mut stdout)
}
