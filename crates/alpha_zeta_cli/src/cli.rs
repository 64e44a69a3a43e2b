use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "AlphaZeta",
    version,
    about = "Turn-based tactical combat between the Alpha and Zeta fleets",
    propagate_version = true,
    allow_negative_numbers = true
)]
pub(crate) struct Cli {
    /// Seed of the match die
    pub(crate) seed: Option<i64>,

    /// Edge length of the square board, odd and at least 5
    pub(crate) board_length: Option<usize>,

    /// Number of containers of each collector, 0 to 3
    pub(crate) containers: Option<usize>,

    /// YAML match configuration, replaces the positional arguments
    #[arg(short, long, conflicts_with_all = ["seed", "board_length", "containers"])]
    pub(crate) config: Option<PathBuf>,
}
