use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use eyre::WrapErr;
use serde::Deserialize;

use alpha_zeta_common::ShipID;

pub const MIN_BOARD_LENGTH: usize = 5;
pub const MAX_CONTAINERS: usize = 3;

/// Everything needed to set up a match. Loadouts and layout are optional; the
/// console asks for whatever is missing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    pub seed: i64,
    pub board_length: usize,
    pub containers: usize,
    #[serde(default)]
    pub loadouts: BTreeMap<ShipID, String>,
    #[serde(default)]
    pub layout: Option<String>,
}

impl GameConfig {
    pub fn new(seed: i64, board_length: usize, containers: usize) -> Self {
        GameConfig {
            seed,
            board_length,
            containers,
            loadouts: BTreeMap::new(),
            layout: None,
        }
    }

    /// Odd board of at least 5 tiles per edge, at most 3 containers.
    pub fn is_valid(&self) -> bool {
        self.board_length >= MIN_BOARD_LENGTH
            && self.board_length % 2 == 1
            && self.containers <= MAX_CONTAINERS
    }

    pub fn loadout(&self, ship_id: ShipID) -> Option<&str> {
        self.loadouts
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(&ship_id))
            .map(|(_, loadout)| loadout.as_str())
    }
}

pub trait ConfigProvider {
    fn game_config(&self) -> GameConfig;
}

mod default {
    use crate::config_provider::{ConfigProvider, GameConfig};

    /// Match parameters taken from the command line.
    pub struct ArgumentGameConfig {
        pub(super) seed: i64,
        pub(super) board_length: usize,
        pub(super) containers: usize,
    }

    impl ConfigProvider for ArgumentGameConfig {
        fn game_config(&self) -> GameConfig {
            GameConfig::new(self.seed, self.board_length, self.containers)
        }
    }
}

mod yaml {
    use crate::config_provider::{ConfigProvider, GameConfig};

    pub struct YamlGameConfig {
        pub(super) config: GameConfig,
    }

    impl ConfigProvider for YamlGameConfig {
        fn game_config(&self) -> GameConfig {
            self.config.clone()
        }
    }
}

pub fn default_config_provider(
    seed: i64,
    board_length: usize,
    containers: usize,
) -> Box<dyn ConfigProvider> {
    Box::new(default::ArgumentGameConfig {
        seed,
        board_length,
        containers,
    })
}

pub fn yaml_config_provider(reader: impl Read) -> eyre::Result<Box<dyn ConfigProvider>> {
    let config: GameConfig =
        serde_yaml::from_reader(reader).wrap_err("malformed match configuration")?;
    Ok(Box::new(yaml::YamlGameConfig { config }))
}

pub fn file_config_provider(path: &Path) -> eyre::Result<Box<dyn ConfigProvider>> {
    let file = File::open(path)
        .wrap_err_with(|| format!("unable to open match configuration {}", path.display()))?;
    yaml_config_provider(file)
}
