use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// Everything a ship can be built from. Engines and containers are fixed by the
/// ship type, the rest is picked when a fleet is configured.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleKind {
    Engine,
    Container,
    RailGun,
    Sword,
    Propulsion,
    Sensor,
    Shield,
}

impl ModuleKind {
    /// Modules a player may choose for an attacker.
    pub const SELECTABLE: [ModuleKind; 5] = [
        ModuleKind::Propulsion,
        ModuleKind::RailGun,
        ModuleKind::Sensor,
        ModuleKind::Shield,
        ModuleKind::Sword,
    ];

    pub fn action(&self) -> Option<ActionToken> {
        match self {
            ModuleKind::Engine => Some(ActionToken::Move),
            ModuleKind::Propulsion => Some(ActionToken::Propel),
            ModuleKind::Sensor => Some(ActionToken::Mark),
            ModuleKind::RailGun => Some(ActionToken::LongShot),
            ModuleKind::Sword => Some(ActionToken::Strike),
            ModuleKind::Container | ModuleKind::Shield => None,
        }
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self, ModuleKind::RailGun | ModuleKind::Sword)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModuleKind::Engine => "ENGINE",
            ModuleKind::Container => "CONTAINER",
            ModuleKind::RailGun => "RAILGUN",
            ModuleKind::Sword => "SWORD",
            ModuleKind::Propulsion => "PROPULSION",
            ModuleKind::Sensor => "SENSOR",
            ModuleKind::Shield => "SHIELD",
        }
    }
}

impl Display for ModuleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown module {0}")]
pub struct UnknownModule(pub String);

impl FromStr for ModuleKind {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ENGINE" => Ok(ModuleKind::Engine),
            "CONTAINER" => Ok(ModuleKind::Container),
            "RAILGUN" => Ok(ModuleKind::RailGun),
            "SWORD" => Ok(ModuleKind::Sword),
            "PROPULSION" => Ok(ModuleKind::Propulsion),
            "SENSOR" => Ok(ModuleKind::Sensor),
            "SHIELD" => Ok(ModuleKind::Shield),
            other => Err(UnknownModule(other.to_string())),
        }
    }
}

/// Per-turn action a ship may spend. All but `Ramm` are granted by a module.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionToken {
    Move,
    Propel,
    Mark,
    LongShot,
    Strike,
    Ramm,
}

impl ActionToken {
    /// The module whose presence grants this token, `None` for `Ramm`.
    pub fn granted_by(&self) -> Option<ModuleKind> {
        match self {
            ActionToken::Move => Some(ModuleKind::Engine),
            ActionToken::Propel => Some(ModuleKind::Propulsion),
            ActionToken::Mark => Some(ModuleKind::Sensor),
            ActionToken::LongShot => Some(ModuleKind::RailGun),
            ActionToken::Strike => Some(ModuleKind::Sword),
            ActionToken::Ramm => None,
        }
    }
}

impl Display for ActionToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ActionToken::Move => "MOVE",
            ActionToken::Propel => "PROPEL",
            ActionToken::Mark => "MARK",
            ActionToken::LongShot => "LONGSHOT",
            ActionToken::Strike => "STRIKE",
            ActionToken::Ramm => "RAMM",
        })
    }
}

/// A single module slot. Destroyed modules stay in their slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Module {
    kind: ModuleKind,
    destroyed: bool,
}

impl Module {
    pub fn new(kind: ModuleKind) -> Self {
        Module {
            kind,
            destroyed: false,
        }
    }

    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    pub fn action(&self) -> Option<ActionToken> {
        self.kind.action()
    }

    pub fn is_weapon(&self) -> bool {
        self.kind.is_weapon()
    }
}

impl From<ModuleKind> for Module {
    fn from(kind: ModuleKind) -> Self {
        Module::new(kind)
    }
}
