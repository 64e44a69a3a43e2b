use std::collections::BTreeSet;

use crate::game::grid::Position;
use crate::game::module::{ActionToken, Module, ModuleKind};

/// Ships are identified by a single letter that never changes.
pub type ShipID = char;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ship {
    Collector {
        data: ShipData,
        containers: Vec<Module>,
    },
    Attacker {
        data: ShipData,
        modules: Vec<Module>,
        marked: bool,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ShipData {
    pub(crate) id: ShipID,
    pub(crate) position: Position,
    pub(crate) engine: Module,
}

impl ShipData {
    pub fn new(id: ShipID, position: Position) -> Self {
        ShipData {
            id,
            position,
            engine: Module::new(ModuleKind::Engine),
        }
    }
}

impl Ship {
    pub fn collector(id: ShipID, position: Position, containers: usize) -> Self {
        Ship::Collector {
            data: ShipData::new(id, position),
            containers: vec![Module::new(ModuleKind::Container); containers],
        }
    }

    pub fn attacker(id: ShipID, position: Position, modules: &[ModuleKind]) -> Self {
        Ship::Attacker {
            data: ShipData::new(id, position),
            modules: modules.iter().copied().map(Module::new).collect(),
            marked: false,
        }
    }

    fn data(&self) -> &ShipData {
        match self {
            Ship::Collector { data, .. } | Ship::Attacker { data, .. } => data,
        }
    }

    fn data_mut(&mut self) -> &mut ShipData {
        match self {
            Ship::Collector { data, .. } | Ship::Attacker { data, .. } => data,
        }
    }

    fn slots(&self) -> &[Module] {
        match self {
            Ship::Collector { containers, .. } => containers,
            Ship::Attacker { modules, .. } => modules,
        }
    }

    pub fn id(&self) -> ShipID {
        self.data().id
    }

    pub fn position(&self) -> Position {
        self.data().position
    }

    pub fn set_position(&mut self, position: Position) {
        self.data_mut().position = position;
    }

    pub fn is_collector(&self) -> bool {
        matches!(self, Ship::Collector { .. })
    }

    /// Intact modules in slot order, engine first.
    pub fn intact_modules(&self) -> Vec<Module> {
        let engine = self.data().engine;
        std::iter::once(engine)
            .chain(self.slots().iter().copied())
            .filter(|module| !module.is_destroyed())
            .collect()
    }

    /// Intact modules except the engine.
    pub fn intact_support_modules(&self) -> Vec<Module> {
        self.slots()
            .iter()
            .copied()
            .filter(|module| !module.is_destroyed())
            .collect()
    }

    /// Distinct kinds among the intact non-engine modules.
    pub fn intact_support_kinds(&self) -> BTreeSet<ModuleKind> {
        self.intact_support_modules()
            .iter()
            .map(Module::kind)
            .collect()
    }

    pub fn is_destroyed(&self) -> bool {
        self.intact_modules().is_empty()
    }

    pub fn has_module(&self, kind: ModuleKind) -> bool {
        self.intact_modules()
            .iter()
            .any(|module| module.kind() == kind)
    }

    /// Tokens the intact modules grant plus `Ramm`.
    pub fn action_tokens(&self) -> BTreeSet<ActionToken> {
        self.intact_modules()
            .iter()
            .filter_map(Module::action)
            .chain(std::iter::once(ActionToken::Ramm))
            .collect()
    }

    /// Destroys one intact module of the given kind.
    ///
    /// Engines are addressed directly. Collectors treat every other request as
    /// "drop one container", whatever kind was asked for, since containers are
    /// interchangeable; the last intact container goes first.
    /// Returns the kind that was actually destroyed.
    pub fn remove_module(&mut self, kind: ModuleKind) -> Option<ModuleKind> {
        if kind == ModuleKind::Engine {
            let engine = &mut self.data_mut().engine;
            if engine.is_destroyed() {
                return None;
            }
            engine.destroy();
            return Some(ModuleKind::Engine);
        }

        let target = match self {
            Ship::Collector { containers, .. } => containers
                .iter_mut()
                .rev()
                .find(|module| !module.is_destroyed()),
            Ship::Attacker { modules, .. } => modules
                .iter_mut()
                .find(|module| module.kind() == kind && !module.is_destroyed()),
        };

        target.map(|module| {
            module.destroy();
            module.kind()
        })
    }

    pub fn is_marked(&self) -> bool {
        match self {
            Ship::Collector { .. } => false,
            Ship::Attacker { marked, .. } => *marked,
        }
    }

    pub fn mark(&mut self) {
        if let Ship::Attacker { marked, .. } = self {
            *marked = true;
        }
    }

    pub fn clear_mark(&mut self) {
        if let Ship::Attacker { marked, .. } = self {
            *marked = false;
        }
    }

    pub fn contains_shield(&self) -> bool {
        match self {
            Ship::Collector { .. } => false,
            Ship::Attacker { .. } => self.has_module(ModuleKind::Shield),
        }
    }

    pub fn has_no_weapon(&self) -> bool {
        !self.intact_modules().iter().any(Module::is_weapon)
    }

    /// Force-destroys every module including the engine.
    pub fn destroy(&mut self) {
        self.data_mut().engine.destroy();
        match self {
            Ship::Collector { containers, .. } => containers.iter_mut().for_each(Module::destroy),
            Ship::Attacker { modules, marked, .. } => {
                modules.iter_mut().for_each(Module::destroy);
                *marked = false;
            }
        }
    }
}
