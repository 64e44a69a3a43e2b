use std::fmt::{Display, Formatter};

use crate::game::grid::Position;
use crate::game::module::ModuleKind;
use crate::game::ship::{Ship, ShipID};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SideID {
    Alpha,
    Zeta,
}

impl SideID {
    pub fn opponent(&self) -> SideID {
        match self {
            SideID::Alpha => SideID::Zeta,
            SideID::Zeta => SideID::Alpha,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SideID::Alpha => "Alpha",
            SideID::Zeta => "Zeta",
        }
    }
}

impl Display for SideID {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One collector and three attackers, fixed at setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    collector: Ship,
    attackers: [Ship; 3],
}

impl Fleet {
    /// Returns `None` unless `collector` is a collector and all `attackers` are attackers.
    pub fn new(collector: Ship, attackers: [Ship; 3]) -> Option<Self> {
        if !collector.is_collector() || attackers.iter().any(Ship::is_collector) {
            return None;
        }

        Some(Fleet {
            collector,
            attackers,
        })
    }

    pub fn collector(&self) -> &Ship {
        &self.collector
    }

    pub fn attackers(&self) -> &[Ship; 3] {
        &self.attackers
    }

    /// Collector first, then the attackers in creation order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> + '_ {
        std::iter::once(&self.collector).chain(self.attackers.iter())
    }

    fn ships_mut(&mut self) -> impl Iterator<Item = &mut Ship> + '_ {
        std::iter::once(&mut self.collector).chain(self.attackers.iter_mut())
    }

    pub fn contains(&self, ship_id: ShipID) -> bool {
        self.get(ship_id).is_some()
    }

    pub fn get(&self, ship_id: ShipID) -> Option<&Ship> {
        self.ships().find(|ship| ship.id() == ship_id)
    }

    pub(crate) fn get_mut(&mut self, ship_id: ShipID) -> Option<&mut Ship> {
        self.ships_mut().find(|ship| ship.id() == ship_id)
    }

    // The fleet-level mutators silently ignore unknown identities; name
    // resolution errors are reported by the match.

    pub(crate) fn move_ship(&mut self, ship_id: ShipID, position: Position) {
        if let Some(ship) = self.get_mut(ship_id) {
            ship.set_position(position);
        }
    }

    pub(crate) fn remove_module(&mut self, ship_id: ShipID, kind: ModuleKind) -> Option<ModuleKind> {
        self.get_mut(ship_id).and_then(|ship| ship.remove_module(kind))
    }

    pub(crate) fn mark(&mut self, ship_id: ShipID) {
        if let Some(ship) = self.get_mut(ship_id) {
            ship.mark();
        }
    }

    pub(crate) fn clear_marks(&mut self) {
        self.ships_mut().for_each(Ship::clear_mark);
    }

    pub(crate) fn destroy_ship(&mut self, ship_id: ShipID) {
        if let Some(ship) = self.get_mut(ship_id) {
            ship.destroy();
        }
    }
}

/// A player and the fleet it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Side {
    id: SideID,
    fleet: Fleet,
}

impl Side {
    pub fn new(id: SideID, fleet: Fleet) -> Self {
        Side { id, fleet }
    }

    pub fn id(&self) -> SideID {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub(crate) fn fleet_mut(&mut self) -> &mut Fleet {
        &mut self.fleet
    }

    /// A side loses as soon as its collector is gone.
    pub fn has_lost(&self) -> bool {
        self.fleet.collector().is_destroyed()
    }
}
