use std::collections::{BTreeMap, BTreeSet};

use crate::game::module::ActionToken;
use crate::game::ship::ShipID;

/// Tokens each ship of the attacking side may still spend this turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRegistry {
    playables: BTreeMap<ShipID, BTreeSet<ActionToken>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.playables.clear();
    }

    pub fn insert(&mut self, ship_id: ShipID, tokens: BTreeSet<ActionToken>) {
        self.playables.insert(ship_id, tokens);
    }

    pub fn contains(&self, ship_id: ShipID, token: ActionToken) -> bool {
        self.playables
            .get(&ship_id)
            .map_or(false, |tokens| tokens.contains(&token))
    }

    /// Removes `token` from the ship's entry. Returns whether it was present.
    pub fn consume(&mut self, ship_id: ShipID, token: ActionToken) -> bool {
        self.playables
            .get_mut(&ship_id)
            .map_or(false, |tokens| tokens.remove(&token))
    }

    pub fn tokens(&self, ship_id: ShipID) -> Option<&BTreeSet<ActionToken>> {
        self.playables.get(&ship_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ShipID, &BTreeSet<ActionToken>)> {
        self.playables.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.playables.is_empty()
    }
}
