use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};

use crate::game::combat::{
    plan_loss, CombatAction, CombatReport, HitOutcome, LossPlan, LossResolution,
    PendingSelection, SelectionProgress,
};
use crate::game::dice::Dice;
use crate::game::grid::{Cell, Grid, Position};
use crate::game::module::{ActionToken, Module, ModuleKind};
use crate::game::registry::ActionRegistry;
use crate::game::ship::{Ship, ShipID};
use crate::game::side::{Fleet, Side, SideID};
use crate::game::{ActionValidationError, MatchSetupError};

const MOVE_MIN: i32 = 1;
const MOVE_MAX: i32 = 3;

/// The turn engine. Owns the board, both sides, the action registry and the
/// die; every rule check happens here before anything is changed.
#[derive(Debug)]
pub struct Match {
    grid: Grid,
    sides: [Side; 2],
    turn: u32,
    registry: ActionRegistry,
    dice: Box<dyn Dice>,
    pending: Option<PendingSelection>,
    winner: Option<SideID>,
}

impl Match {
    /// Sets up a match with Alpha attacking first. Every ship has to sit on
    /// exactly the grid cell its position names.
    pub fn new(
        grid: Grid,
        alpha: Fleet,
        zeta: Fleet,
        dice: impl Dice + 'static,
    ) -> Result<Self, MatchSetupError> {
        check_placement(&grid, &alpha, &zeta)?;

        let mut game = Match {
            grid,
            sides: [Side::new(SideID::Alpha, alpha), Side::new(SideID::Zeta, zeta)],
            turn: 0,
            registry: ActionRegistry::new(),
            dice: Box::new(dice),
            pending: None,
            winner: None,
        };
        game.start_turn();

        Ok(game)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn side(&self, side: SideID) -> &Side {
        &self.sides[side as usize]
    }

    fn side_mut(&mut self, side: SideID) -> &mut Side {
        &mut self.sides[side as usize]
    }

    /// Number of turns ended so far. Alpha attacks on even turns.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn attacking(&self) -> SideID {
        if self.turn % 2 == 0 {
            SideID::Alpha
        } else {
            SideID::Zeta
        }
    }

    pub fn defending(&self) -> SideID {
        self.attacking().opponent()
    }

    pub fn pending_selection(&self) -> Option<PendingSelection> {
        self.pending
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<SideID> {
        self.winner
    }

    pub fn find_ship(&self, ship_id: ShipID) -> Option<&Ship> {
        self.sides
            .iter()
            .find_map(|side| side.fleet().get(ship_id))
    }

    pub fn owner_of(&self, ship_id: ShipID) -> Option<SideID> {
        self.sides
            .iter()
            .find(|side| side.fleet().contains(ship_id))
            .map(Side::id)
    }

    fn ship_checked(&self, ship_id: ShipID) -> Result<(&Ship, SideID), ActionValidationError> {
        match (self.find_ship(ship_id), self.owner_of(ship_id)) {
            (Some(ship), Some(owner)) => Ok((ship, owner)),
            _ => Err(ActionValidationError::ShipNotFound { id: ship_id }),
        }
    }

    /// Actions the ship could use right now. Defending ships report what their
    /// intact modules would grant on their own turn.
    pub fn available_actions(
        &self,
        ship_id: ShipID,
    ) -> Result<BTreeSet<ActionToken>, ActionValidationError> {
        let (ship, owner) = self.ship_checked(ship_id)?;
        if ship.is_destroyed() {
            return Err(ActionValidationError::ShipAlreadyDestroyed { id: ship_id });
        }

        if owner == self.attacking() {
            Ok(self.registry.tokens(ship_id).cloned().unwrap_or_default())
        } else {
            Ok(ship.action_tokens())
        }
    }

    /// Rebuilds the registry for the attacking side. Destroyed ships get no entry.
    pub fn start_turn(&mut self) {
        self.registry.clear();

        let attacking = self.attacking();
        let entries: Vec<_> = self
            .side(attacking)
            .fleet()
            .ships()
            .filter(|ship| !ship.is_destroyed())
            .map(|ship| (ship.id(), ship.action_tokens()))
            .collect();

        for (ship_id, tokens) in entries {
            self.registry.insert(ship_id, tokens);
        }

        debug!("turn {} started for {}", self.turn, attacking);
    }

    /// Clears every mark, hands the attack to the other side and starts its turn.
    /// Returns the new attacker.
    pub fn end_turn(&mut self) -> Result<SideID, ActionValidationError> {
        self.ensure_running()?;

        self.sides
            .iter_mut()
            .for_each(|side| side.fleet_mut().clear_marks());
        self.turn += 1;
        self.start_turn();

        info!("{}'s turn", self.attacking());
        Ok(self.attacking())
    }

    fn ensure_running(&self) -> Result<(), ActionValidationError> {
        if self.winner.is_some() {
            return Err(ActionValidationError::GameOver);
        }
        if self.pending.is_some() {
            return Err(ActionValidationError::SelectionPending);
        }
        Ok(())
    }

    /// Checks that the ship belongs to the attacker, is alive and may still
    /// spend `token`. The granting module has to be intact as well.
    fn check_actor(
        &self,
        ship_id: ShipID,
        token: ActionToken,
    ) -> Result<&Ship, ActionValidationError> {
        let (ship, owner) = self.ship_checked(ship_id)?;
        if owner != self.attacking() {
            return Err(ActionValidationError::NotYourTurn);
        }
        if ship.is_destroyed() {
            return Err(ActionValidationError::ShipAlreadyDestroyed { id: ship_id });
        }
        if !self.registry.contains(ship_id, token)
            || token.granted_by().map_or(false, |kind| !ship.has_module(kind))
        {
            return Err(ActionValidationError::ActionUnavailable { token });
        }

        Ok(ship)
    }

    pub fn move_ship(&mut self, ship_id: ShipID, target: Position) -> Result<(), ActionValidationError> {
        self.relocate(ship_id, target, ActionToken::Move)
    }

    pub fn propel(&mut self, ship_id: ShipID, target: Position) -> Result<(), ActionValidationError> {
        self.relocate(ship_id, target, ActionToken::Propel)
    }

    fn relocate(
        &mut self,
        ship_id: ShipID,
        target: Position,
        token: ActionToken,
    ) -> Result<(), ActionValidationError> {
        self.ensure_running()?;
        let ship = self.check_actor(ship_id, token)?;
        let current = ship.position();
        let owner = self.attacking();

        let target_cell = self.grid.at(&target)?;
        if !(MOVE_MIN..=MOVE_MAX).contains(&current.distance(&target)) {
            return Err(ActionValidationError::OutOfRange);
        }
        if target_cell != Cell::Empty {
            return Err(ActionValidationError::TargetOccupied);
        }

        self.grid.move_ship(ship_id, &current, &target)?;
        self.side_mut(owner).fleet_mut().move_ship(ship_id, target);
        self.registry.consume(ship_id, token);

        debug!("{ship_id} {token} {current} -> {target}");
        Ok(())
    }

    /// `acting` spends its sensor to mark the enemy attacker `target`.
    pub fn mark(&mut self, target: ShipID, acting: ShipID) -> Result<(), ActionValidationError> {
        self.ensure_running()?;
        self.check_actor(acting, ActionToken::Mark)?;
        let (target_ship, target_owner) = self.ship_checked(target)?;

        if target_ship.is_destroyed() {
            return Err(ActionValidationError::ShipAlreadyDestroyed { id: target });
        }
        if target_owner == self.attacking() {
            return Err(ActionValidationError::FriendlyFire);
        }
        if target_ship.is_collector() {
            return Err(ActionValidationError::CollectorTargeted);
        }

        self.registry.consume(acting, ActionToken::Mark);
        self.side_mut(target_owner).fleet_mut().mark(target);

        debug!("{acting} marked {target}");
        Ok(())
    }

    /// Removes one module from whichever side owns the ship. Collectors drop a
    /// container for any non-engine request. Returns the kind that was removed.
    pub fn remove_module(
        &mut self,
        kind: ModuleKind,
        ship_id: ShipID,
    ) -> Result<Option<ModuleKind>, ActionValidationError> {
        let (_, owner) = self.ship_checked(ship_id)?;
        let removed = self.side_mut(owner).fleet_mut().remove_module(ship_id, kind);

        if let Some(kind) = removed {
            info!("{ship_id} looses {kind}");
        }
        self.clear_if_destroyed(ship_id);
        self.update_winner();

        Ok(removed)
    }

    /// Takes the ship off the board and destroys every module it has left.
    pub fn destroy_ship(&mut self, ship_id: ShipID) -> Result<(), ActionValidationError> {
        let (ship, owner) = self.ship_checked(ship_id)?;
        let position = ship.position();

        if self.grid.at(&position) == Ok(Cell::Occupied(ship_id)) {
            self.grid.clear(&position)?;
        }
        self.side_mut(owner).fleet_mut().destroy_ship(ship_id);

        info!("{ship_id} was destroyed");
        self.update_winner();
        Ok(())
    }

    fn clear_if_destroyed(&mut self, ship_id: ShipID) -> bool {
        let Some(ship) = self.find_ship(ship_id) else {
            return false;
        };
        if !ship.is_destroyed() {
            return false;
        }

        let position = ship.position();
        if self.grid.at(&position) == Ok(Cell::Occupied(ship_id)) {
            let _ = self.grid.clear(&position);
            info!("{ship_id} was destroyed");
        }
        true
    }

    pub fn roll_die(&mut self) -> u8 {
        self.dice.roll()
    }

    /// Cover bonus for the defender: the cover value of its neighbour on the
    /// side facing the attacker. Row and column are judged separately, so a
    /// diagonal attacker gets the larger of up to two neighbours.
    pub fn calculate_cover(&self, attacker: Position, defender: Position) -> u8 {
        let Position { row, column } = defender;
        [
            (attacker.row < row, Position::new(row - 1, column)),
            (attacker.row > row, Position::new(row + 1, column)),
            (attacker.column < column, Position::new(row, column - 1)),
            (attacker.column > column, Position::new(row, column + 1)),
        ]
        .iter()
        .filter(|(faces_attacker, _)| *faces_attacker)
        .filter_map(|(_, neighbour)| self.grid.cover_at(neighbour))
        .max()
        .unwrap_or(0)
    }

    pub fn ramm(&mut self, attacker: ShipID, defender: ShipID) -> Result<CombatReport, ActionValidationError> {
        self.attack(CombatAction::Ramm, attacker, defender)
    }

    pub fn strike(&mut self, attacker: ShipID, defender: ShipID) -> Result<CombatReport, ActionValidationError> {
        self.attack(CombatAction::Strike, attacker, defender)
    }

    pub fn long_shot(
        &mut self,
        attacker: ShipID,
        defender: ShipID,
    ) -> Result<CombatReport, ActionValidationError> {
        self.attack(CombatAction::LongShot, attacker, defender)
    }

    fn validate_attack(
        &self,
        action: CombatAction,
        attacker_id: ShipID,
        defender_id: ShipID,
    ) -> Result<(), ActionValidationError> {
        self.ensure_running()?;

        let (attacker, attacker_owner) = self.ship_checked(attacker_id)?;
        let (defender, defender_owner) = self.ship_checked(defender_id)?;

        if attacker_owner != self.attacking() {
            return Err(ActionValidationError::NotYourTurn);
        }
        if attacker.is_destroyed() {
            return Err(ActionValidationError::ShipAlreadyDestroyed { id: attacker_id });
        }
        if defender.is_destroyed() {
            return Err(ActionValidationError::ShipAlreadyDestroyed { id: defender_id });
        }
        if defender_owner == attacker_owner {
            return Err(ActionValidationError::FriendlyFire);
        }

        self.check_actor(attacker_id, action.token())?;

        if !action.in_range(attacker.position().distance(&defender.position())) {
            return Err(ActionValidationError::OutOfRange);
        }

        if action == CombatAction::Ramm {
            if defender.is_collector() {
                return Err(ActionValidationError::CollectorTargeted);
            }
            if !attacker.has_no_weapon() {
                return Err(ActionValidationError::ActionUnavailable {
                    token: ActionToken::Ramm,
                });
            }
        }

        Ok(())
    }

    fn attack(
        &mut self,
        action: CombatAction,
        attacker_id: ShipID,
        defender_id: ShipID,
    ) -> Result<CombatReport, ActionValidationError> {
        self.validate_attack(action, attacker_id, defender_id)?;

        let (attacker, _) = self.ship_checked(attacker_id)?;
        let (defender, _) = self.ship_checked(defender_id)?;
        let attacker_position = attacker.position();
        let defender_position = defender.position();
        let shield = u8::from(defender.contains_shield());
        let marked = defender.is_marked();

        let roll = self.roll_die();
        let modifier = self.calculate_cover(attacker_position, defender_position) + shield;
        let effective = i32::from(roll) - i32::from(modifier);
        let outcome = action.outcome(attacker_id, defender_id, marked, effective);

        debug!("{attacker_id} {action} {defender_id}: roll {roll}, bonus -{modifier}, {outcome:?}");

        self.registry.consume(attacker_id, action.token());

        let resolution = match outcome {
            HitOutcome::Miss => None,
            HitOutcome::Hit { loser, modules, .. } => Some(self.resolve_loss(loser, modules)?),
        };
        self.update_winner();

        Ok(CombatReport {
            action,
            attacker: attacker_id,
            defender: defender_id,
            roll,
            modifier,
            effective,
            outcome,
            resolution,
            winner: self.winner,
        })
    }

    /// Applies the module-loss policy to `loser`, or parks the choice in a
    /// pending selection for its owner.
    fn resolve_loss(
        &mut self,
        loser: ShipID,
        count: u8,
    ) -> Result<LossResolution, ActionValidationError> {
        let (ship, owner) = self.ship_checked(loser)?;

        match plan_loss(ship, count) {
            LossPlan::DestroyShip => {
                let lost = ship.intact_modules().iter().map(Module::kind).collect();
                self.destroy_ship(loser)?;
                Ok(LossResolution::Destroyed { ship: loser, lost })
            }
            LossPlan::Remove(kinds) => {
                let fleet = self.side_mut(owner).fleet_mut();
                let lost: Vec<_> = kinds
                    .into_iter()
                    .filter_map(|kind| fleet.remove_module(loser, kind))
                    .collect();
                lost.iter().for_each(|kind| info!("{loser} looses {kind}"));

                if self.clear_if_destroyed(loser) {
                    Ok(LossResolution::Destroyed { ship: loser, lost })
                } else {
                    Ok(LossResolution::Removed { ship: loser, lost })
                }
            }
            LossPlan::Select => {
                let pending = PendingSelection {
                    ship: loser,
                    side: owner,
                    remaining: count,
                };
                info!("{owner} must select {count} of {loser}'s modules");
                self.pending = Some(pending);
                Ok(LossResolution::Pending(pending))
            }
        }
    }

    /// Resolves one step of a pending module choice. The kind has to be a
    /// non-engine module the ship still holds; anything else is rejected and
    /// the choice stays open.
    pub fn select_module(&mut self, kind: ModuleKind) -> Result<SelectionProgress, ActionValidationError> {
        if self.winner.is_some() {
            return Err(ActionValidationError::GameOver);
        }
        let pending = self.pending.ok_or(ActionValidationError::NoSelectionPending)?;
        let (ship, owner) = self.ship_checked(pending.ship)?;

        if kind == ModuleKind::Engine || !ship.intact_support_kinds().contains(&kind) {
            return Err(ActionValidationError::InvalidModuleSelection);
        }

        let lost = self
            .side_mut(owner)
            .fleet_mut()
            .remove_module(pending.ship, kind)
            .ok_or(ActionValidationError::InvalidModuleSelection)?;
        info!("{} looses {lost}", pending.ship);

        let destroyed = self.clear_if_destroyed(pending.ship);
        let remaining = pending.remaining.saturating_sub(1);

        if remaining == 0 || destroyed {
            self.pending = None;
            self.update_winner();
            Ok(SelectionProgress::Complete {
                ship: pending.ship,
                lost,
                destroyed,
                winner: self.winner,
            })
        } else {
            self.pending = Some(PendingSelection {
                remaining,
                ..pending
            });
            Ok(SelectionProgress::Remaining {
                ship: pending.ship,
                lost,
                remaining,
            })
        }
    }

    /// The defender losing its collector hands the win to the attacker; only
    /// otherwise can the attacker's own loss decide the match.
    fn update_winner(&mut self) {
        if self.winner.is_some() {
            return;
        }

        let attacking = self.attacking();
        let defending = self.defending();
        self.winner = if self.side(defending).has_lost() {
            Some(attacking)
        } else if self.side(attacking).has_lost() {
            Some(defending)
        } else {
            None
        };

        if let Some(winner) = self.winner {
            info!("{winner} won!");
        }
    }
}

fn check_placement(grid: &Grid, alpha: &Fleet, zeta: &Fleet) -> Result<(), MatchSetupError> {
    let mut ships: BTreeMap<ShipID, &Ship> = BTreeMap::new();
    for ship in alpha.ships().chain(zeta.ships()) {
        if ships.insert(ship.id(), ship).is_some() {
            return Err(MatchSetupError::DuplicateIdentity(ship.id()));
        }
    }

    let mut placed = BTreeMap::new();
    for (position, id) in grid.occupants() {
        if !ships.contains_key(&id) {
            return Err(MatchSetupError::UnknownShip(id));
        }
        if placed.insert(id, position).is_some() {
            return Err(MatchSetupError::ShipPlacedTwice(id));
        }
    }

    for (id, ship) in &ships {
        if !grid.contains(&ship.position()) {
            return Err(MatchSetupError::ShipOutOfBounds(*id));
        }
        match placed.get(id) {
            Some(position) if *position == ship.position() => {}
            None if ship.is_destroyed() => {}
            _ => return Err(MatchSetupError::ShipNotPlaced(*id)),
        }
    }

    Ok(())
}
