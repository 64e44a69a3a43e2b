//! Combat resolution: range rules, the outcome table and the module-loss policy.
//!
//! Everything here is a pure function of ship state and the effective roll; the
//! match applies the results.

use std::fmt::{Display, Formatter};

use crate::game::module::{ActionToken, Module, ModuleKind};
use crate::game::ship::{Ship, ShipID};
use crate::game::side::SideID;

const STRIKE_RANGE: i32 = 1;
const RAMM_RANGE: i32 = 1;
const LONGSHOT_MIN: i32 = 5;
const LONGSHOT_MAX: i32 = 6;

const RAMM_BACKFIRE_MAX: i32 = 1;
const RAMM_HIT_MIN: i32 = 5;
const NORMAL_HIT_MIN: i32 = 2;
const NORMAL_HIT_MAX: i32 = 3;
const STRIKE_CRITICAL_MIN: i32 = 4;
const LONGSHOT_HEAVY_MAX: i32 = 5;
const LONGSHOT_CRITICAL_MIN: i32 = 6;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CombatAction {
    Ramm,
    Strike,
    LongShot,
}

impl CombatAction {
    pub fn token(&self) -> ActionToken {
        match self {
            CombatAction::Ramm => ActionToken::Ramm,
            CombatAction::Strike => ActionToken::Strike,
            CombatAction::LongShot => ActionToken::LongShot,
        }
    }

    /// Range rule on the Manhattan distance between attacker and defender.
    pub fn in_range(&self, distance: i32) -> bool {
        match self {
            CombatAction::Ramm => distance == RAMM_RANGE,
            CombatAction::Strike => distance == STRIKE_RANGE,
            CombatAction::LongShot => (LONGSHOT_MIN..=LONGSHOT_MAX).contains(&distance),
        }
    }

    /// Maps a modified roll to its outcome. A marked defender always takes the
    /// maximal damage of strikes and long shots.
    pub fn outcome(
        &self,
        attacker: ShipID,
        defender: ShipID,
        defender_marked: bool,
        effective: i32,
    ) -> HitOutcome {
        let hit = |loser: ShipID, modules: u8, notice: HitNotice| HitOutcome::Hit {
            loser,
            modules,
            notice,
        };

        match self {
            CombatAction::Ramm => match effective {
                e if e <= RAMM_BACKFIRE_MAX => hit(attacker, 1, HitNotice::Normal),
                e if e >= RAMM_HIT_MIN => hit(defender, 1, HitNotice::Normal),
                _ => HitOutcome::Miss,
            },
            CombatAction::Strike => match effective {
                _ if defender_marked => hit(defender, 1, HitNotice::Marked),
                e if (NORMAL_HIT_MIN..=NORMAL_HIT_MAX).contains(&e) => {
                    hit(defender, 1, HitNotice::Normal)
                }
                e if e >= STRIKE_CRITICAL_MIN => hit(defender, 1, HitNotice::Critical),
                _ => HitOutcome::Miss,
            },
            CombatAction::LongShot => match effective {
                _ if defender_marked => hit(defender, 2, HitNotice::Marked),
                e if (NORMAL_HIT_MIN..=NORMAL_HIT_MAX).contains(&e) => {
                    hit(defender, 1, HitNotice::Normal)
                }
                e if (NORMAL_HIT_MAX + 1..=LONGSHOT_HEAVY_MAX).contains(&e) => {
                    hit(defender, 2, HitNotice::Normal)
                }
                e if e >= LONGSHOT_CRITICAL_MIN => hit(defender, 2, HitNotice::Critical),
                _ => HitOutcome::Miss,
            },
        }
    }
}

impl Display for CombatAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// How a hit is announced; the damage is the same.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HitNotice {
    Normal,
    Critical,
    Marked,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HitOutcome {
    Miss,
    Hit {
        loser: ShipID,
        modules: u8,
        notice: HitNotice,
    },
}

/// What to do with a ship that has to give up `count` modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LossPlan {
    DestroyShip,
    Remove(Vec<ModuleKind>),
    Select,
}

pub fn plan_loss(ship: &Ship, count: u8) -> LossPlan {
    let count = usize::from(count);
    let intact = ship.intact_modules().len();

    if intact <= count {
        return LossPlan::DestroyShip;
    }

    let support = ship.intact_support_modules();
    if intact == count + 1 {
        return LossPlan::Remove(support.iter().map(Module::kind).collect());
    }

    if ship.is_collector() {
        return LossPlan::Remove(vec![ModuleKind::Container; count]);
    }

    let kinds = ship.intact_support_kinds();
    match kinds.iter().next() {
        Some(kind) if kinds.len() == 1 => LossPlan::Remove(vec![*kind; count]),
        _ => LossPlan::Select,
    }
}

/// `side` still has to pick `remaining` modules of `ship` to destroy.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PendingSelection {
    pub ship: ShipID,
    pub side: SideID,
    pub remaining: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LossResolution {
    /// The ship lost everything and left the board.
    Destroyed { ship: ShipID, lost: Vec<ModuleKind> },
    Removed { ship: ShipID, lost: Vec<ModuleKind> },
    Pending(PendingSelection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatReport {
    pub action: CombatAction,
    pub attacker: ShipID,
    pub defender: ShipID,
    pub roll: u8,
    pub modifier: u8,
    pub effective: i32,
    pub outcome: HitOutcome,
    pub resolution: Option<LossResolution>,
    pub winner: Option<SideID>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionProgress {
    Remaining {
        ship: ShipID,
        lost: ModuleKind,
        remaining: u8,
    },
    Complete {
        ship: ShipID,
        lost: ModuleKind,
        destroyed: bool,
        winner: Option<SideID>,
    },
}
