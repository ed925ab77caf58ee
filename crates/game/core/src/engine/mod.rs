//! Battle state and the combat-session surface.
//!
//! The [`Battle`] owns every unit taking part in a fight and is the only way
//! their state changes during a turn. Resolvers call back into it to roll
//! dice, apply damage and fire hooks; the scheduler in [`turns`] drives it one
//! turn at a time:
//!
//! ```text
//! begin_turn → assign_card* → resolve_turn → end_turn
//! ```

mod dispatch;
mod scripts;
mod session;
mod turns;

pub use dispatch::MechanicEvent;
pub use scripts::{Script, ScriptContext, builtin_scripts};
pub use turns::PendingAction;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::card::Card;
use crate::config::CombatConfig;
use crate::error::CombatError;
use crate::registry::ContentRegistry;
use crate::rng::{PcgRng, RngOracle, compute_seed};
use crate::unit::{Side, SlotRef, Unit, UnitId};

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Victory(Side),
    /// Nobody is left standing.
    Draw,
}

pub struct Battle {
    units: BTreeMap<UnitId, Unit>,
    registry: Arc<ContentRegistry>,
    config: CombatConfig,
    rng: Arc<dyn RngOracle>,
    seed: u64,
    nonce: u64,
    turn: u32,
    consumed: BTreeSet<SlotRef>,
}

impl Battle {
    pub fn new(registry: Arc<ContentRegistry>, config: CombatConfig, seed: u64) -> Self {
        Self {
            units: BTreeMap::new(),
            registry,
            config,
            rng: Arc::new(PcgRng),
            seed,
            nonce: 0,
            turn: 0,
            consumed: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    /// Adds a unit and runs its stat pipeline once.
    pub fn add_unit(&mut self, mut unit: Unit) -> Result<UnitId, CombatError> {
        if self.units.contains_key(&unit.id) {
            return Err(CombatError::DuplicateUnit(unit.id));
        }
        unit.recompute(&self.registry, &self.config);
        let id = unit.id;
        self.units.insert(id, unit);
        Ok(id)
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn unit_ids(&self) -> Vec<UnitId> {
        self.units.keys().copied().collect()
    }

    pub fn living(&self, side: Side) -> impl Iterator<Item = &Unit> {
        self.units
            .values()
            .filter(move |unit| unit.side == side && unit.is_alive())
    }

    pub fn is_alive(&self, id: UnitId) -> bool {
        self.units.get(&id).is_some_and(Unit::is_alive)
    }

    pub fn registry(&self) -> &Arc<ContentRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Winner once one side has no living units.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        let allies = self.living(Side::Ally).next().is_some();
        let enemies = self.living(Side::Enemy).next().is_some();
        match (allies, enemies) {
            (true, true) => None,
            (true, false) => Some(BattleOutcome::Victory(Side::Ally)),
            (false, true) => Some(BattleOutcome::Victory(Side::Enemy)),
            (false, false) => Some(BattleOutcome::Draw),
        }
    }

    pub fn is_consumed(&self, slot: SlotRef) -> bool {
        self.consumed.contains(&slot)
    }

    pub(crate) fn mark_consumed(&mut self, slot: SlotRef) {
        self.consumed.insert(slot);
        if let Some(entry) = self
            .units
            .get_mut(&slot.unit)
            .and_then(|unit| unit.slot_mut(slot.index))
        {
            entry.consumed = true;
        }
    }

    /// Card queued in `slot`, if any.
    pub fn slot_card(&self, slot: SlotRef) -> Option<Arc<Card>> {
        self.units
            .get(&slot.unit)
            .and_then(|unit| unit.slot(slot.index))
            .and_then(|entry| entry.card.clone())
    }

    /// Re-runs the stat pipeline for one unit.
    pub fn refresh_unit(&mut self, id: UnitId) {
        if let Some(unit) = self.units.get_mut(&id) {
            unit.recompute(&self.registry, &self.config);
        }
    }

    /// Deterministic roll in `[min, max]`; every call advances the nonce.
    pub(crate) fn roll(&mut self, unit: UnitId, context: u32, min: i32, max: i32) -> i32 {
        self.nonce += 1;
        let seed = compute_seed(self.seed, self.nonce, unit.0, context);
        self.rng.range(seed, min, max)
    }
}

impl core::fmt::Debug for Battle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Battle")
            .field("turn", &self.turn)
            .field("seed", &self.seed)
            .field("nonce", &self.nonce)
            .field("units", &self.units.len())
            .field("consumed", &self.consumed)
            .finish()
    }
}
