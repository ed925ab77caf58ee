//! Persisted unit records.
//!
//! A [`UnitRecord`] is the serde-facing shape of a [`Unit`]: plain data, cards
//! by id, pools as current values. Derived stats are never stored; they are
//! recomputed through the registry when the record is turned back into a
//! unit.
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::card::{CardId, Die};
use crate::config::CombatConfig;
use crate::registry::ContentRegistry;
use crate::stats::{Attributes, Bonus, Skills};
use crate::status::{DelayedQueue, StatusStacks};
use crate::unit::{Cooldowns, Resistances, Side, Slot, SlotRef, Unit, UnitId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    pub speed: i32,
    #[serde(default)]
    pub card: Option<CardId>,
    #[serde(default)]
    pub target: Option<SlotRef>,
    #[serde(default)]
    pub speed_break: bool,
    #[serde(default)]
    pub consumed: bool,
}

impl SlotRecord {
    pub fn from_slot(slot: &Slot) -> Self {
        Self {
            speed: slot.speed,
            card: slot.card.as_ref().map(|card| card.id.clone()),
            target: slot.target,
            speed_break: slot.speed_break,
            consumed: slot.consumed,
        }
    }

    /// Rehydrates the slot. Unknown cards come back as inert placeholders.
    pub fn into_slot(self, registry: &ContentRegistry) -> Slot {
        let mut slot = Slot::new(self.speed);
        if let Some(card) = self.card {
            slot.assign(registry.card(&card), self.target, self.speed_break);
        }
        slot.consumed = self.consumed;
        slot
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnitRecord {
    pub id: UnitId,
    pub name: String,
    pub side: Side,
    #[serde(default = "one")]
    pub level: u32,
    #[serde(default = "one")]
    pub rank: u32,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub skills: Skills,
    pub max_hp: i32,
    pub max_sp: i32,
    pub max_stagger: i32,
    pub hp: i32,
    pub sp: i32,
    pub stagger: i32,
    #[serde(default)]
    pub resistances: Resistances,
    #[serde(default)]
    pub statuses: StatusStacks,
    #[serde(default)]
    pub delayed: DelayedQueue,
    #[serde(default)]
    pub cooldowns: Cooldowns,
    #[serde(default)]
    pub slots: Vec<SlotRecord>,
    #[serde(default)]
    pub stored_dice: VecDeque<Die>,
    #[serde(default)]
    pub counter_dice: VecDeque<Die>,
    #[serde(default)]
    pub passives: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<Bonus>,
    #[serde(default)]
    pub deck: Vec<CardId>,
    #[serde(default)]
    pub stagger_recovery: Option<u32>,
}

const fn one() -> u32 {
    1
}

impl UnitRecord {
    pub fn from_unit(unit: &Unit) -> Self {
        Self {
            id: unit.id,
            name: unit.name.clone(),
            side: unit.side,
            level: unit.level,
            rank: unit.rank,
            attributes: unit.attributes.clone(),
            skills: unit.skills.clone(),
            max_hp: unit.max_hp,
            max_sp: unit.max_sp,
            max_stagger: unit.max_stagger,
            hp: unit.pools.hp.current,
            sp: unit.pools.sp.current,
            stagger: unit.pools.stagger.current,
            resistances: unit.resistances,
            statuses: unit.statuses.clone(),
            delayed: unit.delayed.clone(),
            cooldowns: unit.cooldowns.clone(),
            slots: unit.slots.iter().map(SlotRecord::from_slot).collect(),
            stored_dice: unit.stored_dice.clone(),
            counter_dice: unit.counter_dice.clone(),
            passives: unit.passives.clone(),
            equipment: unit.equipment.clone(),
            deck: unit.deck.clone(),
            stagger_recovery: unit.stagger_recovery,
        }
    }

    /// Rebuilds the unit, recomputing derived stats and clamping the stored
    /// pool values to the recomputed maxima.
    pub fn into_unit(self, registry: &ContentRegistry, config: &CombatConfig) -> Unit {
        let mut unit = Unit::new(self.id, self.name, self.side)
            .with_pools(self.max_hp, self.max_sp, self.max_stagger)
            .with_resistances(self.resistances);
        unit.level = self.level;
        unit.rank = self.rank;
        unit.attributes = self.attributes;
        unit.skills = self.skills;
        unit.statuses = self.statuses;
        unit.delayed = self.delayed;
        unit.cooldowns = self.cooldowns;
        unit.stored_dice = self.stored_dice;
        unit.counter_dice = self.counter_dice;
        unit.passives = self.passives;
        unit.equipment = self.equipment;
        unit.deck = self.deck;
        unit.stagger_recovery = self.stagger_recovery;

        if self.slots.len() > CombatConfig::MAX_SPEED_DICE {
            tracing::warn!(
                unit = %unit.id,
                slots = self.slots.len(),
                "persisted slots beyond the speed-dice limit dropped"
            );
        }
        unit.slots = self
            .slots
            .into_iter()
            .take(CombatConfig::MAX_SPEED_DICE)
            .map(|slot| slot.into_slot(registry))
            .collect();

        unit.recompute(registry, config);
        unit.pools.hp.set_current(self.hp);
        unit.pools.sp.set_current(self.sp);
        unit.pools.stagger.set_current(self.stagger);
        unit
    }
}
