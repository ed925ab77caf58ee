//! Combat units.
//!
//! A single concrete [`Unit`] owns all per-unit state. Behaviour lives in the
//! stat pipeline, the status engine and the resolvers, which operate on this
//! state through the [`crate::engine::Battle`].

pub mod cooldown;
pub mod mechanics;
pub mod passive;
pub mod resist;
pub mod slot;

use std::collections::VecDeque;

use arrayvec::ArrayVec;

pub use cooldown::Cooldowns;
pub use mechanics::{Capabilities, MechanicsProvider};
pub use passive::PassiveDefinition;
pub use resist::{Resistance, ResistanceTable, Resistances};
pub use slot::{Slot, SlotRef};

use crate::card::{CardId, Die};
use crate::config::CombatConfig;
use crate::registry::ContentRegistry;
use crate::stats::{
    Attributes, Bonus, DerivedStats, ModifierMap, Pools, ResourceKind, Skills, Stat,
    compute_derived,
};
use crate::status::{DelayedQueue, StatusStacks};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UnitId(pub u32);

impl core::fmt::Display for UnitId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    pub const fn opposite(self) -> Self {
        match self {
            Self::Ally => Self::Enemy,
            Self::Enemy => Self::Ally,
        }
    }
}

pub type Slots = ArrayVec<Slot, { CombatConfig::MAX_SPEED_DICE }>;

#[derive(Clone, Debug)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub side: Side,
    pub level: u32,
    pub rank: u32,

    pub attributes: Attributes,
    pub skills: Skills,
    /// Base maxima before the stat pipeline.
    pub max_hp: i32,
    pub max_sp: i32,
    pub max_stagger: i32,
    pub pools: Pools,
    pub resistances: Resistances,

    pub statuses: StatusStacks,
    pub delayed: DelayedQueue,
    pub cooldowns: Cooldowns,

    pub slots: Slots,
    pub stored_dice: VecDeque<Die>,
    pub counter_dice: VecDeque<Die>,

    pub passives: Vec<String>,
    pub equipment: Vec<Bonus>,
    pub deck: Vec<CardId>,

    /// Turn ends left before a staggered unit recovers.
    pub stagger_recovery: Option<u32>,
    pub derived: DerivedStats,
}

impl Unit {
    pub const DEFAULT_MAX_HP: i32 = 60;
    pub const DEFAULT_MAX_SP: i32 = 45;
    pub const DEFAULT_MAX_STAGGER: i32 = 30;

    pub fn new(id: UnitId, name: impl Into<String>, side: Side) -> Self {
        Self {
            id,
            name: name.into(),
            side,
            level: 1,
            rank: 1,
            attributes: Attributes::new(),
            skills: Skills::new(),
            max_hp: Self::DEFAULT_MAX_HP,
            max_sp: Self::DEFAULT_MAX_SP,
            max_stagger: Self::DEFAULT_MAX_STAGGER,
            pools: Pools::new(
                Self::DEFAULT_MAX_HP,
                Self::DEFAULT_MAX_SP,
                Self::DEFAULT_MAX_STAGGER,
            ),
            resistances: Resistances::default(),
            statuses: StatusStacks::new(),
            delayed: DelayedQueue::new(),
            cooldowns: Cooldowns::new(),
            slots: Slots::new(),
            stored_dice: VecDeque::new(),
            counter_dice: VecDeque::new(),
            passives: Vec::new(),
            equipment: Vec::new(),
            deck: Vec::new(),
            stagger_recovery: None,
            derived: DerivedStats::default(),
        }
    }

    /// Sets base maxima and fills every pool.
    #[must_use]
    pub fn with_pools(mut self, max_hp: i32, max_sp: i32, max_stagger: i32) -> Self {
        self.max_hp = max_hp;
        self.max_sp = max_sp;
        self.max_stagger = max_stagger;
        self.pools = Pools::new(max_hp, max_sp, max_stagger);
        self
    }

    #[must_use]
    pub fn with_resistances(mut self, resistances: Resistances) -> Self {
        self.resistances = resistances;
        self
    }

    #[must_use]
    pub fn with_deck(mut self, deck: impl IntoIterator<Item = CardId>) -> Self {
        self.deck = deck.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_passive(mut self, passive: impl Into<String>) -> Self {
        self.passives.push(passive.into());
        self
    }

    /// Re-runs the stat pipeline and re-clamps pools to the new maxima.
    pub fn recompute(&mut self, registry: &ContentRegistry, config: &CombatConfig) {
        self.derived = compute_derived(self, registry, config);
        let DerivedStats {
            max_hp,
            max_sp,
            max_stagger,
            ..
        } = self.derived;
        self.pools.set_maxima(max_hp, max_sp, max_stagger);
    }

    /// Recomputes and starts every pool fresh, for units entering play.
    pub fn recompute_fresh(&mut self, registry: &ContentRegistry, config: &CombatConfig) {
        self.recompute(registry, config);
        self.pools.refill();
    }

    pub fn modifiers(&self) -> &ModifierMap {
        &self.derived.modifiers
    }

    pub fn is_dead(&self) -> bool {
        self.pools.hp.is_depleted() || self.pools.sp.is_depleted()
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    pub fn is_staggered(&self) -> bool {
        self.pools.stagger.is_depleted()
    }

    /// Alive, not staggered and not prevented from acting.
    pub fn can_act(&self) -> bool {
        self.is_alive() && !self.is_staggered() && !self.has(Capabilities::CANNOT_ACT)
    }

    /// May draw stored / counter reserve dice right now.
    pub fn can_use_reserves(&self) -> bool {
        self.is_alive() && (!self.is_staggered() || self.has(Capabilities::COUNTER_WHILE_STAGGERED))
    }

    /// Direct pool loss, bypassing the damage pipeline.
    pub fn lose(&mut self, resource: ResourceKind, amount: i32) -> i32 {
        self.pools.get_mut(resource).lose(amount)
    }

    pub fn restore(&mut self, resource: ResourceKind, amount: i32) -> i32 {
        self.pools.get_mut(resource).gain(amount)
    }

    /// HP healing scaled by the `healing` stat.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let amount = self.modifiers().modified_value(amount, Stat::Healing);
        self.restore(ResourceKind::Hp, amount)
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index)
    }

    pub fn slot_ref(&self, index: usize) -> SlotRef {
        SlotRef::new(self.id, index)
    }

    /// Copies of `card` in the deck. An empty deck is unrestricted (one copy
    /// of anything).
    pub fn deck_copies(&self, card: &CardId) -> usize {
        if self.deck.is_empty() {
            return 1;
        }
        self.deck.iter().filter(|entry| *entry == card).count()
    }

    /// Copies of `card` currently queued into slots.
    pub fn assigned_copies(&self, card: &CardId) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.card.as_ref().is_some_and(|c| &c.id == card))
            .count()
    }

    pub fn is_card_available(&self, card: &CardId) -> bool {
        self.cooldowns.cooling(card) + self.assigned_copies(card) < self.deck_copies(card)
    }
}

impl MechanicsProvider for Unit {
    fn capabilities(&self) -> Capabilities {
        self.derived.capabilities
    }
}
