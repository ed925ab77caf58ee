//! Status effect engine.
//!
//! A status is a stateless policy object looked up by id in the
//! [`crate::registry::ContentRegistry`]. Per-unit state (stack instances,
//! durations, the delayed queue) lives in [`StatusStacks`] and
//! [`DelayedQueue`] on the unit.
//!
//! Hooks receive the current stack total. Hooks that mutate the owner get a
//! [`StatusContext`]; pure modifiers (`modify_incoming_damage`,
//! `damage_modifier_percent`, ...) just return a value.

pub mod builtin;
pub mod stacks;

pub use stacks::{DelayedQueue, DelayedStatus, StatusStack, StatusStacks};

use crate::combat::RollContext;
use crate::stats::{ModifierMap, ResourceKind};
use crate::unit::{Capabilities, Unit};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StatusPolarity {
    Buff,
    Debuff,
    Neutral,
}

/// Which side of a hit a damage percentage applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DamageDirection {
    /// Status is on the attacker.
    Outgoing,
    /// Status is on the target.
    Incoming,
}

/// Mutable view handed to owner-mutating hooks.
pub struct StatusContext<'a> {
    pub owner: &'a mut Unit,
    /// Current stack total of the status being dispatched.
    pub stacks: i32,
    /// Event payload (damage dealt / taken); zero when not applicable.
    pub amount: i32,
}

pub trait StatusEffect: Send + Sync {
    fn id(&self) -> &str;

    fn polarity(&self) -> StatusPolarity {
        StatusPolarity::Neutral
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }

    fn on_roll(&self, _stacks: i32, _roll: &mut RollContext) {}

    fn on_hit(&self, _ctx: &mut StatusContext<'_>) {}

    fn on_clash_win(&self, _ctx: &mut StatusContext<'_>) {}

    fn on_clash_lose(&self, _ctx: &mut StatusContext<'_>) {}

    fn on_round_start(&self, _ctx: &mut StatusContext<'_>) {}

    fn on_round_end(&self, _ctx: &mut StatusContext<'_>) {}

    fn on_take_damage(&self, _ctx: &mut StatusContext<'_>) {}

    /// Flat adjustment of incoming damage after resistance.
    fn modify_incoming_damage(&self, _stacks: i32, _resource: ResourceKind, damage: i32) -> i32 {
        damage
    }

    /// Portion of `damage` soaked up. The dispatcher consumes that many
    /// stacks of this status.
    fn absorb_damage(&self, _stacks: i32, _resource: ResourceKind, _damage: i32) -> i32 {
        0
    }

    fn damage_modifier_percent(
        &self,
        _stacks: i32,
        _resource: ResourceKind,
        _direction: DamageDirection,
    ) -> i32 {
        0
    }

    fn on_calculate_stats(&self, _stacks: i32, _modifiers: &mut ModifierMap) {}
}

/// Stand-in for unknown status ids. Every hook is a no-op.
#[derive(Clone, Debug)]
pub struct InertStatus {
    id: String,
}

impl InertStatus {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl StatusEffect for InertStatus {
    fn id(&self) -> &str {
        &self.id
    }
}
