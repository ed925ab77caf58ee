//! Built-in statuses registered by [`crate::registry::RegistryBuilder::with_builtins`].
use std::sync::Arc;

use super::{DamageDirection, StatusContext, StatusEffect, StatusPolarity};
use crate::combat::RollContext;
use crate::stats::{ModifierMap, ResourceKind, Stat};
use crate::unit::Capabilities;

pub mod ids {
    pub const STRENGTH: &str = "strength";
    pub const ENDURANCE: &str = "endurance";
    pub const FEEBLE: &str = "feeble";
    pub const DISARM: &str = "disarm";
    pub const HASTE: &str = "haste";
    pub const BIND: &str = "bind";
    pub const PROTECTION: &str = "protection";
    pub const STAGGER_PROTECTION: &str = "stagger_protection";
    pub const FRAGILE: &str = "fragile";
    pub const DAMAGE_UP: &str = "damage_up";
    pub const BARRIER: &str = "barrier";
    pub const BURN: &str = "burn";
    pub const BLEED: &str = "bleed";
    pub const REGENERATION: &str = "regeneration";
    pub const PARALYSIS: &str = "paralysis";
    pub const POISE: &str = "poise";
    pub const MOMENTUM: &str = "momentum";
    pub const ENRAGE: &str = "enrage";
    pub const SPEED_BREAK_IMMUNITY: &str = "speed_break_immunity";
    pub const STUN: &str = "stun";
}

pub fn builtin_statuses() -> Vec<Arc<dyn StatusEffect>> {
    vec![
        Arc::new(RollPower::new(ids::STRENGTH, 1, true)),
        Arc::new(RollPower::new(ids::ENDURANCE, 1, false)),
        Arc::new(RollPower::new(ids::FEEBLE, -1, true)),
        Arc::new(RollPower::new(ids::DISARM, -1, false)),
        Arc::new(SpeedShift::new(ids::HASTE, 1)),
        Arc::new(SpeedShift::new(ids::BIND, -1)),
        Arc::new(FlatGuard::new(ids::PROTECTION, ResourceKind::Hp)),
        Arc::new(FlatGuard::new(ids::STAGGER_PROTECTION, ResourceKind::Stagger)),
        Arc::new(DamagePercent::new(ids::FRAGILE, DamageDirection::Incoming)),
        Arc::new(DamagePercent::new(ids::DAMAGE_UP, DamageDirection::Outgoing)),
        Arc::new(Barrier),
        Arc::new(Burn),
        Arc::new(Bleed),
        Arc::new(Regeneration),
        Arc::new(Paralysis),
        Arc::new(Poise),
        Arc::new(Momentum),
        Arc::new(Enrage),
        Arc::new(CapabilityGrant::new(
            ids::SPEED_BREAK_IMMUNITY,
            StatusPolarity::Buff,
            Capabilities::SPEED_BREAK_IMMUNE,
        )),
        Arc::new(CapabilityGrant::new(
            ids::STUN,
            StatusPolarity::Debuff,
            Capabilities::CANNOT_ACT,
        )),
    ]
}

const fn polarity_of(sign: i32) -> StatusPolarity {
    if sign >= 0 {
        StatusPolarity::Buff
    } else {
        StatusPolarity::Debuff
    }
}

/// ± stacks on offensive (or defensive) die rolls.
struct RollPower {
    id: &'static str,
    sign: i32,
    offensive: bool,
}

impl RollPower {
    const fn new(id: &'static str, sign: i32, offensive: bool) -> Self {
        Self {
            id,
            sign,
            offensive,
        }
    }
}

impl StatusEffect for RollPower {
    fn id(&self) -> &str {
        self.id
    }

    fn polarity(&self) -> StatusPolarity {
        polarity_of(self.sign)
    }

    fn on_roll(&self, stacks: i32, roll: &mut RollContext) {
        if roll.die.kind.is_offensive() == self.offensive {
            roll.add_modifier(self.sign * stacks, self.id);
        }
    }
}

/// ± stacks speed on every speed die.
struct SpeedShift {
    id: &'static str,
    sign: i32,
}

impl SpeedShift {
    const fn new(id: &'static str, sign: i32) -> Self {
        Self { id, sign }
    }
}

impl StatusEffect for SpeedShift {
    fn id(&self) -> &str {
        self.id
    }

    fn polarity(&self) -> StatusPolarity {
        polarity_of(self.sign)
    }

    fn on_calculate_stats(&self, stacks: i32, modifiers: &mut ModifierMap) {
        modifiers.add_flat(Stat::Speed, self.sign * stacks);
    }
}

/// Reduces incoming damage on one resource by the stack total.
struct FlatGuard {
    id: &'static str,
    resource: ResourceKind,
}

impl FlatGuard {
    const fn new(id: &'static str, resource: ResourceKind) -> Self {
        Self { id, resource }
    }
}

impl StatusEffect for FlatGuard {
    fn id(&self) -> &str {
        self.id
    }

    fn polarity(&self) -> StatusPolarity {
        StatusPolarity::Buff
    }

    fn modify_incoming_damage(&self, stacks: i32, resource: ResourceKind, damage: i32) -> i32 {
        if resource == self.resource {
            damage - stacks
        } else {
            damage
        }
    }
}

/// +10% damage per stack, on HP and Stagger.
struct DamagePercent {
    id: &'static str,
    direction: DamageDirection,
}

impl DamagePercent {
    const PER_STACK: i32 = 10;

    const fn new(id: &'static str, direction: DamageDirection) -> Self {
        Self { id, direction }
    }
}

impl StatusEffect for DamagePercent {
    fn id(&self) -> &str {
        self.id
    }

    fn polarity(&self) -> StatusPolarity {
        match self.direction {
            DamageDirection::Outgoing => StatusPolarity::Buff,
            DamageDirection::Incoming => StatusPolarity::Debuff,
        }
    }

    fn damage_modifier_percent(
        &self,
        stacks: i32,
        resource: ResourceKind,
        direction: DamageDirection,
    ) -> i32 {
        if direction == self.direction && resource != ResourceKind::Sp {
            stacks * Self::PER_STACK
        } else {
            0
        }
    }
}

/// Soaks HP damage; each absorbed point spends one stack.
struct Barrier;

impl StatusEffect for Barrier {
    fn id(&self) -> &str {
        ids::BARRIER
    }

    fn polarity(&self) -> StatusPolarity {
        StatusPolarity::Buff
    }

    fn absorb_damage(&self, stacks: i32, resource: ResourceKind, damage: i32) -> i32 {
        if resource == ResourceKind::Hp {
            stacks.min(damage).max(0)
        } else {
            0
        }
    }
}

struct Burn;

impl StatusEffect for Burn {
    fn id(&self) -> &str {
        ids::BURN
    }

    fn polarity(&self) -> StatusPolarity {
        StatusPolarity::Debuff
    }

    fn on_round_end(&self, ctx: &mut StatusContext<'_>) {
        let lost = ctx.owner.lose(ResourceKind::Hp, ctx.stacks);
        tracing::debug!(unit = %ctx.owner.id, lost, "burn");
    }
}

/// Striking costs HP; a third of the stacks (rounded up) wear off per hit.
struct Bleed;

impl StatusEffect for Bleed {
    fn id(&self) -> &str {
        ids::BLEED
    }

    fn polarity(&self) -> StatusPolarity {
        StatusPolarity::Debuff
    }

    fn on_hit(&self, ctx: &mut StatusContext<'_>) {
        let lost = ctx.owner.lose(ResourceKind::Hp, ctx.stacks);
        ctx.owner.statuses.consume(ids::BLEED, (ctx.stacks + 2) / 3);
        tracing::debug!(unit = %ctx.owner.id, lost, "bleed");
    }
}

struct Regeneration;

impl StatusEffect for Regeneration {
    fn id(&self) -> &str {
        ids::REGENERATION
    }

    fn polarity(&self) -> StatusPolarity {
        StatusPolarity::Buff
    }

    fn on_round_end(&self, ctx: &mut StatusContext<'_>) {
        ctx.owner.heal(ctx.stacks);
    }
}

/// Every die rolls its minimum face.
struct Paralysis;

impl StatusEffect for Paralysis {
    fn id(&self) -> &str {
        ids::PARALYSIS
    }

    fn polarity(&self) -> StatusPolarity {
        StatusPolarity::Debuff
    }

    fn on_roll(&self, _stacks: i32, roll: &mut RollContext) {
        let min = roll.die.min;
        if roll.base > min {
            roll.override_base(min, ids::PARALYSIS);
        }
    }
}

/// +5% critical chance per stack.
struct Poise;

impl StatusEffect for Poise {
    fn id(&self) -> &str {
        ids::POISE
    }

    fn polarity(&self) -> StatusPolarity {
        StatusPolarity::Buff
    }

    fn on_calculate_stats(&self, stacks: i32, modifiers: &mut ModifierMap) {
        modifiers.add_flat(Stat::CritChance, stacks * 5);
    }
}

/// Winning a clash grants one strength next turn.
struct Momentum;

impl StatusEffect for Momentum {
    fn id(&self) -> &str {
        ids::MOMENTUM
    }

    fn polarity(&self) -> StatusPolarity {
        StatusPolarity::Buff
    }

    fn on_clash_win(&self, ctx: &mut StatusContext<'_>) {
        ctx.owner.delayed.schedule(ids::STRENGTH, 1, 1, 1);
    }
}

/// Taking damage grants one strength next turn.
struct Enrage;

impl StatusEffect for Enrage {
    fn id(&self) -> &str {
        ids::ENRAGE
    }

    fn polarity(&self) -> StatusPolarity {
        StatusPolarity::Buff
    }

    fn on_take_damage(&self, ctx: &mut StatusContext<'_>) {
        if ctx.amount > 0 {
            ctx.owner.delayed.schedule(ids::STRENGTH, 1, 1, 1);
        }
    }
}

struct CapabilityGrant {
    id: &'static str,
    polarity: StatusPolarity,
    capabilities: Capabilities,
}

impl CapabilityGrant {
    const fn new(id: &'static str, polarity: StatusPolarity, capabilities: Capabilities) -> Self {
        Self {
            id,
            polarity,
            capabilities,
        }
    }
}

impl StatusEffect for CapabilityGrant {
    fn id(&self) -> &str {
        self.id
    }

    fn polarity(&self) -> StatusPolarity {
        self.polarity
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{DiceKind, Die};
    use crate::testing::unit;
    use crate::unit::{Side, UnitId};

    fn find(id: &str) -> Arc<dyn StatusEffect> {
        builtin_statuses()
            .into_iter()
            .find(|status| status.id() == id)
            .expect("builtin registered")
    }

    #[test]
    fn every_builtin_id_is_registered_once() {
        let statuses = builtin_statuses();
        let mut seen: Vec<&str> = statuses.iter().map(|status| status.id()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), statuses.len());
        assert_eq!(statuses.len(), 20);
    }

    #[test]
    fn roll_power_only_touches_matching_dice() {
        let strength = find(ids::STRENGTH);
        let mut slash = RollContext::new(UnitId(1), None, Die::fixed(DiceKind::Slash, 4), 4);
        let mut block = RollContext::new(UnitId(1), None, Die::fixed(DiceKind::Block, 4), 4);
        strength.on_roll(2, &mut slash);
        strength.on_roll(2, &mut block);
        assert_eq!(slash.value(), 6);
        assert_eq!(block.value(), 4);

        let disarm = find(ids::DISARM);
        disarm.on_roll(3, &mut block);
        assert_eq!(block.value(), 1);
        assert_eq!(disarm.polarity(), StatusPolarity::Debuff);
    }

    #[test]
    fn paralysis_pins_roll_to_minimum() {
        let mut roll = RollContext::new(UnitId(1), None, Die::new(DiceKind::Pierce, 2, 8), 7);
        find(ids::PARALYSIS).on_roll(1, &mut roll);
        assert_eq!(roll.base, 2);
        assert_eq!(roll.value(), 2);
        assert_eq!(roll.modifiers[0].amount, -5);
    }

    #[test]
    fn guards_and_percentages_respect_resource() {
        let protection = find(ids::PROTECTION);
        assert_eq!(protection.modify_incoming_damage(3, ResourceKind::Hp, 10), 7);
        assert_eq!(protection.modify_incoming_damage(3, ResourceKind::Stagger, 10), 10);

        let fragile = find(ids::FRAGILE);
        assert_eq!(
            fragile.damage_modifier_percent(2, ResourceKind::Hp, DamageDirection::Incoming),
            20
        );
        assert_eq!(
            fragile.damage_modifier_percent(2, ResourceKind::Hp, DamageDirection::Outgoing),
            0
        );

        let barrier = find(ids::BARRIER);
        assert_eq!(barrier.absorb_damage(5, ResourceKind::Hp, 3), 3);
        assert_eq!(barrier.absorb_damage(5, ResourceKind::Hp, 9), 5);
        assert_eq!(barrier.absorb_damage(5, ResourceKind::Stagger, 9), 0);
    }

    #[test]
    fn round_end_hooks_mutate_owner() {
        let mut owner = unit(1, Side::Ally);
        let start = owner.pools.hp.current;

        let mut ctx = StatusContext {
            owner: &mut owner,
            stacks: 4,
            amount: 0,
        };
        find(ids::BURN).on_round_end(&mut ctx);
        assert_eq!(owner.pools.hp.current, start - 4);

        let mut ctx = StatusContext {
            owner: &mut owner,
            stacks: 3,
            amount: 0,
        };
        find(ids::REGENERATION).on_round_end(&mut ctx);
        assert_eq!(owner.pools.hp.current, start - 1);
    }

    #[test]
    fn bleed_costs_hp_and_decays_on_hit() {
        let mut owner = unit(1, Side::Ally);
        owner.statuses.add(ids::BLEED, 6, 3);
        let start = owner.pools.hp.current;

        let mut ctx = StatusContext {
            owner: &mut owner,
            stacks: 6,
            amount: 5,
        };
        find(ids::BLEED).on_hit(&mut ctx);
        assert_eq!(owner.pools.hp.current, start - 6);
        assert_eq!(owner.statuses.total(ids::BLEED), 4);
    }

    #[test]
    fn enrage_schedules_strength_only_when_hurt() {
        let mut owner = unit(1, Side::Ally);
        let enrage = find(ids::ENRAGE);

        enrage.on_take_damage(&mut StatusContext {
            owner: &mut owner,
            stacks: 1,
            amount: 0,
        });
        assert!(owner.delayed.is_empty());

        enrage.on_take_damage(&mut StatusContext {
            owner: &mut owner,
            stacks: 1,
            amount: 4,
        });
        assert_eq!(owner.delayed.pending()[0].status, ids::STRENGTH);
    }
}
