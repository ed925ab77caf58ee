//! Combat-session operations used by the resolvers.
use std::sync::Arc;

use super::Battle;
use super::dispatch::MechanicEvent;
use super::scripts::ScriptContext;
use crate::card::{Card, DamageKind, Die, ScriptCall, Trigger};
use crate::combat::{
    ClashEffect, DamageInput, HitOutcome, RollContext, calculate_damage, scale_sp_damage,
    win_effect,
};
use crate::rng::context;
use crate::stats::{ResourceKind, Stat};
use crate::status::DamageDirection;
use crate::unit::UnitId;

impl Battle {
    /// Rolls `die` for `source` and runs every roll-time modifier: power
    /// stats, crits, status `on_roll` hooks and the die's `OnRoll` scripts.
    pub fn create_roll_context(
        &mut self,
        source: UnitId,
        target: Option<UnitId>,
        die: &Die,
        disadvantage: bool,
    ) -> RollContext {
        let mut base = self.roll(source, context::DIE_FACE, die.min, die.max);
        if disadvantage {
            base = base.min(self.roll(source, context::DISADVANTAGE, die.min, die.max));
        }

        let mut roll = RollContext::new(source, target, die.fresh(), base);
        roll.disadvantage = disadvantage;

        let registry = Arc::clone(&self.registry);
        let mut crit_chance = 0;
        if let Some(unit) = self.units.get(&source) {
            let modifiers = unit.modifiers();
            let stats = die.kind.power_stats();
            for stat in stats {
                roll.add_modifier(modifiers.get(stat).flat, stat.as_ref());
            }
            let combined = modifiers.combined(&stats);
            let percent_delta = combined.apply(base) - (base + combined.flat);
            roll.add_modifier(percent_delta, "power_percent");

            crit_chance = modifiers.get(Stat::CritChance).flat;

            for (id, stacks) in unit.statuses.active() {
                registry.status(id).on_roll(stacks, &mut roll);
            }
        }

        if crit_chance > 0 && self.roll(source, context::CRITICAL, 1, 100) <= crit_chance {
            roll.critical = true;
            roll.add_damage_percent(self.config.critical_bonus_percent);
        }

        self.run_scripts(die.scripts_for(Trigger::OnRoll), source, target, Some(&mut roll));

        tracing::trace!(
            unit = %source,
            kind = %die.kind,
            base,
            total = roll.value(),
            critical = roll.critical,
            "roll"
        );
        roll
    }

    /// Applies `roll`'s value as damage to its target on `resource`.
    /// HP hits carry side damage and fire the post-hit hooks.
    pub fn apply_damage(&mut self, roll: &RollContext, resource: ResourceKind) -> i32 {
        let Some(target) = roll.target else {
            return 0;
        };
        match resource {
            ResourceKind::Hp => self.strike(roll, target, roll.value()).damage,
            other => self.inflict(
                Some(roll.source),
                target,
                other,
                roll.value(),
                roll.die.kind.damage_kind(),
                roll.damage_multiplier,
            ),
        }
    }

    /// Applies the winner's effect (damage to the loser, or Stagger restored
    /// to the winner).
    pub fn resolve_clash_interaction(
        &mut self,
        winner: &RollContext,
        loser: &RollContext,
        difference: i32,
    ) -> HitOutcome {
        let (effect, _) = win_effect(&winner.summary(), &loser.summary(), difference);
        match effect {
            ClashEffect::Damage(amount) => self.strike(winner, loser.source, amount),
            ClashEffect::RestoreStagger(amount) => {
                let restored = self
                    .units
                    .get_mut(&winner.source)
                    .map_or(0, |unit| unit.restore(ResourceKind::Stagger, amount));
                HitOutcome {
                    stagger_restored: restored,
                    ..HitOutcome::default()
                }
            }
            ClashEffect::None => HitOutcome::default(),
        }
    }

    pub fn handle_clash_win(&mut self, roll: &RollContext) {
        self.trigger_mechanics(roll.source, MechanicEvent::ClashWin);
        self.run_scripts(
            roll.die.scripts_for(Trigger::OnClashWin),
            roll.source,
            roll.target,
            None,
        );
    }

    pub fn handle_clash_lose(&mut self, roll: &RollContext) {
        self.trigger_mechanics(roll.source, MechanicEvent::ClashLose);
        self.run_scripts(
            roll.die.scripts_for(Trigger::OnClashLose),
            roll.source,
            roll.target,
            None,
        );
    }

    pub fn handle_clash_draw(&mut self, roll: &RollContext) {
        self.run_scripts(
            roll.die.scripts_for(Trigger::OnClashDraw),
            roll.source,
            roll.target,
            None,
        );
    }

    /// Runs a card's own scripts for `trigger`.
    pub fn process_card_self_scripts(
        &mut self,
        trigger: Trigger,
        card: &Card,
        source: UnitId,
        target: Option<UnitId>,
    ) {
        self.run_scripts(card.scripts_for(trigger), source, target, None);
    }

    /// Adds a status now, or schedules it when `delay > 0`.
    pub fn apply_status(&mut self, unit: UnitId, status: &str, amount: i32, duration: u32, delay: u32) {
        let Some(target) = self.units.get_mut(&unit) else {
            return;
        };
        if delay > 0 {
            target.delayed.schedule(status, amount, duration, delay);
        } else {
            target.statuses.add(status, amount, duration);
            target.recompute(&self.registry, &self.config);
        }
        tracing::debug!(unit = %unit, status, amount, duration, delay, "status applied");
    }

    pub(crate) fn run_scripts(
        &mut self,
        calls: &[ScriptCall],
        source: UnitId,
        target: Option<UnitId>,
        mut roll: Option<&mut RollContext>,
    ) {
        for call in calls {
            let Some(script) = self.registry.script(&call.script) else {
                tracing::warn!(script = %call.script, "unknown script skipped");
                continue;
            };
            let mut ctx = ScriptContext {
                battle: self,
                source,
                target,
                roll: roll.as_deref_mut(),
            };
            script.run(&mut ctx, &call.params);
        }
    }

    /// HP hit with side damage and post-hit hooks.
    pub(crate) fn strike(&mut self, roll: &RollContext, target: UnitId, raw: i32) -> HitOutcome {
        if raw <= 0 {
            return HitOutcome::default();
        }
        let kind = roll.die.kind.damage_kind();
        let damage = self.inflict(
            Some(roll.source),
            target,
            ResourceKind::Hp,
            raw,
            kind,
            roll.damage_multiplier,
        );
        let stagger_damage = if self.config.side_damage && roll.die.kind.is_offensive() {
            self.inflict(
                Some(roll.source),
                target,
                ResourceKind::Stagger,
                raw,
                kind,
                roll.damage_multiplier,
            )
        } else {
            0
        };

        self.trigger_mechanics(target, MechanicEvent::TakeDamage { amount: damage });
        self.trigger_mechanics(roll.source, MechanicEvent::Hit { amount: damage });
        self.run_scripts(roll.die.scripts_for(Trigger::OnHit), roll.source, Some(target), None);

        HitOutcome {
            damage,
            stagger_damage,
            stagger_restored: 0,
        }
    }

    /// Full damage pipeline for one resource. Returns what the pool lost.
    pub(crate) fn inflict(
        &mut self,
        source: Option<UnitId>,
        target: UnitId,
        resource: ResourceKind,
        raw: i32,
        kind: Option<DamageKind>,
        multiplier: i32,
    ) -> i32 {
        if raw <= 0 {
            return 0;
        }
        let registry = Arc::clone(&self.registry);

        let (dealt_stat, taken_stat) = match resource {
            ResourceKind::Hp => (Stat::DamageDealt, Stat::DamageTaken),
            ResourceKind::Stagger => (Stat::StaggerDamageDealt, Stat::StaggerDamageTaken),
            ResourceKind::Sp => {
                let amount = scale_sp_damage(raw, multiplier);
                return self
                    .units
                    .get_mut(&target)
                    .map_or(0, |unit| unit.lose(ResourceKind::Sp, amount));
            }
        };

        let outgoing = source
            .and_then(|id| self.units.get(&id))
            .map_or(0, |attacker| {
                attacker.modifiers().get(dealt_stat).percentage
                    + attacker
                        .statuses
                        .active()
                        .map(|(id, stacks)| {
                            registry.status(id).damage_modifier_percent(
                                stacks,
                                resource,
                                DamageDirection::Outgoing,
                            )
                        })
                        .sum::<i32>()
            });

        let staggered_percent = self.config.staggered_damage_percent;
        let Some(unit) = self.units.get_mut(&target) else {
            return 0;
        };
        if unit.is_dead() {
            return 0;
        }

        let statuses = unit.statuses.snapshot();
        let incoming = unit.modifiers().get(taken_stat).percentage
            + statuses
                .iter()
                .map(|(id, stacks)| {
                    registry.status(id).damage_modifier_percent(
                        *stacks,
                        resource,
                        DamageDirection::Incoming,
                    )
                })
                .sum::<i32>();
        let resistance_percent = if resource == ResourceKind::Hp && unit.is_staggered() {
            staggered_percent
        } else {
            unit.resistances.get(resource, kind).percent()
        };
        let (flat_reduction, threshold) = if resource == ResourceKind::Hp {
            (
                unit.modifiers().get(Stat::DamageReduction).flat,
                unit.modifiers().get(Stat::DamageThreshold).flat,
            )
        } else {
            (0, 0)
        };

        let input = DamageInput {
            raw,
            resource,
            multiplier,
            outgoing_percent: outgoing,
            incoming_percent: incoming,
            resistance_percent,
            flat_reduction,
            threshold,
        };
        let breakdown = calculate_damage(&input, |damage| {
            statuses.iter().fold(damage, |acc, (id, stacks)| {
                registry.status(id).modify_incoming_damage(*stacks, resource, acc)
            })
        });

        let mut remaining = breakdown.final_amount;
        for (id, stacks) in &statuses {
            if remaining <= 0 {
                break;
            }
            let absorbed = registry
                .status(id)
                .absorb_damage(*stacks, resource, remaining)
                .clamp(0, remaining);
            if absorbed > 0 {
                unit.statuses.consume(id, absorbed);
                remaining -= absorbed;
            }
        }

        let dealt = unit.lose(resource, remaining);
        tracing::debug!(
            target = %target,
            %resource,
            raw,
            resisted = breakdown.resisted,
            absorbed = breakdown.final_amount - remaining,
            dealt,
            "damage"
        );
        dealt
    }
}

#[cfg(test)]
mod tests {
    use crate::card::{DiceKind, Die, ScriptCall, Trigger};
    use crate::stats::ResourceKind;
    use crate::status::builtin::ids;
    use crate::testing::{battle_with_units, fixed};
    use crate::unit::{Resistance, UnitId};

    #[test]
    fn roll_context_applies_power_statuses_and_scripts() {
        let mut battle = battle_with_units(Vec::new());
        battle.apply_status(UnitId(1), ids::STRENGTH, 2, 1, 0);

        let die = Die::fixed(DiceKind::Slash, 4)
            .with_script(Trigger::OnRoll, ScriptCall::new("power").with("amount", 3));
        let roll = battle.create_roll_context(UnitId(1), Some(UnitId(2)), &die, false);

        assert_eq!(roll.base, 4);
        assert_eq!(roll.value(), 9);
        let reasons: Vec<_> = roll.modifiers.iter().map(|m| m.reason.as_str()).collect();
        assert_eq!(reasons, ["strength", "power"]);
    }

    #[test]
    fn hp_hits_chip_stagger_and_respect_resistance() {
        let mut battle = battle_with_units(Vec::new());
        battle
            .unit_mut(UnitId(2))
            .expect("defender")
            .resistances
            .hp
            .slash = Resistance::Weak;

        let roll = battle.create_roll_context(UnitId(1), Some(UnitId(2)), &fixed(DiceKind::Slash, 10), false);
        let dealt = battle.apply_damage(&roll, ResourceKind::Hp);

        let defender = battle.unit(UnitId(2)).expect("defender");
        assert_eq!(dealt, 15);
        assert_eq!(defender.pools.hp.max - defender.pools.hp.current, 15);
        assert_eq!(defender.pools.stagger.max - defender.pools.stagger.current, 10);
    }

    #[test]
    fn staggered_targets_take_double_hp_damage() {
        let mut battle = battle_with_units(Vec::new());
        let defender = battle.unit_mut(UnitId(2)).expect("defender");
        let stagger = defender.pools.stagger.current;
        defender.lose(ResourceKind::Stagger, stagger);

        let roll = battle.create_roll_context(UnitId(1), Some(UnitId(2)), &fixed(DiceKind::Blunt, 6), false);
        assert_eq!(battle.apply_damage(&roll, ResourceKind::Hp), 12);
    }

    #[test]
    fn protection_and_barrier_reduce_then_absorb() {
        let mut battle = battle_with_units(Vec::new());
        battle.apply_status(UnitId(2), ids::PROTECTION, 2, 1, 0);
        battle.apply_status(UnitId(2), ids::BARRIER, 3, 2, 0);

        let roll = battle.create_roll_context(UnitId(1), Some(UnitId(2)), &fixed(DiceKind::Pierce, 8), false);
        // 8 - 2 protection = 6, barrier soaks 3
        assert_eq!(battle.apply_damage(&roll, ResourceKind::Hp), 3);
        assert!(!battle.unit(UnitId(2)).expect("defender").statuses.has(ids::BARRIER));
    }

    #[test]
    fn sp_damage_only_uses_the_multiplier() {
        let mut battle = battle_with_units(Vec::new());
        battle.apply_status(UnitId(2), ids::FRAGILE, 5, 1, 0);
        let mut roll = battle.create_roll_context(UnitId(1), Some(UnitId(2)), &fixed(DiceKind::Blunt, 4), false);
        roll.damage_multiplier = 150;
        assert_eq!(battle.apply_damage(&roll, ResourceKind::Sp), 6);
    }

    #[test]
    fn delayed_application_waits_in_queue() {
        let mut battle = battle_with_units(Vec::new());
        battle.apply_status(UnitId(1), ids::HASTE, 2, 1, 1);
        let unit = battle.unit(UnitId(1)).expect("unit");
        assert!(!unit.statuses.has(ids::HASTE));
        assert_eq!(unit.delayed.len(), 1);
    }
}
