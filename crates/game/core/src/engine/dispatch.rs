//! Mechanics dispatcher: fans battle events out to status hooks and passive
//! scripts.
use std::sync::Arc;

use super::Battle;
use crate::card::Trigger;
use crate::status::StatusContext;
use crate::unit::UnitId;

/// Battle events that reach a unit's statuses and passives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MechanicEvent {
    RoundStart,
    RoundEnd,
    Hit { amount: i32 },
    TakeDamage { amount: i32 },
    ClashWin,
    ClashLose,
}

impl MechanicEvent {
    const fn passive_trigger(self) -> Option<Trigger> {
        match self {
            Self::Hit { .. } => Some(Trigger::OnHit),
            Self::ClashWin => Some(Trigger::OnClashWin),
            Self::ClashLose => Some(Trigger::OnClashLose),
            Self::RoundStart | Self::RoundEnd | Self::TakeDamage { .. } => None,
        }
    }

    const fn amount(self) -> i32 {
        match self {
            Self::Hit { amount } | Self::TakeDamage { amount } => amount,
            _ => 0,
        }
    }
}

impl Battle {
    /// Runs every status hook for `event` on `unit`, then the unit's passive
    /// scripts. Dead units are skipped.
    pub fn trigger_mechanics(&mut self, unit: UnitId, event: MechanicEvent) {
        let registry = Arc::clone(&self.registry);
        let Some(owner) = self.units.get_mut(&unit) else {
            return;
        };
        if owner.is_dead() {
            return;
        }

        for (id, stacks) in owner.statuses.snapshot() {
            let status = registry.status(&id);
            let mut ctx = StatusContext {
                owner: &mut *owner,
                stacks,
                amount: event.amount(),
            };
            match event {
                MechanicEvent::RoundStart => status.on_round_start(&mut ctx),
                MechanicEvent::RoundEnd => status.on_round_end(&mut ctx),
                MechanicEvent::Hit { .. } => status.on_hit(&mut ctx),
                MechanicEvent::TakeDamage { .. } => status.on_take_damage(&mut ctx),
                MechanicEvent::ClashWin => status.on_clash_win(&mut ctx),
                MechanicEvent::ClashLose => status.on_clash_lose(&mut ctx),
            }
        }

        let Some(trigger) = event.passive_trigger() else {
            return;
        };
        let passives = owner.passives.clone();
        for passive_id in passives {
            let Some(passive) = registry.passive(&passive_id) else {
                continue;
            };
            self.run_scripts(passive.scripts_for(trigger), unit, None, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::ScriptCall;
    use crate::registry::ContentRegistry;
    use crate::stats::ResourceKind;
    use crate::status::builtin::ids;
    use crate::testing::battle_in;
    use crate::unit::PassiveDefinition;

    #[test]
    fn round_end_runs_status_hooks() {
        let mut battle = battle_in(ContentRegistry::builtin());
        battle.apply_status(UnitId(1), ids::BURN, 3, 2, 0);
        let before = battle.unit(UnitId(1)).expect("unit").pools.hp.current;

        battle.trigger_mechanics(UnitId(1), MechanicEvent::RoundEnd);
        assert_eq!(battle.unit(UnitId(1)).expect("unit").pools.hp.current, before - 3);
    }

    #[test]
    fn passive_scripts_follow_status_hooks() {
        let registry = ContentRegistry::builder()
            .with_builtins()
            .passive(PassiveDefinition::new("vigor").with_script(
                Trigger::OnClashWin,
                ScriptCall::new("heal").with("amount", 4),
            ))
            .build();
        let mut battle = battle_in(registry);
        battle.unit_mut(UnitId(1)).expect("unit").passives.push("vigor".into());
        battle.refresh_unit(UnitId(1));
        battle.unit_mut(UnitId(1)).expect("unit").lose(ResourceKind::Hp, 10);

        battle.trigger_mechanics(UnitId(1), MechanicEvent::ClashWin);
        let unit = battle.unit(UnitId(1)).expect("unit");
        assert_eq!(unit.pools.hp.max - unit.pools.hp.current, 6);
    }

    #[test]
    fn dead_units_receive_nothing() {
        let mut battle = battle_in(ContentRegistry::builtin());
        battle.apply_status(UnitId(1), ids::REGENERATION, 5, 2, 0);
        battle.unit_mut(UnitId(1)).expect("unit").lose(ResourceKind::Hp, 1_000);

        battle.trigger_mechanics(UnitId(1), MechanicEvent::RoundEnd);
        assert_eq!(battle.unit(UnitId(1)).expect("unit").pools.hp.current, 0);
    }
}
