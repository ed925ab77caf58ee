//! Named card / die / passive scripts.
//!
//! Content refers to scripts by id plus a small parameter table (see
//! [`ScriptCall`](crate::card::ScriptCall)). The registry maps ids to
//! [`Script`] objects; unknown ids are skipped at dispatch time.
use std::sync::Arc;

use super::Battle;
use crate::card::ScriptParams;
use crate::combat::RollContext;
use crate::stats::ResourceKind;
use crate::unit::UnitId;

/// What a running script may touch.
pub struct ScriptContext<'a> {
    pub battle: &'a mut Battle,
    pub source: UnitId,
    pub target: Option<UnitId>,
    /// Present for `on_roll` scripts only.
    pub roll: Option<&'a mut RollContext>,
}

impl ScriptContext<'_> {
    /// Unit named by the `target` param (`"self"` or `"target"`).
    fn recipient(&self, params: &ScriptParams, default_target: bool) -> Option<UnitId> {
        match params.text("target") {
            Some("self") => Some(self.source),
            Some("target") => self.target,
            _ if default_target => self.target,
            _ => Some(self.source),
        }
    }
}

pub trait Script: Send + Sync {
    fn id(&self) -> &str;

    fn run(&self, ctx: &mut ScriptContext<'_>, params: &ScriptParams);
}

pub fn builtin_scripts() -> Vec<Arc<dyn Script>> {
    vec![
        Arc::new(Power),
        Arc::new(DamageMultiplier),
        Arc::new(ApplyStatus),
        Arc::new(Heal),
        Arc::new(RecoverStagger),
        Arc::new(StaggerDamage),
        Arc::new(SpDamage),
    ]
}

/// `power { amount }`: adds to the current roll.
struct Power;

impl Script for Power {
    fn id(&self) -> &str {
        "power"
    }

    fn run(&self, ctx: &mut ScriptContext<'_>, params: &ScriptParams) {
        if let Some(roll) = ctx.roll.as_deref_mut() {
            roll.add_modifier(params.int("amount", 0), "power");
        }
    }
}

/// `damage_multiplier { percent }`: scales this die's damage.
struct DamageMultiplier;

impl Script for DamageMultiplier {
    fn id(&self) -> &str {
        "damage_multiplier"
    }

    fn run(&self, ctx: &mut ScriptContext<'_>, params: &ScriptParams) {
        if let Some(roll) = ctx.roll.as_deref_mut() {
            roll.add_damage_percent(params.int("percent", 0));
        }
    }
}

/// `apply_status { status, amount, duration, delay, target }`.
struct ApplyStatus;

impl Script for ApplyStatus {
    fn id(&self) -> &str {
        "apply_status"
    }

    fn run(&self, ctx: &mut ScriptContext<'_>, params: &ScriptParams) {
        let Some(status) = params.text("status") else {
            tracing::warn!("apply_status without a status id");
            return;
        };
        let Some(unit) = ctx.recipient(params, false) else {
            return;
        };
        let amount = params.int("amount", 1);
        let duration = params.int("duration", 1).max(1).unsigned_abs();
        let delay = params.int("delay", 0).max(0).unsigned_abs();
        ctx.battle.apply_status(unit, status, amount, duration, delay);
    }
}

struct Heal;

impl Script for Heal {
    fn id(&self) -> &str {
        "heal"
    }

    fn run(&self, ctx: &mut ScriptContext<'_>, params: &ScriptParams) {
        let Some(unit) = ctx.recipient(params, false) else {
            return;
        };
        if let Some(unit) = ctx.battle.unit_mut(unit).filter(|unit| unit.is_alive()) {
            unit.heal(params.int("amount", 0));
        }
    }
}

struct RecoverStagger;

impl Script for RecoverStagger {
    fn id(&self) -> &str {
        "recover_stagger"
    }

    fn run(&self, ctx: &mut ScriptContext<'_>, params: &ScriptParams) {
        let Some(unit) = ctx.recipient(params, false) else {
            return;
        };
        if let Some(unit) = ctx.battle.unit_mut(unit).filter(|unit| unit.is_alive()) {
            unit.restore(ResourceKind::Stagger, params.int("amount", 0));
        }
    }
}

/// Pure Stagger damage through the damage pipeline.
struct StaggerDamage;

impl Script for StaggerDamage {
    fn id(&self) -> &str {
        "stagger_damage"
    }

    fn run(&self, ctx: &mut ScriptContext<'_>, params: &ScriptParams) {
        let Some(unit) = ctx.recipient(params, true) else {
            return;
        };
        let source = ctx.source;
        ctx.battle.inflict(
            Some(source),
            unit,
            ResourceKind::Stagger,
            params.int("amount", 0),
            None,
            100,
        );
    }
}

/// `sp { amount }`: positive restores, negative drains.
struct SpDamage;

impl Script for SpDamage {
    fn id(&self) -> &str {
        "sp"
    }

    fn run(&self, ctx: &mut ScriptContext<'_>, params: &ScriptParams) {
        let Some(unit) = ctx.recipient(params, false) else {
            return;
        };
        let amount = params.int("amount", 0);
        if amount >= 0 {
            if let Some(unit) = ctx.battle.unit_mut(unit) {
                unit.restore(ResourceKind::Sp, amount);
            }
        } else {
            let source = ctx.source;
            ctx.battle
                .inflict(Some(source), unit, ResourceKind::Sp, -amount, None, 100);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{DiceKind, ScriptCall, Trigger};
    use crate::registry::ContentRegistry;
    use crate::status::builtin::ids;
    use crate::testing::{battle_in, fixed};

    fn run(battle: &mut Battle, call: ScriptCall) {
        battle.run_scripts(&[call], UnitId(1), Some(UnitId(2)), None);
    }

    #[test]
    fn apply_status_honours_recipient_and_delay() {
        let mut battle = battle_in(ContentRegistry::builtin());
        run(
            &mut battle,
            ScriptCall::new("apply_status")
                .with("status", ids::BURN)
                .with("amount", 2)
                .with("target", "target"),
        );
        run(
            &mut battle,
            ScriptCall::new("apply_status")
                .with("status", ids::STRENGTH)
                .with("delay", 1),
        );

        assert_eq!(battle.unit(UnitId(2)).expect("target").statuses.total(ids::BURN), 2);
        let source = battle.unit(UnitId(1)).expect("source");
        assert!(!source.statuses.has(ids::STRENGTH));
        assert_eq!(source.delayed.pending()[0].status, ids::STRENGTH);
    }

    #[test]
    fn roll_scripts_only_touch_a_present_roll() {
        let mut battle = battle_in(ContentRegistry::builtin());
        let die = fixed(DiceKind::Blunt, 5)
            .with_script(Trigger::OnRoll, ScriptCall::new("damage_multiplier").with("percent", 50));
        let roll = battle.create_roll_context(UnitId(1), Some(UnitId(2)), &die, false);
        assert_eq!(roll.damage_multiplier, 150);

        // Without a roll the script does nothing.
        run(&mut battle, ScriptCall::new("power").with("amount", 9));
    }

    #[test]
    fn resource_scripts() {
        let mut battle = battle_in(ContentRegistry::builtin());
        run(&mut battle, ScriptCall::new("stagger_damage").with("amount", 7));
        run(&mut battle, ScriptCall::new("sp").with("amount", -4).with("target", "target"));
        run(&mut battle, ScriptCall::new("sp").with("amount", 3));

        let target = battle.unit(UnitId(2)).expect("target");
        assert_eq!(target.pools.stagger.max - target.pools.stagger.current, 7);
        assert_eq!(target.pools.sp.current, -4);
        assert_eq!(battle.unit(UnitId(1)).expect("source").pools.sp.current, 3);
    }

    #[test]
    fn unknown_scripts_are_skipped() {
        let mut battle = battle_in(ContentRegistry::builtin());
        run(&mut battle, ScriptCall::new("does_not_exist"));
        assert!(battle.unit(UnitId(1)).expect("source").statuses.is_empty());
    }
}
