//! Exchange resolvers.
//!
//! - [`clash`]: both slots hold live cards; dice duel pairwise.
//! - [`one_sided`]: only the attacker has a live card.
//! - [`mass`]: one card against every opponent.
//!
//! All three share the per-pair contest and the unopposed-die rules below.

pub mod clash;
pub mod mass;
pub mod one_sided;
pub mod participant;

pub use clash::resolve_clash;
pub use mass::{MassTarget, resolve_mass, select_defending_slot};
pub use one_sided::resolve_one_sided;
pub use participant::{CurrentDie, DieOrigin, ParticipantState};

use crate::card::{DiceKind, Die};
use crate::combat::{
    ClashSide, DieReport, DieResult, RollContext, Verdict, both_defensive, judge,
};
use crate::engine::Battle;
use crate::unit::UnitId;

/// Result of one die-against-die comparison.
pub(crate) struct Contest {
    pub left: DieReport,
    pub right: DieReport,
    /// `None` when both dice were defensive.
    pub verdict: Option<Verdict>,
}

impl Contest {
    pub fn winner(&self) -> Option<ClashSide> {
        self.verdict.and_then(|verdict| verdict.winner)
    }

    pub fn winner_recycles(&self) -> bool {
        self.verdict.is_some_and(|verdict| verdict.winner_recycles)
    }
}

/// Compares two rolls and applies the outcome: damage or Stagger restore,
/// clash win / lose / draw hooks.
pub(crate) fn contest(battle: &mut Battle, left: &mut RollContext, right: &mut RollContext) -> Contest {
    RollContext::link(left, right);
    let (left_summary, right_summary) = (left.summary(), right.summary());

    if both_defensive(&left_summary, &right_summary) {
        return Contest {
            left: DieReport::rolled(left, DieResult::Defensive),
            right: DieReport::rolled(right, DieResult::Defensive),
            verdict: None,
        };
    }

    let verdict = judge(&left_summary, &right_summary);
    let (left_report, right_report) = match verdict.winner {
        None => {
            battle.handle_clash_draw(left);
            battle.handle_clash_draw(right);
            (
                DieReport::rolled(left, DieResult::Draw),
                DieReport::rolled(right, DieResult::Draw),
            )
        }
        Some(ClashSide::Left) => {
            let hit = battle.resolve_clash_interaction(left, right, verdict.difference);
            battle.handle_clash_win(left);
            battle.handle_clash_lose(right);
            (
                DieReport::rolled(left, DieResult::Win).with_hit(hit),
                DieReport::rolled(right, DieResult::Lose),
            )
        }
        Some(ClashSide::Right) => {
            let hit = battle.resolve_clash_interaction(right, left, verdict.difference);
            battle.handle_clash_win(right);
            battle.handle_clash_lose(left);
            (
                DieReport::rolled(left, DieResult::Lose),
                DieReport::rolled(right, DieResult::Win).with_hit(hit),
            )
        }
    };

    tracing::debug!(
        left = left_summary.value,
        right = right_summary.value,
        winner = ?verdict.winner,
        difference = verdict.difference,
        "dice compared"
    );
    Contest {
        left: left_report,
        right: right_report,
        verdict: Some(verdict),
    }
}

/// A die with nothing in its way: offensive dice strike for their full
/// value, evade dice go to the owner's stored reserve, block dice do nothing.
pub(crate) fn strike_unopposed(
    battle: &mut Battle,
    unit: UnitId,
    target: UnitId,
    die: &Die,
    bonus: i32,
) -> DieReport {
    match die.kind {
        DiceKind::Evade => {
            if let Some(owner) = battle.unit_mut(unit) {
                owner.stored_dice.push_back(die.fresh());
            }
            DieReport::unrolled(unit, die, DieResult::Stored)
        }
        DiceKind::Block => DieReport::unrolled(unit, die, DieResult::Ignored),
        _ => {
            let mut roll = battle.create_roll_context(unit, Some(target), die, false);
            roll.add_modifier(bonus, "speed_advantage");
            land_unopposed(battle, &roll, target)
        }
    }
}

/// Applies an already-rolled offensive die to `target`. Defensive rolls are
/// ignored.
pub(crate) fn land_unopposed(battle: &mut Battle, roll: &RollContext, target: UnitId) -> DieReport {
    if roll.die.kind.is_defensive() {
        return DieReport::rolled(roll, DieResult::Ignored);
    }
    let hit = battle.strike(roll, target, roll.value());
    DieReport::rolled(roll, DieResult::Unopposed).with_hit(hit)
}

/// Dice of the card in `slot`, or none.
pub(crate) fn card_dice(battle: &Battle, slot: crate::unit::SlotRef) -> (Vec<Die>, bool) {
    battle.slot_card(slot).map_or((Vec::new(), false), |card| {
        (
            card.dice.iter().map(Die::fresh).collect(),
            card.has_flag(crate::card::CardFlag::Unbreakable),
        )
    })
}
