//! One-sided attack: only the attacker's card is live.
//!
//! Each attacker die meets, in order of preference, a counter die fetched
//! from the defender's reserve, the defender's same-index passive block or
//! evade, or nothing at all.
use super::participant::ParticipantState;
use super::{card_dice, contest, strike_unopposed};
use crate::card::Die;
use crate::combat::{ClashSide, DieReport, DieResult, ExchangeEntry, ExchangeReport};
use crate::engine::Battle;
use crate::unit::SlotRef;

pub fn resolve_one_sided(
    battle: &mut Battle,
    attacker_slot: SlotRef,
    defender_slot: SlotRef,
    redirected: bool,
) -> ExchangeReport {
    let (dice, _) = card_dice(battle, attacker_slot);
    let mut attacker = ParticipantState::new(attacker_slot.unit, dice);
    let defender = defender_slot.unit;
    let passive: Vec<Die> = if redirected {
        Vec::new()
    } else {
        card_dice(battle, defender_slot).0
    };

    let cap = battle.config().one_sided_iteration_cap;
    let mut report = ExchangeReport::default();
    let mut fetched: Option<Die> = None;
    let mut iterations = 0;

    loop {
        let attacker_ready = battle
            .unit(attacker.unit)
            .is_some_and(|unit| unit.is_alive() && !unit.is_staggered());
        if !attacker_ready || !battle.is_alive(defender) {
            break;
        }
        if iterations >= cap {
            tracing::warn!(attacker = %attacker_slot, cap, "one-sided attack truncated at iteration cap");
            report.truncated = true;
            break;
        }
        iterations += 1;

        let Some(current) = battle
            .unit(attacker.unit)
            .and_then(|unit| attacker.resolve_queued_die(unit))
        else {
            match attacker.skip_broken() {
                Some(skipped) => {
                    report.push(ExchangeEntry::left(skipped));
                    continue;
                }
                None => break,
            }
        };

        if fetched.is_none() {
            fetched = battle
                .unit_mut(defender)
                .filter(|unit| unit.can_use_reserves())
                .and_then(|unit| unit.counter_dice.pop_front());
        }

        if let Some(counter) = fetched.take() {
            let mut attack = battle.create_roll_context(attacker.unit, Some(defender), &current.die, false);
            let mut answer = battle.create_roll_context(defender, Some(attacker.unit), &counter, false);
            let outcome = contest(battle, &mut attack, &mut answer);
            match outcome.winner() {
                Some(ClashSide::Right) => {
                    fetched = Some(counter);
                    attacker.consume(&current);
                }
                Some(ClashSide::Left) if outcome.winner_recycles() => {}
                _ => attacker.consume(&current),
            }
            report.push(ExchangeEntry::pair(outcome.left, outcome.right));
            continue;
        }

        if current.die.counter {
            attacker.consume(&current);
            if let Some(unit) = battle.unit_mut(attacker.unit) {
                unit.stored_dice.push_back(current.die.fresh());
            }
            report.push(ExchangeEntry::left(DieReport::unrolled(
                attacker.unit,
                &current.die,
                DieResult::Skipped,
            )));
            continue;
        }

        let index = attacker.cursor();
        let defender_steady = battle.unit(defender).is_some_and(|unit| !unit.is_staggered());
        let guard = passive
            .get(index)
            .filter(|die| defender_steady && die.kind.is_defensive());
        if let Some(guard) = guard {
            let mut attack = battle.create_roll_context(attacker.unit, Some(defender), &current.die, false);
            let mut answer = battle.create_roll_context(defender, Some(attacker.unit), guard, false);
            let outcome = contest(battle, &mut attack, &mut answer);
            attacker.consume(&current);
            report.push(ExchangeEntry::pair(outcome.left, outcome.right));
            continue;
        }

        let hit = strike_unopposed(battle, attacker.unit, defender, &current.die, 0);
        attacker.consume(&current);
        report.push(ExchangeEntry::left(hit));
    }

    if let Some(counter) = fetched {
        tracing::debug!(unit = %defender, "fetched counter die burned");
        report
            .cleanup
            .push(DieReport::unrolled(defender, &counter, DieResult::Burned));
    }

    tracing::debug!(
        attacker = %attacker_slot,
        defender = %defender_slot,
        redirected,
        sub_rounds = report.entries.len(),
        "one-sided attack resolved"
    );
    report
}
