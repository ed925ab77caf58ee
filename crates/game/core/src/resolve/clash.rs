//! Paired clash between two live cards.
use super::participant::{CurrentDie, ParticipantState};
use super::{card_dice, contest, strike_unopposed};
use crate::combat::{ClashSide, DieReport, DieResult, ExchangeEntry, ExchangeReport};
use crate::engine::Battle;
use crate::unit::{Capabilities, MechanicsProvider, SlotRef};

/// Speed comparison before the first sub-round. Returns the side holding
/// the speed advantage and breaks the slower side's dice when the faster side
/// asked for it and the slower side is not immune.
pub fn speed_setup(
    battle: &Battle,
    left_slot: SlotRef,
    right_slot: SlotRef,
    left: &mut ParticipantState,
    right: &mut ParticipantState,
    protected: (bool, bool),
) -> Option<ClashSide> {
    let slot = |slot: SlotRef| {
        battle
            .unit(slot.unit)
            .and_then(|unit| unit.slot(slot.index))
            .map_or((0, false), |entry| (entry.speed, entry.speed_break))
    };
    let (left_speed, left_breaks) = slot(left_slot);
    let (right_speed, right_breaks) = slot(right_slot);

    let (faster, breaks, victim, victim_protected) = match left_speed.cmp(&right_speed) {
        core::cmp::Ordering::Greater => (ClashSide::Left, left_breaks, right, protected.1),
        core::cmp::Ordering::Less => (ClashSide::Right, right_breaks, left, protected.0),
        core::cmp::Ordering::Equal => return None,
    };
    if !breaks {
        return Some(faster);
    }

    let Some(victim_unit) = battle.unit(victim.unit) else {
        return Some(faster);
    };
    if victim_unit.immune_to_speed_break() {
        tracing::debug!(unit = %victim.unit, "speed break resisted");
        return Some(faster);
    }
    let counters_protected = victim_unit.has(Capabilities::UNBREAKABLE_COUNTERS);
    victim.apply_speed_break(|die| victim_protected || (die.counter && counters_protected));
    tracing::debug!(unit = %victim.unit, "dice speed-broken");
    Some(faster)
}

/// Resolves a full clash exchange between the cards in `left_slot` and
/// `right_slot`.
pub fn resolve_clash(battle: &mut Battle, left_slot: SlotRef, right_slot: SlotRef) -> ExchangeReport {
    let (left_dice, left_protected) = card_dice(battle, left_slot);
    let (right_dice, right_protected) = card_dice(battle, right_slot);
    let mut left = ParticipantState::new(left_slot.unit, left_dice);
    let mut right = ParticipantState::new(right_slot.unit, right_dice);

    let advantage = speed_setup(
        battle,
        left_slot,
        right_slot,
        &mut left,
        &mut right,
        (left_protected, right_protected),
    );
    let power = battle.config().speed_advantage_power;
    let bonus = |side: ClashSide| if advantage == Some(side) { power } else { 0 };

    let cap = battle.config().clash_iteration_cap;
    let mut report = ExchangeReport::default();
    let mut iterations = 0;

    while battle.is_alive(left.unit) && battle.is_alive(right.unit) {
        if iterations >= cap {
            tracing::warn!(left = %left_slot, right = %right_slot, cap, "clash truncated at iteration cap");
            report.truncated = true;
            break;
        }
        iterations += 1;

        let left_die = draw(battle, &mut left);
        let right_die = draw(battle, &mut right);

        match (left_die, right_die) {
            (None, None) => {
                let left_skipped = left.skip_broken();
                let right_skipped = right.skip_broken();
                if left_skipped.is_none() && right_skipped.is_none() {
                    break;
                }
                report.push(ExchangeEntry {
                    left: left_skipped,
                    right: right_skipped,
                });
            }
            (Some(current), None) => {
                let lone = lone_die(battle, current, &mut left, &mut right, bonus(ClashSide::Left));
                report.push(ExchangeEntry {
                    left: Some(lone.report),
                    right: lone.skipped,
                });
                if lone.stop {
                    break;
                }
            }
            (None, Some(current)) => {
                let lone = lone_die(battle, current, &mut right, &mut left, bonus(ClashSide::Right));
                report.push(ExchangeEntry {
                    left: lone.skipped,
                    right: Some(lone.report),
                });
                if lone.stop {
                    break;
                }
            }
            (Some(left_current), Some(right_current)) => {
                let mut left_roll =
                    battle.create_roll_context(left.unit, Some(right.unit), &left_current.die, false);
                left_roll.add_modifier(bonus(ClashSide::Left), "speed_advantage");
                let mut right_roll =
                    battle.create_roll_context(right.unit, Some(left.unit), &right_current.die, false);
                right_roll.add_modifier(bonus(ClashSide::Right), "speed_advantage");

                let outcome = contest(battle, &mut left_roll, &mut right_roll);
                match outcome.winner() {
                    Some(ClashSide::Left) if outcome.winner_recycles() => {
                        left.recycle(left_current);
                        right.consume(&right_current);
                    }
                    Some(ClashSide::Right) if outcome.winner_recycles() => {
                        left.consume(&left_current);
                        right.recycle(right_current);
                    }
                    _ => {
                        left.consume(&left_current);
                        right.consume(&right_current);
                    }
                }
                report.push(ExchangeEntry::pair(outcome.left, outcome.right));
            }
        }
    }

    let left_has = left.has_unresolved();
    let right_has = right.has_unresolved();
    if let Some(unit) = battle.unit_mut(left.unit) {
        report.cleanup.extend(left.finish(unit, right_has));
    }
    if let Some(unit) = battle.unit_mut(right.unit) {
        report.cleanup.extend(right.finish(unit, left_has));
    }

    tracing::debug!(
        left = %left_slot,
        right = %right_slot,
        sub_rounds = report.entries.len(),
        truncated = report.truncated,
        "clash resolved"
    );
    report
}

fn draw(battle: &mut Battle, side: &mut ParticipantState) -> Option<CurrentDie> {
    battle
        .unit_mut(side.unit)
        .and_then(|unit| side.resolve_current_die(unit))
}

struct LoneDie {
    report: DieReport,
    /// Broken die skipped on the empty side.
    skipped: Option<DieReport>,
    stop: bool,
}

/// One side has a die, the other has none. Counter and reserve dice never
/// initiate: they are put back and the exchange stops. Anything else
/// resolves unopposed, skipping a broken die on the other side.
fn lone_die(
    battle: &mut Battle,
    current: CurrentDie,
    mine: &mut ParticipantState,
    theirs: &mut ParticipantState,
    bonus: i32,
) -> LoneDie {
    if current.die.counter || current.origin.is_reserve() {
        let report = DieReport::unrolled(mine.unit, &current.die, DieResult::Preserved);
        if let Some(unit) = battle.unit_mut(mine.unit) {
            mine.preserve(current, unit);
        }
        return LoneDie {
            report,
            skipped: None,
            stop: true,
        };
    }

    let skipped = theirs.skip_broken();
    let report = strike_unopposed(battle, mine.unit, theirs.unit, &current.die, bonus);
    mine.consume(&current);
    LoneDie {
        report,
        skipped,
        stop: false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::card::{Card, CardCategory, DiceKind};
    use crate::config::CombatConfig;
    use crate::registry::ContentRegistry;
    use crate::stats::ResourceKind;
    use crate::status::builtin::ids;
    use crate::testing::{battle_with_units, fixed, fixed_card, queue, unit};
    use crate::unit::{Side, UnitId};

    fn results(report: &ExchangeReport) -> Vec<(Option<DieResult>, Option<DieResult>)> {
        report
            .entries
            .iter()
            .map(|entry| {
                (
                    entry.left.as_ref().map(|die| die.result),
                    entry.right.as_ref().map(|die| die.result),
                )
            })
            .collect()
    }

    #[test]
    fn attack_beats_block_for_the_difference() {
        let strike = fixed_card("strike", 1, CardCategory::Melee, &[(DiceKind::Slash, 10)]);
        let guard = fixed_card("guard", 1, CardCategory::Melee, &[(DiceKind::Block, 5)]);
        let mut battle = battle_with_units(vec![strike, guard]);
        let left = queue(&mut battle, UnitId(1), "strike", None);
        let right = queue(&mut battle, UnitId(2), "guard", None);

        let report = resolve_clash(&mut battle, left, right);

        assert_eq!(results(&report), [(Some(DieResult::Win), Some(DieResult::Lose))]);
        assert_eq!(report.total_damage_to(UnitId(2)), 5);
        assert_eq!(battle.unit(UnitId(2)).expect("defender").pools.hp.current, 55);
        assert!(!report.truncated);
    }

    #[test]
    fn faster_side_breaks_the_slower_dice() {
        let strike = fixed_card("strike", 1, CardCategory::Melee, &[(DiceKind::Slash, 6)]);
        let flurry = fixed_card(
            "flurry",
            1,
            CardCategory::Melee,
            &[(DiceKind::Blunt, 4), (DiceKind::Blunt, 4)],
        );
        let mut battle = battle_with_units(vec![strike, flurry]);
        let left = queue(&mut battle, UnitId(1), "strike", None);
        let right = queue(&mut battle, UnitId(2), "flurry", None);
        let slot = battle
            .unit_mut(UnitId(1))
            .and_then(|unit| unit.slot_mut(left.index))
            .expect("left slot");
        slot.speed = 8;
        slot.speed_break = true;

        let report = resolve_clash(&mut battle, left, right);

        assert_eq!(
            results(&report),
            [
                (Some(DieResult::Unopposed), Some(DieResult::Broken)),
                (None, Some(DieResult::Broken)),
            ]
        );
        assert_eq!(report.total_damage_to(UnitId(2)), 6);
    }

    #[test]
    fn speed_break_spares_unbreakable_cards() {
        let strike = fixed_card("strike", 1, CardCategory::Melee, &[(DiceKind::Slash, 6)]);
        let wall = Card::new("wall", 1, CardCategory::Melee)
            .with_die(fixed(DiceKind::Block, 4))
            .with_flag(crate::card::CardFlag::Unbreakable);
        let mut battle = battle_with_units(vec![strike, wall]);
        let left = queue(&mut battle, UnitId(1), "strike", None);
        let right = queue(&mut battle, UnitId(2), "wall", None);
        if let Some(slot) = battle.unit_mut(UnitId(1)).and_then(|unit| unit.slot_mut(left.index)) {
            slot.speed = 8;
            slot.speed_break = true;
        }

        let report = resolve_clash(&mut battle, left, right);
        assert_eq!(results(&report)[0], (Some(DieResult::Win), Some(DieResult::Lose)));
        assert_eq!(report.total_damage_to(UnitId(2)), 2);
    }

    #[test]
    fn speed_break_immune_dice_survive_the_faster_roll() {
        let strike = fixed_card("strike", 1, CardCategory::Melee, &[(DiceKind::Slash, 6)]);
        let flurry = fixed_card(
            "flurry",
            1,
            CardCategory::Melee,
            &[(DiceKind::Blunt, 4), (DiceKind::Blunt, 4)],
        );
        let registry = ContentRegistry::builder()
            .with_builtins()
            .cards(vec![strike, flurry])
            .build();
        let config = CombatConfig {
            speed_advantage_power: 2,
            ..CombatConfig::default()
        };
        let mut battle = crate::engine::Battle::new(Arc::new(registry), config, 7);
        battle.add_unit(unit(1, Side::Ally)).expect("ally");
        battle.add_unit(unit(2, Side::Enemy)).expect("enemy");
        battle.apply_status(UnitId(2), ids::SPEED_BREAK_IMMUNITY, 1, 1, 0);
        let left = queue(&mut battle, UnitId(1), "strike", None);
        let right = queue(&mut battle, UnitId(2), "flurry", None);
        if let Some(slot) = battle.unit_mut(UnitId(1)).and_then(|unit| unit.slot_mut(left.index)) {
            slot.speed = 8;
            slot.speed_break = true;
        }

        let report = resolve_clash(&mut battle, left, right);

        assert!(report.dice().all(|die| die.result != DieResult::Broken));
        let first = &report.entries[0];
        assert_eq!(first.left.as_ref().and_then(|die| die.value), Some(6 + 2));
        assert_eq!(first.right.as_ref().and_then(|die| die.value), Some(4));
        assert_eq!(results(&report)[0], (Some(DieResult::Win), Some(DieResult::Lose)));
    }

    #[test]
    fn winning_evade_recycles_then_moves_to_the_stored_reserve() {
        let sidestep = fixed_card("sidestep", 1, CardCategory::Melee, &[(DiceKind::Evade, 6)]);
        let jabs = fixed_card(
            "jabs",
            1,
            CardCategory::Melee,
            &[(DiceKind::Slash, 3), (DiceKind::Slash, 2)],
        );
        let mut battle = battle_with_units(vec![sidestep, jabs]);
        let left = queue(&mut battle, UnitId(1), "sidestep", None);
        let right = queue(&mut battle, UnitId(2), "jabs", None);

        let report = resolve_clash(&mut battle, left, right);

        assert_eq!(
            results(&report),
            [
                (Some(DieResult::Win), Some(DieResult::Lose)),
                (Some(DieResult::Win), Some(DieResult::Lose)),
                (Some(DieResult::Stored), None),
                (Some(DieResult::Preserved), None),
            ]
        );
        assert_eq!(report.total_damage_to(UnitId(1)), 0);
        assert_eq!(battle.unit(UnitId(1)).expect("evader").stored_dice.len(), 1);
    }

    #[test]
    fn winning_block_restores_stagger_by_the_difference() {
        let guard = fixed_card("guard", 1, CardCategory::Melee, &[(DiceKind::Block, 8)]);
        let strike = fixed_card("strike", 1, CardCategory::Melee, &[(DiceKind::Slash, 3)]);
        let mut battle = battle_with_units(vec![guard, strike]);
        battle
            .unit_mut(UnitId(1))
            .expect("guard")
            .lose(ResourceKind::Stagger, 10);
        let left = queue(&mut battle, UnitId(1), "guard", None);
        let right = queue(&mut battle, UnitId(2), "strike", None);

        let report = resolve_clash(&mut battle, left, right);

        assert_eq!(
            report.entries[0].left.as_ref().map(|die| die.stagger_restored),
            Some(5)
        );
        assert_eq!(results(&report)[1], (Some(DieResult::Ignored), None));
        assert_eq!(battle.unit(UnitId(1)).expect("guard").pools.stagger.current, 25);
    }

    #[test]
    fn undefeated_counter_burns_once_the_opponent_is_spent() {
        let strike = fixed_card("strike", 1, CardCategory::Melee, &[(DiceKind::Slash, 3)]);
        let riposte = Card::new("riposte", 1, CardCategory::Melee)
            .with_die(fixed(DiceKind::Blunt, 6).as_counter());
        let mut battle = battle_with_units(vec![strike, riposte]);
        let left = queue(&mut battle, UnitId(1), "strike", None);
        let right = queue(&mut battle, UnitId(2), "riposte", None);

        let report = resolve_clash(&mut battle, left, right);

        assert_eq!(report.total_damage_to(UnitId(1)), 3);
        let cleanup: Vec<_> = report.cleanup.iter().map(|die| die.result).collect();
        assert_eq!(cleanup, [DieResult::Burned]);
        assert!(battle.unit(UnitId(2)).expect("counter").stored_dice.is_empty());
    }

    #[test]
    fn exchange_stops_at_the_iteration_cap() {
        let trade = fixed_card(
            "trade",
            1,
            CardCategory::Melee,
            &[(DiceKind::Slash, 4), (DiceKind::Slash, 4), (DiceKind::Slash, 4)],
        );
        let registry = ContentRegistry::builder().with_builtins().card(trade).build();
        let config = CombatConfig::new().with_iteration_caps(2, 2);
        let mut battle = crate::engine::Battle::new(Arc::new(registry), config, 7);
        battle.add_unit(unit(1, Side::Ally)).expect("ally");
        battle.add_unit(unit(2, Side::Enemy)).expect("enemy");
        let left = queue(&mut battle, UnitId(1), "trade", None);
        let right = queue(&mut battle, UnitId(2), "trade", None);

        let report = resolve_clash(&mut battle, left, right);

        assert!(report.truncated);
        assert_eq!(
            results(&report),
            [
                (Some(DieResult::Draw), Some(DieResult::Draw)),
                (Some(DieResult::Draw), Some(DieResult::Draw)),
            ]
        );
    }
}
