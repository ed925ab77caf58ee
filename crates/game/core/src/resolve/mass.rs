//! Mass attacks: one card against every opponent.
//!
//! The attacker's dice are rolled once per action and reused against every
//! target. Summation cards compare dice totals once per target; individual
//! cards compare die by die.
use super::{contest, land_unopposed};
use crate::card::{CardCategory, Die};
use crate::combat::{
    ClashSide, DieReport, DieResult, ExchangeEntry, ExchangeReport, MassReport, MassResult,
    RollContext,
};
use crate::engine::Battle;
use crate::unit::{SlotRef, UnitId};

/// One defender of a mass attack. `slot` is the manually chosen defending
/// slot; `None` lets the resolver pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MassTarget {
    pub unit: UnitId,
    pub slot: Option<usize>,
}

/// Slot that defends `target`: the manual choice, else the first slot holding
/// a card that has not acted yet, else the first slot holding a card.
pub fn select_defending_slot(battle: &Battle, target: &MassTarget) -> Option<usize> {
    if target.slot.is_some() {
        return target.slot;
    }
    let unit = battle.unit(target.unit)?;
    let occupied = || {
        unit.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_occupied())
            .map(|(index, _)| index)
    };
    occupied()
        .find(|index| !battle.is_consumed(unit.slot_ref(*index)))
        .or_else(|| occupied().next())
}

pub fn resolve_mass(battle: &mut Battle, attacker: SlotRef, targets: &[MassTarget]) -> ExchangeReport {
    let mut report = ExchangeReport::default();
    let Some(card) = battle.slot_card(attacker) else {
        return report;
    };
    let summation = card.category == CardCategory::MassSummation;
    let rolls: Vec<RollContext> = card
        .dice
        .iter()
        .map(|die| battle.create_roll_context(attacker.unit, None, die, false))
        .collect();

    for target in targets {
        if !battle.is_alive(attacker.unit) {
            break;
        }
        if !battle.is_alive(target.unit) {
            continue;
        }

        let staggered = battle.unit(target.unit).is_some_and(|unit| unit.is_staggered());
        let slot = if staggered {
            None
        } else {
            select_defending_slot(battle, target)
        };
        let defending = slot.map(|index| SlotRef::new(target.unit, index));
        let defender_dice: Vec<Die> = defending
            .and_then(|slot| battle.slot_card(slot))
            .map(|card| card.dice.iter().map(Die::fresh).collect())
            .unwrap_or_default();

        let mass = if summation {
            summation_against(battle, &rolls, target.unit, defending, &defender_dice)
        } else {
            individual_against(battle, &rolls, target.unit, defending, &defender_dice)
        };
        tracing::debug!(
            attacker = %attacker,
            target = %target.unit,
            result = %mass.result,
            attacker_total = mass.attacker_total,
            defender_total = mass.defender_total,
            "mass attack against target"
        );
        report.mass.push(mass);
    }
    report
}

fn total(rolls: &[RollContext]) -> i32 {
    rolls.iter().map(RollContext::value).sum()
}

fn summation_against(
    battle: &mut Battle,
    rolls: &[RollContext],
    target: UnitId,
    defending: Option<SlotRef>,
    defender_dice: &[Die],
) -> MassReport {
    let attacker_total = total(rolls);
    let mut mass = MassReport {
        target,
        slot: defending.map(|slot| slot.index),
        result: MassResult::Unopposed,
        attacker_total,
        defender_total: 0,
        damage: 0,
        entries: Vec::new(),
    };

    let (Some(slot), false) = (defending, defender_dice.is_empty()) else {
        for roll in rolls {
            let report = land_unopposed(battle, &roll.retarget(target), target);
            mass.damage += report.damage;
            mass.entries.push(ExchangeEntry::left(report));
        }
        return mass;
    };

    let Some(attacker) = rolls.first().map(|roll| roll.source) else {
        mass.result = MassResult::Defended;
        return mass;
    };
    let defender_rolls: Vec<RollContext> = defender_dice
        .iter()
        .map(|die| battle.create_roll_context(target, Some(attacker), die, false))
        .collect();
    mass.defender_total = total(&defender_rolls);

    mass.result = match attacker_total.cmp(&mass.defender_total) {
        core::cmp::Ordering::Greater => MassResult::Hit,
        core::cmp::Ordering::Equal => MassResult::Draw,
        core::cmp::Ordering::Less => MassResult::Defended,
    };

    if mass.result == MassResult::Hit {
        if let Some(entry) = battle.unit_mut(target).and_then(|unit| unit.slot_mut(slot.index)) {
            entry.destroy_card();
        }
        for roll in rolls {
            let report = land_unopposed(battle, &roll.retarget(target), target);
            mass.damage += report.damage;
            mass.entries.push(ExchangeEntry::left(DieReport {
                result: DieResult::Win,
                ..report
            }));
        }
    } else {
        let (mine, theirs) = match mass.result {
            MassResult::Draw => (DieResult::Draw, DieResult::Draw),
            _ => (DieResult::Lose, DieResult::Win),
        };
        mass.entries.extend(
            rolls
                .iter()
                .map(|roll| ExchangeEntry::left(DieReport::rolled(roll, mine))),
        );
        mass.entries.extend(
            defender_rolls
                .iter()
                .map(|roll| ExchangeEntry::right(DieReport::rolled(roll, theirs))),
        );
    }
    battle.mark_consumed(slot);
    mass
}

fn individual_against(
    battle: &mut Battle,
    rolls: &[RollContext],
    target: UnitId,
    defending: Option<SlotRef>,
    defender_dice: &[Die],
) -> MassReport {
    let mut mass = MassReport {
        target,
        slot: defending.map(|slot| slot.index),
        result: MassResult::Unopposed,
        attacker_total: total(rolls),
        defender_total: 0,
        damage: 0,
        entries: Vec::new(),
    };
    let (mut wins, mut losses) = (0, 0);

    for (index, roll) in rolls.iter().enumerate() {
        if !battle.is_alive(target) || !battle.is_alive(roll.source) {
            break;
        }
        let mut attack = roll.retarget(target);
        match defender_dice.get(index) {
            Some(die) => {
                let mut answer = battle.create_roll_context(target, Some(roll.source), die, false);
                mass.defender_total += answer.value();
                let outcome = contest(battle, &mut attack, &mut answer);
                match outcome.winner() {
                    Some(ClashSide::Left) => wins += 1,
                    Some(ClashSide::Right) => losses += 1,
                    None => {}
                }
                mass.damage += outcome.left.damage;
                mass.entries.push(ExchangeEntry::pair(outcome.left, outcome.right));
            }
            None => {
                let report = land_unopposed(battle, &attack, target);
                mass.damage += report.damage;
                mass.entries.push(ExchangeEntry::left(report));
            }
        }
    }

    if let Some(slot) = defending.filter(|_| !defender_dice.is_empty()) {
        battle.mark_consumed(slot);
        mass.result = if wins > 0 {
            MassResult::Hit
        } else if losses > 0 {
            MassResult::Defended
        } else {
            MassResult::Draw
        };
    }
    mass
}
