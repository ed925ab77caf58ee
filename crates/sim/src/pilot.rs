//! Automated play: picks cards and targets for every unit and drives whole
//! battles through the turn API.
use clash_content::ContentBundle;
use clash_core::rng::context;
use clash_core::{
    Battle, BattleOutcome, CardId, PcgRng, RngOracle, Side, SlotRef, Unit, UnitId, compute_seed,
};

use crate::config::SimConfig;

/// Final state of a simulated battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleSummary {
    pub seed: u64,
    pub turns: u32,
    /// `None` when the turn limit ran out first.
    pub outcome: Option<BattleOutcome>,
    pub actions: usize,
    pub survivors: Vec<(String, i32)>,
}

impl BattleSummary {
    pub fn headline(&self) -> String {
        match self.outcome {
            Some(BattleOutcome::Victory(side)) => format!("{side} victory after {} turns", self.turns),
            Some(BattleOutcome::Draw) => format!("mutual defeat after {} turns", self.turns),
            None => format!("undecided after {} turns", self.turns),
        }
    }
}

/// Seed for one pilot decision. `salt` separates card from target choices.
fn decision(battle: &Battle, unit: UnitId, index: usize, salt: u64) -> u64 {
    let nonce = (u64::from(battle.turn()) << 16) | ((index as u64) << 4) | salt;
    compute_seed(battle.seed(), nonce, unit.0, context::PILOT)
}

fn pick<T: Clone>(battle: &Battle, unit: UnitId, index: usize, salt: u64, items: &[T]) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let last = i32::try_from(items.len() - 1).unwrap_or(i32::MAX);
    let roll = PcgRng.range(decision(battle, unit, index, salt), 0, last);
    items.get(usize::try_from(roll).unwrap_or(0)).cloned()
}

/// Deck cards `unit` may still place this turn, in deck order.
fn playable(unit: &Unit) -> Vec<CardId> {
    let mut cards: Vec<CardId> = Vec::new();
    for card in &unit.deck {
        if !cards.contains(card) && unit.is_card_available(card) {
            cards.push(card.clone());
        }
    }
    cards
}

/// Fills every open slot of `id` with a random playable card aimed at a
/// random slot of a random living opponent. Returns how many cards were
/// placed.
pub fn plan_unit(battle: &mut Battle, id: UnitId) -> usize {
    let Some(side) = battle.unit(id).filter(|unit| unit.can_act()).map(|unit| unit.side) else {
        return 0;
    };
    let foes: Vec<UnitId> = battle.living(side.opposite()).map(|unit| unit.id).collect();
    let slots = battle.unit(id).map_or(0, |unit| unit.slots.len());
    let mut placed = 0;

    for index in 0..slots {
        let Some(unit) = battle.unit(id) else {
            break;
        };
        let Some(card) = pick(battle, id, index, 0, &playable(unit)) else {
            tracing::debug!(unit = %id, slot = index, "no playable card left");
            break;
        };
        let speed = unit.slots[index].speed;

        let Some(foe) = pick(battle, id, index, 1, &foes) else {
            break;
        };
        let foe_slots: Vec<usize> = battle
            .unit(foe)
            .map(|unit| (0..unit.slots.len().max(1)).collect())
            .unwrap_or_default();
        let target_index = pick(battle, id, index, 2, &foe_slots).unwrap_or(0);
        let target = SlotRef::new(foe, target_index);

        let on_play = battle.registry().card(&card).category.is_instant();
        let (target, speed_break) = if on_play {
            (None, false)
        } else {
            let faster = battle
                .unit(foe)
                .and_then(|unit| unit.slot(target_index))
                .is_some_and(|slot| speed > slot.speed);
            (Some(target), faster)
        };

        match battle.assign_card(SlotRef::new(id, index), &card, target, speed_break) {
            Ok(()) => placed += 1,
            Err(error) => tracing::debug!(unit = %id, slot = index, %error, "pilot assignment rejected"),
        }
    }
    placed
}

/// Spawns every template in `bundle` and plays until one side falls or the
/// turn limit runs out.
pub fn run_battle(bundle: &ContentBundle, config: &SimConfig) -> anyhow::Result<BattleSummary> {
    let mut battle = Battle::new(
        std::sync::Arc::clone(&bundle.registry),
        bundle.config.clone(),
        config.seed,
    );
    for (offset, template) in bundle.units.iter().enumerate() {
        let id = UnitId(u32::try_from(offset + 1)?);
        battle.add_unit(template.spawn(id, &bundle.registry, &bundle.config))?;
    }
    for side in [Side::Ally, Side::Enemy] {
        if battle.living(side).next().is_none() {
            anyhow::bail!("content has no {side} units");
        }
    }

    let mut actions = 0;
    while battle.outcome().is_none() && battle.turn() < config.max_turns {
        let turn = battle.begin_turn();
        for id in battle.unit_ids() {
            plan_unit(&mut battle, id);
        }
        let report = battle.resolve_turn();
        actions += report.actions.len();
        battle.end_turn();

        tracing::info!(
            turn,
            actions = report.actions.len(),
            allies = battle.living(Side::Ally).count(),
            enemies = battle.living(Side::Enemy).count(),
            "turn complete"
        );
    }

    let summary = BattleSummary {
        seed: config.seed,
        turns: battle.turn(),
        outcome: battle.outcome(),
        actions,
        survivors: battle
            .units()
            .filter(|unit| unit.is_alive())
            .map(|unit| (unit.name.clone(), unit.pools.hp.current))
            .collect(),
    };
    if summary.outcome.is_none() {
        tracing::warn!(turns = summary.turns, "turn limit reached without a winner");
    }
    Ok(summary)
}
