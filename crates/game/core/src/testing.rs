//! Shared fixtures for unit tests.
use std::sync::Arc;

use crate::card::{Card, CardCategory, CardId, DiceKind, Die};
use crate::config::CombatConfig;
use crate::engine::Battle;
use crate::registry::ContentRegistry;
use crate::unit::{Side, Slot, SlotRef, Unit, UnitId};

pub fn unit(id: u32, side: Side) -> Unit {
    Unit::new(UnitId(id), format!("unit-{id}"), side)
}

pub fn registry() -> ContentRegistry {
    ContentRegistry::builtin()
}

pub fn fixed(kind: DiceKind, value: i32) -> Die {
    Die::fixed(kind, value)
}

pub fn fixed_card(id: &str, tier: u32, category: CardCategory, dice: &[(DiceKind, i32)]) -> Card {
    dice.iter()
        .fold(Card::new(id, tier, category), |card, &(kind, value)| {
            card.with_die(fixed(kind, value))
        })
}

/// Battle with the builtin content plus `cards`, and no units.
pub fn battle(cards: Vec<Card>) -> Battle {
    let registry = ContentRegistry::builder().with_builtins().cards(cards).build();
    Battle::new(Arc::new(registry), CombatConfig::default(), 7)
}

/// Unit 1 (ally) against unit 2 (enemy).
pub fn battle_with_units(cards: Vec<Card>) -> Battle {
    populate(battle(cards))
}

pub fn battle_in(registry: ContentRegistry) -> Battle {
    populate(Battle::new(Arc::new(registry), CombatConfig::default(), 7))
}

fn populate(mut battle: Battle) -> Battle {
    battle.add_unit(unit(1, Side::Ally)).expect("ally");
    battle.add_unit(unit(2, Side::Enemy)).expect("enemy");
    battle
}

/// Opens a new speed-5 slot on `unit` holding `card`, bypassing deck checks.
pub fn queue(battle: &mut Battle, unit: UnitId, card: &str, target: Option<SlotRef>) -> SlotRef {
    let card = battle.registry().card(&CardId::from(card));
    let owner = battle.unit_mut(unit).expect("queued unit");
    let mut slot = Slot::new(5);
    slot.assign(card, target, false);
    owner.slots.push(slot);
    owner.slot_ref(owner.slots.len() - 1)
}
