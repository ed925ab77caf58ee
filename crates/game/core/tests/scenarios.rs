//! End-to-end battles through the public turn API.
use std::sync::Arc;

use clash_core::{
    ActionMode, Battle, BattleOutcome, Card, CardCategory, CardId, CombatConfig, ContentRegistry,
    DiceKind, DieResult, ExchangeReport, MassResult, ResourceKind, Side, SlotRef, TurnReport,
    Unit, UnitId,
};

const ALLY: UnitId = UnitId(1);
const ENEMY: UnitId = UnitId(2);

fn card(id: &str, category: CardCategory, dice: &[(DiceKind, i32)]) -> Card {
    dice.iter().fold(Card::new(id, 0, category), |card, &(kind, value)| {
        card.with_die(clash_core::Die::fixed(kind, value))
    })
}

fn battle(cards: Vec<Card>, seed: u64) -> Battle {
    let deck: Vec<CardId> = cards.iter().map(|card| card.id.clone()).collect();
    let registry = ContentRegistry::builder().with_builtins().cards(cards).build();
    let mut battle = Battle::new(Arc::new(registry), CombatConfig::default(), seed);
    battle
        .add_unit(Unit::new(ALLY, "roland", Side::Ally).with_deck(deck.clone()))
        .expect("ally");
    battle
        .add_unit(Unit::new(ENEMY, "sweeper", Side::Enemy).with_deck(deck))
        .expect("enemy");
    battle
}

fn slot(unit: UnitId) -> SlotRef {
    SlotRef::new(unit, 0)
}

fn exchange(report: &TurnReport, mode: ActionMode) -> &ExchangeReport {
    &report
        .actions
        .iter()
        .find(|action| action.mode == mode)
        .expect("action with the requested mode")
        .exchange
}

#[test]
fn attack_beats_block_for_the_difference() {
    let mut battle = battle(
        vec![
            card("strike", CardCategory::Melee, &[(DiceKind::Slash, 10)]),
            card("guard", CardCategory::Melee, &[(DiceKind::Block, 5)]),
        ],
        11,
    );
    battle.begin_turn();
    battle
        .assign_card(slot(ALLY), &CardId::from("strike"), Some(slot(ENEMY)), false)
        .expect("strike");
    battle
        .assign_card(slot(ENEMY), &CardId::from("guard"), Some(slot(ALLY)), false)
        .expect("guard");

    let report = battle.resolve_turn();
    let clash = exchange(&report, ActionMode::Clash);

    assert_eq!(clash.total_damage_to(ENEMY), 5);
    assert_eq!(clash.total_damage_to(ALLY), 0);
    let enemy = battle.unit(ENEMY).expect("enemy");
    assert_eq!(enemy.pools.hp.current, Unit::DEFAULT_MAX_HP - 5);
    assert_eq!(enemy.pools.stagger.current, Unit::DEFAULT_MAX_STAGGER - 5);
}

#[test]
fn speed_break_leaves_the_attacker_unopposed() {
    let mut battle = battle(
        vec![
            card("strike", CardCategory::Melee, &[(DiceKind::Slash, 6)]),
            card(
                "flurry",
                CardCategory::Melee,
                &[(DiceKind::Blunt, 4), (DiceKind::Blunt, 4)],
            ),
        ],
        12,
    );
    battle.begin_turn();
    if let Some(entry) = battle.unit_mut(ALLY).and_then(|unit| unit.slot_mut(0)) {
        entry.speed = 9;
    }
    battle
        .assign_card(slot(ALLY), &CardId::from("strike"), Some(slot(ENEMY)), true)
        .expect("strike");
    battle
        .assign_card(slot(ENEMY), &CardId::from("flurry"), Some(slot(ALLY)), false)
        .expect("flurry");

    let report = battle.resolve_turn();
    let clash = exchange(&report, ActionMode::Clash);

    let broken = clash
        .dice()
        .filter(|die| die.unit == ENEMY && die.result == DieResult::Broken)
        .count();
    assert_eq!(broken, 2);
    assert!(clash
        .dice()
        .any(|die| die.unit == ALLY && die.result == DieResult::Unopposed));
    assert_eq!(clash.total_damage_to(ENEMY), 6);
    assert_eq!(battle.unit(ALLY).expect("ally").pools.hp.current, Unit::DEFAULT_MAX_HP);
}

#[test]
fn mass_summation_destroys_the_defending_card() {
    let mut battle = battle(
        vec![
            card(
                "sweep",
                CardCategory::MassSummation,
                &[(DiceKind::Slash, 10), (DiceKind::Slash, 10)],
            ),
            card(
                "guard",
                CardCategory::Melee,
                &[(DiceKind::Block, 5), (DiceKind::Block, 5)],
            ),
        ],
        13,
    );
    battle.begin_turn();
    battle
        .assign_card(slot(ALLY), &CardId::from("sweep"), Some(slot(ENEMY)), false)
        .expect("sweep");
    battle
        .assign_card(slot(ENEMY), &CardId::from("guard"), Some(slot(ALLY)), false)
        .expect("guard");

    let report = battle.resolve_turn();

    assert_eq!(report.actions.len(), 1);
    let mass = &exchange(&report, ActionMode::Mass).mass[0];
    assert_eq!(mass.result, MassResult::Hit);
    assert_eq!((mass.attacker_total, mass.defender_total), (20, 10));
    assert_eq!(mass.entries.len(), 2);
    assert_eq!(mass.damage, 20);
    assert!(battle.slot_card(slot(ENEMY)).is_none());
}

#[test]
fn status_durations_tick_once_per_round_end() {
    let mut battle = battle(Vec::new(), 14);
    battle.apply_status(ENEMY, "burn", 2, 2, 0);
    battle.apply_status(ENEMY, "protection", 1, 1, 1);

    let first = battle.end_turn();
    let enemy = battle.unit(ENEMY).expect("enemy");
    assert_eq!(enemy.statuses.instances("burn")[0].remaining, 1);
    assert!(enemy.statuses.has("protection"));
    assert!(first.materialized.contains(&(ENEMY, "protection".to_owned())));

    let second = battle.end_turn();
    let enemy = battle.unit(ENEMY).expect("enemy");
    assert!(!enemy.statuses.has("burn"));
    assert!(second.expired.contains(&(ENEMY, "burn".to_owned())));
    assert!(enemy.pools.hp.current < Unit::DEFAULT_MAX_HP);
}

fn play_out(seed: u64) -> (Option<BattleOutcome>, Vec<(i32, i32)>) {
    let mut battle = battle(
        vec![
            card("strike", CardCategory::Melee, &[(DiceKind::Slash, 7), (DiceKind::Pierce, 5)]),
            Card::new("lunge", 0, CardCategory::Offensive)
                .with_die(clash_core::Die::new(DiceKind::Pierce, 3, 9)),
            Card::new("parry", 0, CardCategory::Melee)
                .with_die(clash_core::Die::new(DiceKind::Block, 2, 8))
                .with_die(clash_core::Die::new(DiceKind::Evade, 2, 6)),
        ],
        seed,
    );
    let cards = ["strike", "lunge", "parry"].map(CardId::from);
    let mut history = Vec::new();

    while battle.outcome().is_none() && battle.turn() < 200 {
        battle.begin_turn();
        for (unit, foe) in [(ALLY, ENEMY), (ENEMY, ALLY)] {
            let slots = battle.unit(unit).map_or(0, |unit| unit.slots.len());
            let foe_slots = battle.unit(foe).map_or(0, |unit| unit.slots.len());
            for index in 0..slots {
                let target = (foe_slots > 0).then(|| SlotRef::new(foe, index % foe_slots));
                let pick = &cards[(battle.turn() as usize + index + unit.0 as usize) % cards.len()];
                let _ = battle.assign_card(SlotRef::new(unit, index), pick, target, false);
            }
        }
        battle.resolve_turn();
        battle.end_turn();

        let hp = |id| battle.unit(id).map_or(0, |unit| unit.pools.get(ResourceKind::Hp).current);
        history.push((hp(ALLY), hp(ENEMY)));
    }
    (battle.outcome(), history)
}

#[test]
fn seeded_battles_replay_exactly_and_finish() {
    let (outcome, history) = play_out(2024);
    let (replayed, replayed_history) = play_out(2024);

    assert_eq!(outcome, replayed);
    assert_eq!(history, replayed_history);
    assert!(outcome.is_some(), "battle ran out of turns: {history:?}");
}
