//! Turn scheduling: speed dice, card assignment, priority ordering and
//! round-end processing.
use std::cmp::Reverse;
use std::sync::Arc;

use super::Battle;
use super::dispatch::MechanicEvent;
use crate::card::{Card, CardId, Trigger};
use crate::config::CombatConfig;
use crate::combat::{ActionMode, ActionReport, ExchangeReport, RoundEndReport, TurnReport};
use crate::error::CombatError;
use crate::resolve::{MassTarget, resolve_clash, resolve_mass, resolve_one_sided};
use crate::rng::context;
use crate::stats::Stat;
use crate::unit::{Slot, SlotRef, UnitId};

/// One scheduled card play.
#[derive(Clone, Debug)]
pub struct PendingAction {
    pub actor: SlotRef,
    pub card: Arc<Card>,
    pub target: Option<SlotRef>,
    pub speed: i32,
    pub score: i64,
}

impl Battle {
    /// Starts a new turn and rolls speed dice into fresh slots. Returns the
    /// new turn number.
    pub fn begin_turn(&mut self) -> u32 {
        self.turn += 1;
        self.consumed.clear();

        let ids = self.unit_ids();
        let registry = Arc::clone(&self.registry);
        for id in &ids {
            let Some(unit) = self.units.get_mut(id) else {
                continue;
            };
            unit.recompute(&registry, &self.config);
            unit.counter_dice.clear();
            for passive_id in &unit.passives {
                if let Some(passive) = registry.passive(passive_id) {
                    unit.counter_dice
                        .extend(passive.counter_dice.iter().map(|die| die.fresh()));
                }
            }
        }

        for id in &ids {
            self.trigger_mechanics(*id, MechanicEvent::RoundStart);
        }
        for id in &ids {
            self.roll_speed_dice(*id);
        }

        tracing::info!(turn = self.turn, "turn started");
        self.turn
    }

    fn roll_speed_dice(&mut self, id: UnitId) {
        let Some(unit) = self.units.get(&id) else {
            return;
        };
        if !unit.can_act() {
            if let Some(unit) = self.units.get_mut(&id) {
                unit.slots.clear();
            }
            return;
        }

        let dice = unit.derived.speed;
        let modifiers = unit.modifiers().get(Stat::Speed);
        let count = dice.count.min(CombatConfig::MAX_SPEED_DICE);

        let mut speeds: Vec<i32> = (0..count)
            .map(|_| {
                let face = self.roll(id, context::SPEED_DIE, dice.min, dice.max);
                modifiers.apply(face).max(1)
            })
            .collect();
        speeds.sort_unstable_by_key(|speed| Reverse(*speed));

        if let Some(unit) = self.units.get_mut(&id) {
            unit.slots = speeds.into_iter().map(Slot::new).collect();
            tracing::debug!(unit = %id, slots = ?unit.slots.iter().map(|slot| slot.speed).collect::<Vec<_>>(), "speed rolled");
        }
    }

    /// Queues `card` into `slot`, replacing whatever was there.
    pub fn assign_card(
        &mut self,
        slot: SlotRef,
        card: &CardId,
        target: Option<SlotRef>,
        speed_break: bool,
    ) -> Result<(), CombatError> {
        if let Some(target) = target {
            let target_unit = self
                .units
                .get(&target.unit)
                .ok_or(CombatError::UnitNotFound(target.unit))?;
            // A unit without slots (staggered, stunned) is still targetable
            // at index 0.
            if target.index >= target_unit.slots.len().max(1) {
                return Err(CombatError::SlotOutOfRange {
                    slot: target,
                    available: target_unit.slots.len(),
                });
            }
        }
        if self.consumed.contains(&slot) {
            return Err(CombatError::SlotConsumed(slot));
        }

        let resolved = self.registry.card(card);
        let unit = self
            .units
            .get_mut(&slot.unit)
            .ok_or(CombatError::UnitNotFound(slot.unit))?;
        if !unit.can_act() {
            return Err(CombatError::UnitCannotAct(unit.id));
        }
        let available = unit.slots.len();
        let Some(previous) = unit.slot_mut(slot.index).map(|entry| entry.card.take()) else {
            return Err(CombatError::SlotOutOfRange { slot, available });
        };

        if !unit.is_card_available(card) {
            if let Some(entry) = unit.slot_mut(slot.index) {
                entry.card = previous;
            }
            return Err(CombatError::CardUnavailable {
                unit: slot.unit,
                card: card.clone(),
            });
        }

        if let Some(entry) = unit.slot_mut(slot.index) {
            entry.assign(resolved, target, speed_break);
        }
        tracing::debug!(%slot, card = %card, target = ?target, speed_break, "card assigned");
        Ok(())
    }

    /// Orders every queued card by priority and executes them in turn.
    pub fn resolve_turn(&mut self) -> TurnReport {
        let actions = self.collect_actions();
        let mut report = TurnReport {
            turn: self.turn,
            actions: Vec::with_capacity(actions.len()),
        };
        for action in actions {
            if let Some(action_report) = self.execute_action(&action) {
                report.actions.push(action_report);
            }
            if self.outcome().is_some() {
                break;
            }
        }
        report
    }

    /// Pending actions, highest score first.
    pub fn collect_actions(&mut self) -> Vec<PendingAction> {
        let scale = self.config.jitter_scale.max(1);
        let jitter_max = i32::try_from(scale - 1).unwrap_or(i32::MAX);

        let mut queued = Vec::new();
        for unit in self.units.values().filter(|unit| unit.can_act()) {
            for (index, slot) in unit.slots.iter().enumerate() {
                if let Some(card) = &slot.card {
                    queued.push((unit.slot_ref(index), Arc::clone(card), slot.target, slot.speed));
                }
            }
        }

        let mut actions: Vec<PendingAction> = queued
            .into_iter()
            .map(|(actor, card, target, speed)| {
                let priority = self.config.priorities.for_category(card.category);
                let jitter = self.roll(actor.unit, context::JITTER, 0, jitter_max);
                PendingAction {
                    actor,
                    score: (priority + i64::from(speed)) * scale + i64::from(jitter),
                    card,
                    target,
                    speed,
                }
            })
            .collect();
        actions.sort_by(|a, b| b.score.cmp(&a.score).then(a.actor.cmp(&b.actor)));
        actions
    }

    fn execute_action(&mut self, action: &PendingAction) -> Option<ActionReport> {
        let actor = action.actor;
        if self.is_consumed(actor) {
            return None;
        }
        if !self.units.get(&actor.unit).is_some_and(|unit| unit.can_act()) {
            return None;
        }
        let card = self.slot_card(actor)?;

        self.mark_consumed(actor);
        let target_unit = action.target.map(|target| target.unit);
        self.process_card_self_scripts(Trigger::OnUse, &card, actor.unit, target_unit);
        self.push_cooldown(actor.unit, &card);

        let (mode, exchange) = if card.category.is_instant() {
            (ActionMode::Instant, ExchangeReport::default())
        } else if card.category.is_mass() {
            let targets = self.mass_targets(actor.unit, action.target);
            (ActionMode::Mass, resolve_mass(self, actor, &targets))
        } else {
            match action.target {
                Some(target) if self.is_alive(target.unit) => self.engage(actor, target),
                _ => (
                    ActionMode::OneSided { redirected: false },
                    ExchangeReport::default(),
                ),
            }
        };

        tracing::info!(
            actor = %actor,
            card = %card.id,
            target = ?action.target,
            mode = ?mode,
            dice = exchange.dice().count(),
            "action resolved"
        );
        Some(ActionReport {
            actor,
            target: action.target,
            card: card.id.clone(),
            mode,
            exchange,
        })
    }

    /// Clash when the target slot holds a clashable card, one-sided
    /// otherwise.
    fn engage(&mut self, actor: SlotRef, target: SlotRef) -> (ActionMode, ExchangeReport) {
        if self.is_consumed(target) {
            return (
                ActionMode::OneSided { redirected: true },
                resolve_one_sided(self, actor, target, true),
            );
        }

        let defender_card = self.slot_card(target);
        let defender_ready = self.units.get(&target.unit).is_some_and(|unit| unit.can_act());
        match defender_card {
            Some(card) if defender_ready && card.is_clashable() => {
                self.mark_consumed(target);
                self.process_card_self_scripts(Trigger::OnUse, &card, target.unit, Some(actor.unit));
                self.push_cooldown(target.unit, &card);
                (ActionMode::Clash, resolve_clash(self, actor, target))
            }
            _ => (
                ActionMode::OneSided { redirected: false },
                resolve_one_sided(self, actor, target, false),
            ),
        }
    }

    fn push_cooldown(&mut self, unit: UnitId, card: &Card) {
        if let Some(unit) = self.units.get_mut(&unit) {
            unit.cooldowns.push(&card.id, card.cooldown());
        }
    }

    /// The chosen primary target plus every other living opponent.
    fn mass_targets(&self, attacker: UnitId, primary: Option<SlotRef>) -> Vec<MassTarget> {
        let Some(side) = self.units.get(&attacker).map(|unit| unit.side) else {
            return Vec::new();
        };
        let mut targets: Vec<MassTarget> = primary
            .filter(|slot| self.is_alive(slot.unit))
            .map(|slot| MassTarget {
                unit: slot.unit,
                slot: Some(slot.index),
            })
            .into_iter()
            .collect();
        for unit in self.living(side.opposite()) {
            if primary.is_some_and(|slot| slot.unit == unit.id) {
                continue;
            }
            targets.push(MassTarget {
                unit: unit.id,
                slot: None,
            });
        }
        targets
    }

    /// Round-end processing: status hooks, durations, delayed statuses,
    /// cooldowns and stagger recovery.
    pub fn end_turn(&mut self) -> RoundEndReport {
        let mut report = RoundEndReport {
            turn: self.turn,
            ..RoundEndReport::default()
        };
        let ids = self.unit_ids();
        for id in &ids {
            self.trigger_mechanics(*id, MechanicEvent::RoundEnd);
        }

        let recovery_turns = self.config.stagger_recovery_turns.max(1);
        let registry = Arc::clone(&self.registry);
        for id in &ids {
            let Some(unit) = self.units.get_mut(id) else {
                continue;
            };
            for status in unit.statuses.tick_round_end() {
                report.expired.push((*id, status));
            }
            for delayed in unit.delayed.tick(&mut unit.statuses) {
                report.materialized.push((*id, delayed.status));
            }
            unit.cooldowns.tick();

            let timer = unit.stagger_recovery;
            unit.stagger_recovery = match timer {
                _ if !unit.is_staggered() => None,
                None => Some(recovery_turns),
                Some(turns) if turns <= 1 => {
                    unit.pools.stagger.refill();
                    report.recovered.push(*id);
                    None
                }
                Some(turns) => Some(turns - 1),
            };

            unit.slots.clear();
            unit.recompute(&registry, &self.config);
        }
        self.consumed.clear();

        tracing::info!(
            turn = self.turn,
            expired = report.expired.len(),
            recovered = report.recovered.len(),
            "turn ended"
        );
        report
    }
}
