use crate::card::{DiceKind, Die};
use crate::unit::UnitId;

/// One entry of a roll's modifier log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollModifier {
    pub amount: i32,
    pub reason: String,
}

/// Snapshot of the opposing roll in the same duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollSummary {
    pub unit: UnitId,
    pub kind: DiceKind,
    pub value: i32,
    pub counter: bool,
}

/// Ephemeral evaluation of one die. Created fresh per roll, never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RollContext {
    pub source: UnitId,
    pub target: Option<UnitId>,
    pub die: Die,
    /// Raw face before modifiers.
    pub base: i32,
    /// Running total; may go negative, read through [`RollContext::value`].
    pub total: i32,
    pub modifiers: Vec<RollModifier>,
    /// Percent, 100 = unchanged.
    pub damage_multiplier: i32,
    pub critical: bool,
    pub disadvantage: bool,
    pub opponent: Option<RollSummary>,
}

impl RollContext {
    pub fn new(source: UnitId, target: Option<UnitId>, die: Die, base: i32) -> Self {
        Self {
            source,
            target,
            die,
            base,
            total: base,
            modifiers: Vec::new(),
            damage_multiplier: 100,
            critical: false,
            disadvantage: false,
            opponent: None,
        }
    }

    pub fn kind(&self) -> DiceKind {
        self.die.kind
    }

    /// Final value used for comparisons and damage. Never negative.
    pub fn value(&self) -> i32 {
        self.total.max(0)
    }

    pub fn add_modifier(&mut self, amount: i32, reason: &str) {
        if amount == 0 {
            return;
        }
        self.total = self.total.saturating_add(amount);
        self.modifiers.push(RollModifier {
            amount,
            reason: reason.to_owned(),
        });
    }

    /// Replaces the raw face; the difference is logged as a modifier.
    pub fn override_base(&mut self, value: i32, reason: &str) {
        let delta = value - self.base;
        self.base = value;
        self.add_modifier(delta, reason);
    }

    pub fn add_damage_percent(&mut self, percent: i32) {
        self.damage_multiplier = self.damage_multiplier.saturating_add(percent);
    }

    pub fn summary(&self) -> RollSummary {
        RollSummary {
            unit: self.source,
            kind: self.die.kind,
            value: self.value(),
            counter: self.die.counter,
        }
    }

    /// Records each roll as the other's opponent.
    pub fn link(left: &mut Self, right: &mut Self) {
        left.opponent = Some(right.summary());
        right.opponent = Some(left.summary());
    }

    /// Copy aimed at another target (mass attacks roll once per action).
    pub fn retarget(&self, target: UnitId) -> Self {
        Self {
            target: Some(target),
            opponent: None,
            ..self.clone()
        }
    }
}
