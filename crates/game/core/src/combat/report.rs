//! Structured reports returned by the resolvers and the scheduler.
//!
//! Reports are data only. Formatting them for players is left to the caller.

use super::roll::RollContext;
use crate::card::{CardId, DiceKind, Die};
use crate::unit::{SlotRef, UnitId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum DieResult {
    Win,
    Lose,
    Draw,
    /// Struck with nothing in the way.
    Unopposed,
    /// Destroyed by a lost speed roll (or nulled by stagger).
    Broken,
    /// Moved to the stored reserve.
    Stored,
    /// Counter die that found nothing to react to and was kept.
    Preserved,
    /// Counter die that may not initiate.
    Skipped,
    /// Undefeated counter die discarded at exchange end.
    Burned,
    /// Both sides defensive; consumed without effect.
    Defensive,
    /// Unopposed block; nothing happens.
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DieReport {
    pub unit: UnitId,
    pub kind: DiceKind,
    pub counter: bool,
    /// Final value when the die was rolled.
    pub value: Option<i32>,
    pub result: DieResult,
    /// HP damage this die dealt.
    pub damage: i32,
    /// Stagger damage this die dealt (side damage included).
    pub stagger_damage: i32,
    /// Stagger this die restored to its owner.
    pub stagger_restored: i32,
}

impl DieReport {
    pub fn rolled(roll: &RollContext, result: DieResult) -> Self {
        Self {
            unit: roll.source,
            kind: roll.die.kind,
            counter: roll.die.counter,
            value: Some(roll.value()),
            result,
            damage: 0,
            stagger_damage: 0,
            stagger_restored: 0,
        }
    }

    pub fn unrolled(unit: UnitId, die: &Die, result: DieResult) -> Self {
        Self {
            unit,
            kind: die.kind,
            counter: die.counter,
            value: None,
            result,
            damage: 0,
            stagger_damage: 0,
            stagger_restored: 0,
        }
    }

    pub fn with_hit(mut self, hit: HitOutcome) -> Self {
        self.damage += hit.damage;
        self.stagger_damage += hit.stagger_damage;
        self.stagger_restored += hit.stagger_restored;
        self
    }
}

/// What one die's effect amounted to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HitOutcome {
    pub damage: i32,
    pub stagger_damage: i32,
    pub stagger_restored: i32,
}

/// One sub-round: left / attacker die and, when present, the right /
/// defender die.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExchangeEntry {
    pub left: Option<DieReport>,
    pub right: Option<DieReport>,
}

impl ExchangeEntry {
    pub fn pair(left: DieReport, right: DieReport) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
        }
    }

    pub fn left(report: DieReport) -> Self {
        Self {
            left: Some(report),
            right: None,
        }
    }

    pub fn right(report: DieReport) -> Self {
        Self {
            left: None,
            right: Some(report),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum MassResult {
    Hit,
    Defended,
    Draw,
    Unopposed,
}

/// Mass attack outcome against one target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MassReport {
    pub target: UnitId,
    pub slot: Option<usize>,
    pub result: MassResult,
    pub attacker_total: i32,
    pub defender_total: i32,
    pub damage: i32,
    /// Per-die comparisons (individual mode) or per-die hits (summation).
    pub entries: Vec<ExchangeEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExchangeReport {
    pub entries: Vec<ExchangeEntry>,
    pub mass: Vec<MassReport>,
    /// Leftover dice handled at exchange end.
    pub cleanup: Vec<DieReport>,
    /// Iteration cap reached.
    pub truncated: bool,
}

impl ExchangeReport {
    pub fn push(&mut self, entry: ExchangeEntry) {
        self.entries.push(entry);
    }

    /// Every die report in entry order, then cleanup.
    pub fn dice(&self) -> impl Iterator<Item = &DieReport> {
        self.entries
            .iter()
            .flat_map(|entry| entry.left.iter().chain(entry.right.iter()))
            .chain(self.mass.iter().flat_map(|mass| {
                mass.entries
                    .iter()
                    .flat_map(|entry| entry.left.iter().chain(entry.right.iter()))
            }))
            .chain(self.cleanup.iter())
    }

    pub fn total_damage_to(&self, unit: UnitId) -> i32 {
        self.dice()
            .filter(|die| die.unit != unit)
            .map(|die| die.damage)
            .sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case", tag = "mode")
)]
pub enum ActionMode {
    Clash,
    OneSided { redirected: bool },
    Mass,
    Instant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionReport {
    pub actor: SlotRef,
    pub target: Option<SlotRef>,
    pub card: CardId,
    pub mode: ActionMode,
    pub exchange: ExchangeReport,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub turn: u32,
    pub actions: Vec<ActionReport>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundEndReport {
    pub turn: u32,
    /// `(unit, status)` pairs whose last instance expired.
    pub expired: Vec<(UnitId, String)>,
    /// `(unit, status)` pairs instantiated from the delayed queue.
    pub materialized: Vec<(UnitId, String)>,
    pub recovered: Vec<UnitId>,
}
