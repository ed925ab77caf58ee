//! Deterministic combat rules for the card-and-dice battle simulator.
//!
//! `clash-core` defines the canonical rules (stat pipeline, status engine,
//! damage pipeline, clash / one-sided / mass resolution, turn scheduling) and
//! exposes synchronous APIs driven by an orchestrating session. All unit
//! mutation during a turn flows through [`engine::Battle`], and supporting
//! crates depend on the types re-exported here.
pub mod card;
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
#[cfg(feature = "serde")]
pub mod persist;
pub mod registry;
pub mod resolve;
pub mod rng;
pub mod stats;
pub mod status;
pub mod unit;

#[cfg(test)]
pub(crate) mod testing;

pub use card::{
    Card, CardCategory, CardFlag, CardId, DamageKind, DiceKind, Die, ParamValue, ScriptCall,
    ScriptParams, ScriptTable, Trigger,
};
pub use combat::{
    ActionMode, ActionReport, ClashEffect, ClashSide, DieReport, DieResult, ExchangeEntry,
    ExchangeReport, HitOutcome, MassReport, MassResult, RollContext, RollModifier, RollSummary,
    RoundEndReport, TurnReport, Verdict,
};
pub use config::{CategoryPriorities, CombatConfig};
pub use engine::{Battle, BattleOutcome, MechanicEvent, PendingAction, Script, ScriptContext};
pub use error::{CombatError, ErrorContext, ErrorSeverity, GameError};
#[cfg(feature = "serde")]
pub use persist::{SlotRecord, UnitRecord};
pub use registry::{ContentRegistry, RegistryBuilder};
pub use resolve::{MassTarget, ParticipantState};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use stats::{
    Attribute, Attributes, Bonus, BonusStack, BonusTarget, DerivedStats, ModifierMap,
    ResourceKind, ResourceMeter, Pools, Skill, Skills, SpeedDice, Stat, StatModifier,
};
pub use status::{
    DamageDirection, DelayedQueue, DelayedStatus, StatusContext, StatusEffect, StatusPolarity,
    StatusStack, StatusStacks,
};
pub use unit::{
    Capabilities, Cooldowns, MechanicsProvider, PassiveDefinition, Resistance, ResistanceTable,
    Resistances, Side, Slot, SlotRef, Unit, UnitId,
};
