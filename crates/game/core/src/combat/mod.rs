//! Combat primitives shared by the resolvers.
//!
//! - [`roll`]: per-die evaluation context
//! - [`damage`]: pure damage pipeline
//! - [`outcome`]: clash judgement table
//! - [`report`]: structured exchange / turn reports

pub mod damage;
pub mod outcome;
pub mod report;
pub mod roll;

pub use damage::{DamageBreakdown, DamageInput, calculate_damage, scale_sp_damage};
pub use outcome::{ClashEffect, ClashSide, Verdict, both_defensive, judge, win_effect};
pub use report::{
    ActionMode, ActionReport, DieReport, DieResult, ExchangeEntry, ExchangeReport, HitOutcome,
    MassReport, MassResult, RoundEndReport, TurnReport,
};
pub use roll::{RollContext, RollModifier, RollSummary};
