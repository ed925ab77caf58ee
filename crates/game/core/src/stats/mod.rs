//! Stat system.
//!
//! Converts a unit's base attributes, skills, equipment, passives and active
//! statuses into a flat + percentage [`ModifierMap`] consumed by every other
//! component (rolls, damage, speed, pool maxima).
//!
//! ## Modifier formula
//!
//! `modified_value(base, stat) = floor((base + flat) * (100 + percentage) / 100)`
//!
//! Unknown stat names read as `{flat: 0, percentage: 0}`, never an error.

pub mod attributes;
pub mod bonus;
pub mod modifier;
pub mod pipeline;
pub mod resources;
pub mod speed;

pub use attributes::{Attribute, Attributes, Ratings, Skill, Skills};
pub use bonus::{Bonus, BonusStack, BonusTarget};
pub use modifier::{ModifierMap, Stat, StatModifier};
pub use pipeline::{DerivedStats, compute_derived};
pub use resources::{Pools, ResourceKind, ResourceMeter};
pub use speed::SpeedDice;
