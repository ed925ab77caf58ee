//! Data-driven battle content and loaders.
//!
//! This crate houses the default card, passive and unit catalogs and provides
//! loaders for RON/TOML data files:
//! - Card catalogs (`cards.ron`)
//! - Passive abilities (`passives.ron`)
//! - Unit rosters (`units.ron`)
//! - Combat configuration (`config.toml`)
//!
//! Loaded content is frozen into an immutable [`clash_core::ContentRegistry`]
//! and never changes during a battle.

#[cfg(feature = "loaders")]
pub mod embedded;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CardLoader, ConfigLoader, ContentBundle, ContentFactory, LoadResult, PassiveLoader,
    UnitLoader, UnitTemplate,
};
