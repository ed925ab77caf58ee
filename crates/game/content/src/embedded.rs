//! Default content compiled into the crate.
//!
//! Mirrors the files under `data/`, so a runner works without a data
//! directory on disk.

use clash_core::{Card, CombatConfig, PassiveDefinition};

use crate::loaders::{
    CardLoader, ConfigLoader, ContentBundle, LoadResult, PassiveLoader, UnitLoader, UnitTemplate,
};

const CARDS: &str = include_str!("../data/cards.ron");
const PASSIVES: &str = include_str!("../data/passives.ron");
const UNITS: &str = include_str!("../data/units.ron");
const CONFIG: &str = include_str!("../data/config.toml");

pub fn cards() -> LoadResult<Vec<Card>> {
    CardLoader::parse(CARDS, "embedded cards.ron")
}

pub fn passives() -> LoadResult<Vec<PassiveDefinition>> {
    PassiveLoader::parse(PASSIVES, "embedded passives.ron")
}

pub fn units() -> LoadResult<Vec<UnitTemplate>> {
    UnitLoader::parse(UNITS, "embedded units.ron")
}

pub fn config() -> LoadResult<CombatConfig> {
    ConfigLoader::parse(CONFIG)
}

/// The whole default content set.
pub fn bundle() -> LoadResult<ContentBundle> {
    Ok(ContentBundle::assemble(cards()?, passives()?, units()?, config()?))
}
