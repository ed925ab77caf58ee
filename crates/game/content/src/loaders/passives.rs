//! Passive ability loader.

use std::path::Path;

use clash_core::PassiveDefinition;

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Loader for passive abilities from RON files.
///
/// RON format: `Vec<PassiveDefinition>`. Counter dice listed on a passive are
/// always counters, whether or not the file says so.
pub struct PassiveLoader;

impl PassiveLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<PassiveDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn parse(content: &str, source: &str) -> LoadResult<Vec<PassiveDefinition>> {
        let mut passives: Vec<PassiveDefinition> = parse_ron(content, source)?;
        for passive in &mut passives {
            for die in &mut passive.counter_dice {
                die.counter = true;
            }
        }
        tracing::debug!(source, passives = passives.len(), "passives loaded");
        Ok(passives)
    }
}
