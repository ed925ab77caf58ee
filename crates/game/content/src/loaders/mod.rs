//! Content loaders for reading battle data from files.
//!
//! Each loader reads one file format into core types. [`ContentFactory`]
//! ties them together for a whole data directory.

pub mod cards;
pub mod config;
pub mod factory;
pub mod passives;
pub mod units;

pub use cards::CardLoader;
pub use config::ConfigLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use passives::PassiveLoader;
pub use units::{UnitLoader, UnitTemplate};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses a RON document, naming `source` in the error.
pub(crate) fn parse_ron<T: serde::de::DeserializeOwned>(content: &str, source: &str) -> LoadResult<T> {
    ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", source, e))
}
