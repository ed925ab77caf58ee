//! Content factory for building a registry from data files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clash_core::{Card, CombatConfig, ContentRegistry, PassiveDefinition};

use crate::loaders::{
    CardLoader, ConfigLoader, LoadResult, PassiveLoader, UnitLoader, UnitTemplate,
};

/// Everything a battle needs from content.
#[derive(Debug)]
pub struct ContentBundle {
    pub registry: Arc<ContentRegistry>,
    pub config: CombatConfig,
    pub units: Vec<UnitTemplate>,
}

impl ContentBundle {
    /// Freezes cards and passives into a registry on top of the builtin
    /// statuses and scripts. Unit references the registry cannot resolve are
    /// logged; they still load as placeholders at battle time.
    pub fn assemble(
        cards: Vec<Card>,
        passives: Vec<PassiveDefinition>,
        units: Vec<UnitTemplate>,
        config: CombatConfig,
    ) -> Self {
        let registry = ContentRegistry::builder()
            .with_builtins()
            .cards(cards)
            .passives(passives)
            .build();
        for unit in &units {
            for missing in unit.missing_content(&registry) {
                tracing::warn!(unit = %unit.key, missing = %missing, "unit references unknown content");
            }
        }
        tracing::info!(
            cards = registry.card_count(),
            passives = registry.passive_count(),
            units = units.len(),
            "content loaded"
        );
        Self {
            registry: Arc::new(registry),
            config,
            units,
        }
    }
}

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml     (optional)
/// ├── cards.ron
/// ├── passives.ron    (optional)
/// └── units.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`, or defaults when the
    /// file is absent.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the card catalog from `cards.ron`.
    pub fn load_cards(&self) -> LoadResult<Vec<Card>> {
        CardLoader::load(&self.data_dir.join("cards.ron"))
    }

    /// Load passives from `passives.ron`, or none when the file is absent.
    pub fn load_passives(&self) -> LoadResult<Vec<PassiveDefinition>> {
        let path = self.data_dir.join("passives.ron");
        if !path.exists() {
            return Ok(Vec::new());
        }
        PassiveLoader::load(&path)
    }

    /// Load the unit roster from `units.ron`.
    pub fn load_units(&self) -> LoadResult<Vec<UnitTemplate>> {
        UnitLoader::load(&self.data_dir.join("units.ron"))
    }

    /// Loads every file and freezes the result.
    pub fn load_bundle(&self) -> LoadResult<ContentBundle> {
        if !self.data_dir.is_dir() {
            anyhow::bail!("Content data directory not found: {}", self.data_dir.display());
        }
        Ok(ContentBundle::assemble(
            self.load_cards()?,
            self.load_passives()?,
            self.load_units()?,
            self.load_config()?,
        ))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clash_core::CardId;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).expect("write data file");
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_a_minimal_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        write(
            dir.path(),
            "cards.ron",
            r#"[(id: "jab", tier: 1, category: melee, dice: [(kind: slash, min: 2, max: 4)])]"#,
        );
        write(
            dir.path(),
            "units.ron",
            r#"[(key: "a", name: "A", side: ally, deck: ["jab"])]"#,
        );

        let bundle = ContentFactory::new(dir.path()).load_bundle().expect("bundle");
        assert!(bundle.registry.find_card(&CardId::from("jab")).is_some());
        assert_eq!(bundle.registry.passive_count(), 0);
        assert_eq!(bundle.config, CombatConfig::default());
        assert_eq!(bundle.units.len(), 1);
    }

    #[test]
    fn errors_name_the_failing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        write(dir.path(), "cards.ron", "[(id: ");
        write(dir.path(), "units.ron", "[]");

        let error = ContentFactory::new(dir.path())
            .load_bundle()
            .expect_err("broken catalog");
        assert!(error.to_string().contains("cards.ron"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("nope");
        assert!(ContentFactory::new(missing).load_bundle().is_err());
    }
}
