//! Combat configuration loader.

use std::path::Path;

use clash_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        if config.clash_iteration_cap == 0 || config.one_sided_iteration_cap == 0 {
            anyhow::bail!("iteration caps must be positive");
        }
        if config.jitter_scale <= 0 {
            anyhow::bail!("jitter_scale must be positive, got {}", config.jitter_scale);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let config = ConfigLoader::parse(
            r#"
            clash_iteration_cap = 10
            side_damage = false

            [priorities]
            mass = 350
            "#,
        )
        .expect("valid config");

        assert_eq!(config.clash_iteration_cap, 10);
        assert!(!config.side_damage);
        assert_eq!(config.priorities.mass, 350);
        assert_eq!(config.priorities.instant, 400);
        assert_eq!(
            config.one_sided_iteration_cap,
            CombatConfig::DEFAULT_ONE_SIDED_ITERATION_CAP
        );
    }

    #[test]
    fn rejects_zero_caps() {
        assert!(ConfigLoader::parse("clash_iteration_cap = 0").is_err());
    }
}
