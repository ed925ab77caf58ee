//! Runner configuration.
use std::env;
use std::path::PathBuf;

/// Headless runner settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Content directory; the embedded default content when unset.
    pub data_dir: Option<PathBuf>,
    pub seed: u64,
    /// Turn limit after which the battle is abandoned undecided.
    pub max_turns: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed: 0x5eed,
            max_turns: 100,
        }
    }
}

impl SimConfig {
    /// Construct runner configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CLASH_DATA_DIR` - Content directory (default: embedded content)
    /// - `CLASH_SEED` - Battle seed (default: 0x5eed)
    /// - `CLASH_MAX_TURNS` - Turn limit (default: 100, minimum 1)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("CLASH_DATA_DIR").filter(|dir| !dir.trim().is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(seed) = parse(&lookup, "CLASH_SEED") {
            config.seed = seed;
        }
        if let Some(turns) = parse::<u32>(&lookup, "CLASH_MAX_TURNS") {
            config.max_turns = turns.max(1);
        }

        config
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable environment value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_owned())
        }
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(SimConfig::from_lookup(lookup(&[])), SimConfig::default());
    }

    #[test]
    fn reads_and_sanitizes_values() {
        let config = SimConfig::from_lookup(lookup(&[
            ("CLASH_DATA_DIR", "content/"),
            ("CLASH_SEED", " 42 "),
            ("CLASH_MAX_TURNS", "0"),
        ]));
        assert_eq!(config.data_dir, Some(PathBuf::from("content/")));
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_turns, 1);

        let config = SimConfig::from_lookup(lookup(&[("CLASH_SEED", "many")]));
        assert_eq!(config.seed, SimConfig::default().seed);
    }
}
