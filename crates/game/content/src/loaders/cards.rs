//! Card catalog loader.

use std::collections::HashSet;
use std::path::Path;

use clash_core::{Card, CardFlag};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Loader for card catalogs from RON files.
///
/// RON format: `Vec<Card>`
///
/// ```ron
/// [
///     (
///         id: "light_attack",
///         name: "Light Attack",
///         tier: 1,
///         category: melee,
///         dice: [(kind: slash, min: 3, max: 7)],
///     ),
/// ]
/// ```
pub struct CardLoader;

impl CardLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<Card>> {
        let content = read_file(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parses and validates a card catalog.
    ///
    /// Rejects duplicate ids and dice whose range is inverted. Unrecognised
    /// flags are kept as [`CardFlag::Unknown`] and logged.
    pub fn parse(content: &str, source: &str) -> LoadResult<Vec<Card>> {
        let cards: Vec<Card> = parse_ron(content, source)?;

        let mut seen = HashSet::new();
        for card in &cards {
            if !seen.insert(card.id.clone()) {
                anyhow::bail!("{}: duplicate card id '{}'", source, card.id);
            }
            if let Some((index, die)) = card.dice.iter().enumerate().find(|(_, die)| die.min > die.max) {
                anyhow::bail!(
                    "{}: card '{}' die {} has min {} above max {}",
                    source,
                    card.id,
                    index,
                    die.min,
                    die.max
                );
            }
            if card.has_flag(CardFlag::Unknown) {
                tracing::warn!(card = %card.id, source, "card carries unrecognised flags");
            }
        }

        tracing::debug!(source, cards = cards.len(), "card catalog loaded");
        Ok(cards)
    }
}
