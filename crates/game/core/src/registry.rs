//! Immutable content registry.
//!
//! Built once with [`RegistryBuilder`], then shared as
//! `Arc<ContentRegistry>` by every battle. Nothing mutates it at runtime.
//! Lookups never fail: unknown cards and statuses resolve to inert
//! stand-ins (with a warning), unknown scripts and passives to `None`.
use std::collections::HashMap;
use std::sync::Arc;

use crate::card::{Card, CardId};
use crate::engine::{Script, builtin_scripts};
use crate::status::builtin::builtin_statuses;
use crate::status::{InertStatus, StatusEffect};
use crate::unit::PassiveDefinition;

pub struct ContentRegistry {
    cards: HashMap<CardId, Arc<Card>>,
    statuses: HashMap<String, Arc<dyn StatusEffect>>,
    scripts: HashMap<String, Arc<dyn Script>>,
    passives: HashMap<String, Arc<PassiveDefinition>>,
}

impl ContentRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Built-in statuses and scripts, no cards or passives.
    pub fn builtin() -> Self {
        Self::builder().with_builtins().build()
    }

    pub fn find_card(&self, id: &CardId) -> Option<Arc<Card>> {
        self.cards.get(id).cloned()
    }

    /// Card by id, or an inert placeholder.
    pub fn card(&self, id: &CardId) -> Arc<Card> {
        match self.cards.get(id) {
            Some(card) => Arc::clone(card),
            None => {
                tracing::warn!(card = %id, "unknown card resolved to placeholder");
                Arc::new(Card::placeholder(id.clone()))
            }
        }
    }

    /// Status by id, or an inert status.
    pub fn status(&self, id: &str) -> Arc<dyn StatusEffect> {
        match self.statuses.get(id) {
            Some(status) => Arc::clone(status),
            None => {
                tracing::warn!(status = id, "unknown status resolved to inert");
                Arc::new(InertStatus::new(id))
            }
        }
    }

    pub fn has_status(&self, id: &str) -> bool {
        self.statuses.contains_key(id)
    }

    pub fn script(&self, id: &str) -> Option<Arc<dyn Script>> {
        self.scripts.get(id).cloned()
    }

    pub fn passive(&self, id: &str) -> Option<Arc<PassiveDefinition>> {
        self.passives.get(id).cloned()
    }

    pub fn cards(&self) -> impl Iterator<Item = &Arc<Card>> {
        self.cards.values()
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn passive_count(&self) -> usize {
        self.passives.len()
    }
}

impl core::fmt::Debug for ContentRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ContentRegistry")
            .field("cards", &self.cards.len())
            .field("statuses", &self.statuses.len())
            .field("scripts", &self.scripts.len())
            .field("passives", &self.passives.len())
            .finish()
    }
}

#[derive(Default)]
pub struct RegistryBuilder {
    cards: HashMap<CardId, Arc<Card>>,
    statuses: HashMap<String, Arc<dyn StatusEffect>>,
    scripts: HashMap<String, Arc<dyn Script>>,
    passives: HashMap<String, Arc<PassiveDefinition>>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn with_builtins(mut self) -> Self {
        for status in builtin_statuses() {
            self.statuses.insert(status.id().to_owned(), status);
        }
        for script in builtin_scripts() {
            self.scripts.insert(script.id().to_owned(), script);
        }
        self
    }

    #[must_use]
    pub fn card(mut self, card: Card) -> Self {
        if self.cards.contains_key(&card.id) {
            tracing::warn!(card = %card.id, "duplicate card id replaced");
        }
        self.cards.insert(card.id.clone(), Arc::new(card));
        self
    }

    #[must_use]
    pub fn cards(self, cards: impl IntoIterator<Item = Card>) -> Self {
        cards.into_iter().fold(self, Self::card)
    }

    #[must_use]
    pub fn status(mut self, status: Arc<dyn StatusEffect>) -> Self {
        self.statuses.insert(status.id().to_owned(), status);
        self
    }

    #[must_use]
    pub fn script(mut self, script: Arc<dyn Script>) -> Self {
        self.scripts.insert(script.id().to_owned(), script);
        self
    }

    #[must_use]
    pub fn passive(mut self, passive: PassiveDefinition) -> Self {
        self.passives.insert(passive.id.clone(), Arc::new(passive));
        self
    }

    #[must_use]
    pub fn passives(self, passives: impl IntoIterator<Item = PassiveDefinition>) -> Self {
        passives.into_iter().fold(self, Self::passive)
    }

    pub fn build(self) -> ContentRegistry {
        ContentRegistry {
            cards: self.cards,
            statuses: self.statuses,
            scripts: self.scripts,
            passives: self.passives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardCategory;
    use crate::status::builtin::ids;

    #[test]
    fn unknown_lookups_resolve_to_inert_stand_ins() {
        let registry = ContentRegistry::builder()
            .with_builtins()
            .card(Card::new("strike", 1, CardCategory::Melee))
            .build();

        assert_eq!(registry.card(&CardId::from("strike")).tier, 1);

        let missing = registry.card(&CardId::from("nope"));
        assert_eq!(missing.tier, 0);
        assert!(missing.dice.is_empty());
        assert!(registry.find_card(&CardId::from("nope")).is_none());

        assert!(registry.has_status(ids::BURN));
        assert_eq!(registry.status("mystery").id(), "mystery");
        assert!(registry.script("mystery").is_none());
        assert!(registry.script("power").is_some());
    }
}
