//! Per-card cooldown timers.
//!
//! Each play of a card pushes its own timer, so several copies of the same
//! card can cool down concurrently. A card is unavailable while the number of
//! running timers plus assigned copies reaches the number of copies in the
//! deck.
use std::collections::BTreeMap;

use crate::card::CardId;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawCooldowns"))]
pub struct Cooldowns {
    timers: BTreeMap<CardId, Vec<u32>>,
}

impl Cooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a timer of `turns` for `card`. Zero-length cooldowns are ignored.
    pub fn push(&mut self, card: &CardId, turns: u32) {
        if turns == 0 {
            return;
        }
        self.timers.entry(card.clone()).or_default().push(turns);
    }

    /// Ends one turn: every timer counts down, finished timers drop.
    pub fn tick(&mut self) {
        for timers in self.timers.values_mut() {
            for timer in timers.iter_mut() {
                *timer = timer.saturating_sub(1);
            }
            timers.retain(|timer| *timer > 0);
        }
        self.timers.retain(|_, timers| !timers.is_empty());
    }

    /// Number of copies of `card` currently cooling down.
    pub fn cooling(&self, card: &CardId) -> usize {
        self.timers.get(card).map_or(0, Vec::len)
    }

    pub fn remaining(&self, card: &CardId) -> &[u32] {
        self.timers.get(card).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CardId, &[u32])> {
        self.timers.iter().map(|(card, timers)| (card, timers.as_slice()))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Cooldowns {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.timers.iter())
    }
}

/// Accepted persisted shapes. Anything else normalizes to "no cooldowns".
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawCooldowns {
    Map(BTreeMap<CardId, CooldownRepr>),
    Malformed(serde::de::IgnoredAny),
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum CooldownRepr {
    /// Legacy single remaining-turns value.
    Single(i64),
    Timers(Vec<i64>),
    Malformed(serde::de::IgnoredAny),
}

#[cfg(feature = "serde")]
impl CooldownRepr {
    fn into_timers(self) -> Vec<u32> {
        let values = match self {
            Self::Single(value) => vec![value],
            Self::Timers(values) => values,
            Self::Malformed(_) => Vec::new(),
        };
        values
            .into_iter()
            .filter(|value| *value > 0)
            .map(|value| value.min(i64::from(u32::MAX)) as u32)
            .collect()
    }
}

#[cfg(feature = "serde")]
impl From<RawCooldowns> for Cooldowns {
    fn from(raw: RawCooldowns) -> Self {
        let RawCooldowns::Map(entries) = raw else {
            tracing::warn!("malformed cooldown data normalized to empty");
            return Self::default();
        };
        let timers = entries
            .into_iter()
            .map(|(card, repr)| (card, repr.into_timers()))
            .filter(|(_, timers)| !timers.is_empty())
            .collect();
        Self { timers }
    }
}
