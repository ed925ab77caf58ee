//! Base attributes and skills.
//!
//! Both are sparse maps with a default of zero so that content only has to
//! list the ratings a unit actually has.
use std::collections::BTreeMap;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Attribute {
    Strength,
    Endurance,
    Agility,
    Wisdom,
    Psyche,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Skill {
    Speed,
    Offense,
    Defense,
    Evasion,
    Fortitude,
}

/// Sparse rating map keyed by [`Attribute`] or [`Skill`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Ratings<K: Ord> {
    values: BTreeMap<K, i32>,
}

pub type Attributes = Ratings<Attribute>;
pub type Skills = Ratings<Skill>;

impl<K: Ord> Default for Ratings<K> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> Ratings<K> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: K, value: i32) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: K) -> i32 {
        self.values.get(&key).copied().unwrap_or(0)
    }

    pub fn set(&mut self, key: K, value: i32) {
        self.values.insert(key, value);
    }

    pub fn add(&mut self, key: K, delta: i32) {
        let entry = self.values.entry(key).or_insert(0);
        *entry = entry.saturating_add(delta);
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, i32)> + '_ {
        self.values.iter().map(|(key, value)| (*key, *value))
    }
}

impl<K: Ord + Copy> FromIterator<(K, i32)> for Ratings<K> {
    fn from_iter<I: IntoIterator<Item = (K, i32)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
