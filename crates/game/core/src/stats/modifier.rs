//! Flat + percentage stat modifiers and the lookup-with-default modifier map.
use std::collections::BTreeMap;
use std::str::FromStr;

/// Every stat the modifier pipeline can adjust.
///
/// Names are the snake_case strings used in content data (`"slash_power"`).
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
pub enum Stat {
    MaxHp,
    MaxSp,
    MaxStagger,
    /// Applies to every die.
    Power,
    OffensivePower,
    DefensivePower,
    SlashPower,
    PiercePower,
    BluntPower,
    BlockPower,
    EvadePower,
    DamageDealt,
    DamageTaken,
    StaggerDamageDealt,
    StaggerDamageTaken,
    DamageReduction,
    DamageThreshold,
    Speed,
    SpeedDice,
    CritChance,
    Healing,
}

/// `{flat, percentage}` pair.
///
/// `apply(base) = floor((base + flat) * (100 + percentage) / 100)`, rounding
/// towards negative infinity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatModifier {
    pub flat: i32,
    pub percentage: i32,
}

impl StatModifier {
    pub const ZERO: Self = Self {
        flat: 0,
        percentage: 0,
    };

    pub const fn new(flat: i32, percentage: i32) -> Self {
        Self { flat, percentage }
    }

    pub const fn flat(flat: i32) -> Self {
        Self::new(flat, 0)
    }

    pub const fn percentage(percentage: i32) -> Self {
        Self::new(0, percentage)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn combine(self, other: Self) -> Self {
        Self {
            flat: self.flat.saturating_add(other.flat),
            percentage: self.percentage.saturating_add(other.percentage),
        }
    }

    pub fn apply(&self, base: i32) -> i32 {
        let scaled = (i64::from(base) + i64::from(self.flat)) * (100 + i64::from(self.percentage));
        scaled
            .div_euclid(100)
            .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }
}

impl core::ops::Add for StatModifier {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.combine(rhs)
    }
}

impl core::ops::AddAssign for StatModifier {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.combine(rhs);
    }
}

/// Stat → modifier map. Unseen stats read as [`StatModifier::ZERO`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ModifierMap {
    entries: BTreeMap<Stat, StatModifier>,
}

impl ModifierMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: Stat) -> StatModifier {
        self.entries.get(&stat).copied().unwrap_or_default()
    }

    /// Lookup by content name. Unknown names read as zero.
    pub fn get_named(&self, name: &str) -> StatModifier {
        Stat::from_str(name)
            .map(|stat| self.get(stat))
            .unwrap_or_default()
    }

    pub fn add(&mut self, stat: Stat, modifier: StatModifier) {
        if modifier.is_zero() {
            return;
        }
        *self.entries.entry(stat).or_default() += modifier;
    }

    pub fn add_flat(&mut self, stat: Stat, flat: i32) {
        self.add(stat, StatModifier::flat(flat));
    }

    pub fn add_percentage(&mut self, stat: Stat, percentage: i32) {
        self.add(stat, StatModifier::percentage(percentage));
    }

    pub fn modified_value(&self, base: i32, stat: Stat) -> i32 {
        self.get(stat).apply(base)
    }

    pub fn modified_value_named(&self, base: i32, name: &str) -> i32 {
        self.get_named(name).apply(base)
    }

    /// Sum of several stats' modifiers.
    pub fn combined(&self, stats: &[Stat]) -> StatModifier {
        stats
            .iter()
            .fold(StatModifier::ZERO, |acc, stat| acc + self.get(*stat))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, StatModifier)> + '_ {
        self.entries.iter().map(|(stat, modifier)| (*stat, *modifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modified_value_floors_towards_negative_infinity() {
        assert_eq!(StatModifier::new(5, 50).apply(10), 22);
        assert_eq!(StatModifier::new(0, 50).apply(3), 4);
        assert_eq!(StatModifier::new(0, 50).apply(-3), -5);
        assert_eq!(StatModifier::new(-2, 0).apply(1), -1);
        assert_eq!(StatModifier::new(0, -100).apply(40), 0);
    }

    #[test]
    fn unseen_and_unknown_stats_default_to_zero() {
        let mut map = ModifierMap::new();
        map.add_flat(Stat::SlashPower, 2);

        assert_eq!(map.get(Stat::BluntPower), StatModifier::ZERO);
        assert_eq!(map.get_named("slash_power"), StatModifier::flat(2));
        assert_eq!(map.get_named("no_such_stat"), StatModifier::ZERO);
        assert_eq!(map.modified_value_named(7, "no_such_stat"), 7);
    }

    #[test]
    fn additions_accumulate() {
        let mut map = ModifierMap::new();
        map.add_flat(Stat::Speed, 2);
        map.add_percentage(Stat::Speed, 25);
        map.add_flat(Stat::Speed, -1);

        assert_eq!(map.get(Stat::Speed), StatModifier::new(1, 25));
        assert_eq!(map.modified_value(3, Stat::Speed), 5);
        assert_eq!(
            map.combined(&[Stat::Speed, Stat::Power]),
            StatModifier::new(1, 25)
        );
    }
}
