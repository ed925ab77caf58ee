//! Equipment and passive bonuses.
//!
//! A bonus targets a stat, an attribute or a skill and carries a flat and a
//! percentage part. Attribute and skill bonuses feed layers (1) and (2) of the
//! pipeline; stat bonuses land directly in the [`ModifierMap`] at layer (4).

use super::attributes::{Attribute, Skill};
use super::modifier::{ModifierMap, Stat, StatModifier};

/// What a [`Bonus`] adjusts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum BonusTarget {
    Stat(Stat),
    Attribute(Attribute),
    Skill(Skill),
}

/// A single bonus from equipment or a passive.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bonus {
    pub target: BonusTarget,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flat: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub percentage: i32,
}

impl Bonus {
    pub fn flat(target: BonusTarget, value: i32) -> Self {
        Self {
            target,
            flat: value,
            percentage: 0,
        }
    }

    pub fn percentage(target: BonusTarget, percent: i32) -> Self {
        Self {
            target,
            flat: 0,
            percentage: percent,
        }
    }

    pub fn modifier(&self) -> StatModifier {
        StatModifier::new(self.flat, self.percentage)
    }
}

/// A collection of bonuses gathered from every source a unit carries.
///
/// # Example
/// ```
/// # use clash_core::stats::{Attribute, Bonus, BonusStack, BonusTarget, Stat};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::flat(BonusTarget::Attribute(Attribute::Strength), 5));
/// stack.add(Bonus::percentage(BonusTarget::Attribute(Attribute::Strength), 20));
/// stack.add(Bonus::flat(BonusTarget::Stat(Stat::SlashPower), 1));
///
/// // (10 + 5) * 1.2 = 18
/// assert_eq!(stack.apply_to(BonusTarget::Attribute(Attribute::Strength), 10), 18);
/// assert_eq!(stack.apply_to(BonusTarget::Stat(Stat::SlashPower), 0), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    pub fn extend<'a>(&mut self, bonuses: impl IntoIterator<Item = &'a Bonus>) {
        self.bonuses.extend(bonuses.into_iter().cloned());
    }

    /// Combined modifier of every bonus aimed at `target`.
    pub fn modifier_for(&self, target: BonusTarget) -> StatModifier {
        self.bonuses
            .iter()
            .filter(|bonus| bonus.target == target)
            .fold(StatModifier::ZERO, |acc, bonus| acc + bonus.modifier())
    }

    pub fn apply_to(&self, target: BonusTarget, base: i32) -> i32 {
        self.modifier_for(target).apply(base)
    }

    /// Folds every stat-targeted bonus into `map`.
    pub fn apply_stats(&self, map: &mut ModifierMap) {
        for bonus in &self.bonuses {
            if let BonusTarget::Stat(stat) = bonus.target {
                map.add(stat, bonus.modifier());
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_bonuses_fold_into_modifier_map() {
        let mut stack = BonusStack::new();
        stack.add(Bonus::flat(BonusTarget::Stat(Stat::DamageReduction), 2));
        stack.add(Bonus::percentage(BonusTarget::Stat(Stat::DamageDealt), 15));
        stack.add(Bonus::flat(BonusTarget::Skill(Skill::Speed), 10));

        let mut map = ModifierMap::new();
        stack.apply_stats(&mut map);

        assert_eq!(map.get(Stat::DamageReduction), StatModifier::flat(2));
        assert_eq!(map.get(Stat::DamageDealt), StatModifier::percentage(15));
        assert_eq!(map.get(Stat::Speed), StatModifier::ZERO);
        assert_eq!(stack.apply_to(BonusTarget::Skill(Skill::Speed), 3), 13);
    }
}
