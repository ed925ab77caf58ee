//! Speed dice derived from the speed skill.
//!
//! Each threshold the skill reaches adds one tier. A tier grants one extra
//! speed die and shifts the per-die range upwards.

use crate::config::CombatConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeedDice {
    pub count: usize,
    pub min: i32,
    pub max: i32,
}

impl SpeedDice {
    /// Number of thresholds `skill` reaches.
    pub fn tier(skill: i32, thresholds: &[i32; 3]) -> i32 {
        thresholds.iter().filter(|threshold| skill >= **threshold).count() as i32
    }

    pub fn from_skill(skill: i32, thresholds: &[i32; 3]) -> Self {
        let tier = Self::tier(skill, thresholds);
        Self {
            count: 1 + tier as usize,
            min: 1 + tier,
            max: 4 + 2 * tier,
        }
    }

    /// Adds (or removes) dice, clamped to `[1, MAX_SPEED_DICE]`.
    #[must_use]
    pub fn with_extra(mut self, extra: i32) -> Self {
        let count = (self.count as i32).saturating_add(extra);
        self.count = count.clamp(1, CombatConfig::MAX_SPEED_DICE as i32) as usize;
        self
    }
}

impl Default for SpeedDice {
    fn default() -> Self {
        Self::from_skill(0, &CombatConfig::DEFAULT_SPEED_THRESHOLDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLDS: [i32; 3] = [10, 20, 30];

    #[test]
    fn tiers_follow_thresholds() {
        assert_eq!(SpeedDice::from_skill(0, &THRESHOLDS), SpeedDice { count: 1, min: 1, max: 4 });
        assert_eq!(SpeedDice::from_skill(10, &THRESHOLDS), SpeedDice { count: 2, min: 2, max: 6 });
        assert_eq!(SpeedDice::from_skill(29, &THRESHOLDS), SpeedDice { count: 3, min: 3, max: 8 });
        assert_eq!(SpeedDice::from_skill(45, &THRESHOLDS), SpeedDice { count: 4, min: 4, max: 10 });
    }

    #[test]
    fn extra_dice_are_clamped() {
        let base = SpeedDice::from_skill(30, &THRESHOLDS);
        assert_eq!(base.with_extra(3).count, CombatConfig::MAX_SPEED_DICE);
        assert_eq!(base.with_extra(-9).count, 1);
    }
}
