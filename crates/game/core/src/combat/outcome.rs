//! Clash outcome judgement.
//!
//! Pure comparison of two rolls; the battle applies the resulting effect.
//!
//! | winner  | loser   | effect                         | winner recycles |
//! |---------|---------|--------------------------------|-----------------|
//! | attack  | attack  | HP damage = difference         | if counter      |
//! | attack  | evade   | HP damage = winner value       | if counter      |
//! | attack  | block   | HP damage = difference         | if counter      |
//! | evade   | attack  | Stagger restore = winner value | yes             |
//! | block   | attack  | Stagger restore = difference   | yes             |
//! | equal   |         | draw                           | no              |

use super::roll::RollSummary;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClashSide {
    Left,
    Right,
}

impl ClashSide {
    pub const fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClashEffect {
    None,
    /// HP hit (plus side damage) on the loser.
    Damage(i32),
    /// Stagger restored to the winner.
    RestoreStagger(i32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub winner: Option<ClashSide>,
    pub difference: i32,
    pub effect: ClashEffect,
    /// Winning die is kept to fight again.
    pub winner_recycles: bool,
}

impl Verdict {
    pub const fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

pub fn both_defensive(left: &RollSummary, right: &RollSummary) -> bool {
    left.kind.is_defensive() && right.kind.is_defensive()
}

/// Compares two rolls. Callers filter out both-defensive pairs first.
pub fn judge(left: &RollSummary, right: &RollSummary) -> Verdict {
    let (winner, won, lost) = match left.value.cmp(&right.value) {
        core::cmp::Ordering::Greater => (ClashSide::Left, left, right),
        core::cmp::Ordering::Less => (ClashSide::Right, right, left),
        core::cmp::Ordering::Equal => {
            return Verdict {
                winner: None,
                difference: 0,
                effect: ClashEffect::None,
                winner_recycles: false,
            };
        }
    };
    let difference = won.value - lost.value;
    let (effect, recycles) = win_effect(won, lost, difference);
    Verdict {
        winner: Some(winner),
        difference,
        effect,
        winner_recycles: recycles,
    }
}

/// Effect of `won` beating `lost` by `difference`.
pub fn win_effect(won: &RollSummary, lost: &RollSummary, difference: i32) -> (ClashEffect, bool) {
    use crate::card::DiceKind::{Block, Evade};

    match (won.kind, lost.kind) {
        (Evade, _) => (ClashEffect::RestoreStagger(won.value), true),
        (Block, _) => (ClashEffect::RestoreStagger(difference), true),
        (_, Evade) => (ClashEffect::Damage(won.value), won.counter),
        _ => (ClashEffect::Damage(difference), won.counter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::DiceKind;
    use crate::unit::UnitId;

    fn roll(kind: DiceKind, value: i32) -> RollSummary {
        RollSummary {
            unit: UnitId(0),
            kind,
            value,
            counter: false,
        }
    }

    #[test]
    fn equal_offensive_kinds_deal_the_difference() {
        for kind in [DiceKind::Slash, DiceKind::Pierce, DiceKind::Blunt] {
            for a in 0..12 {
                for b in 0..12 {
                    let verdict = judge(&roll(kind, a), &roll(kind, b));
                    if a == b {
                        assert!(verdict.is_draw());
                        assert_eq!(verdict.effect, ClashEffect::None);
                    } else {
                        assert_eq!(verdict.effect, ClashEffect::Damage((a - b).abs()));
                        assert!(!verdict.winner_recycles);
                    }
                }
            }
        }
    }

    #[test]
    fn attack_against_defense() {
        let slash_vs_block = judge(&roll(DiceKind::Slash, 10), &roll(DiceKind::Block, 5));
        assert_eq!(slash_vs_block.winner, Some(ClashSide::Left));
        assert_eq!(slash_vs_block.effect, ClashEffect::Damage(5));

        let slash_vs_evade = judge(&roll(DiceKind::Slash, 7), &roll(DiceKind::Evade, 4));
        assert_eq!(slash_vs_evade.effect, ClashEffect::Damage(7));
    }

    #[test]
    fn defense_wins_recycle_and_restore_stagger() {
        let evade = judge(&roll(DiceKind::Blunt, 3), &roll(DiceKind::Evade, 6));
        assert_eq!(evade.winner, Some(ClashSide::Right));
        assert_eq!(evade.effect, ClashEffect::RestoreStagger(6));
        assert!(evade.winner_recycles);

        let block = judge(&roll(DiceKind::Block, 9), &roll(DiceKind::Pierce, 4));
        assert_eq!(block.effect, ClashEffect::RestoreStagger(5));
        assert!(block.winner_recycles);
    }

    #[test]
    fn winning_counter_dice_recycle() {
        let counter = RollSummary {
            counter: true,
            ..roll(DiceKind::Slash, 8)
        };
        let verdict = judge(&roll(DiceKind::Slash, 2), &counter);
        assert_eq!(verdict.winner, Some(ClashSide::Right));
        assert!(verdict.winner_recycles);

        let over_evade = judge(&counter, &roll(DiceKind::Evade, 3));
        assert_eq!(over_evade.effect, ClashEffect::Damage(8));
        assert!(over_evade.winner_recycles);
    }
}
