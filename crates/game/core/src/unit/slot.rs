use std::sync::Arc;

use super::UnitId;
use crate::card::Card;

/// A slot's identity within a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotRef {
    pub unit: UnitId,
    pub index: usize,
}

impl SlotRef {
    pub const fn new(unit: UnitId, index: usize) -> Self {
        Self { unit, index }
    }
}

impl core::fmt::Display for SlotRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}[{}]", self.unit, self.index)
    }
}

/// One rolled speed die and the card (if any) queued into it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    pub speed: i32,
    pub card: Option<Arc<Card>>,
    pub target: Option<SlotRef>,
    /// Destroy the opponent's dice when winning the speed roll.
    pub speed_break: bool,
    pub consumed: bool,
}

impl Slot {
    pub fn new(speed: i32) -> Self {
        Self {
            speed,
            card: None,
            target: None,
            speed_break: false,
            consumed: false,
        }
    }

    pub fn assign(&mut self, card: Arc<Card>, target: Option<SlotRef>, speed_break: bool) {
        self.card = Some(card);
        self.target = target;
        self.speed_break = speed_break;
    }

    pub fn is_occupied(&self) -> bool {
        self.card.is_some()
    }

    /// Removes the card (mass-summation loss).
    pub fn destroy_card(&mut self) -> Option<Arc<Card>> {
        self.target = None;
        self.card.take()
    }
}
