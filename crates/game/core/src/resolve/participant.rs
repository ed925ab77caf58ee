//! Per-side dice state for one exchange.
//!
//! The card's dice are an immutable sequence walked by a cursor, so "resolved"
//! versus "still queued" is always `dice[..cursor]` versus `dice[cursor..]`.
//! Reserve dice (stored, counter) live on the [`Unit`] and are popped only
//! once the card queue is exhausted.
use crate::card::{DiceKind, Die};
use crate::combat::{DieReport, DieResult};
use crate::unit::{Unit, UnitId};

/// Where the die currently in play came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DieOrigin {
    /// The active counter (or recycled reserve) die kept from a previous
    /// sub-round.
    Retained,
    /// Card die at this index.
    Queue(usize),
    Stored,
    Counter,
}

impl DieOrigin {
    pub const fn is_reserve(self) -> bool {
        !matches!(self, Self::Queue(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentDie {
    pub die: Die,
    pub origin: DieOrigin,
}

#[derive(Clone, Debug)]
pub struct ParticipantState {
    pub unit: UnitId,
    dice: Vec<Die>,
    cursor: usize,
    speed_broken: bool,
    retained: Option<Die>,
}

impl ParticipantState {
    pub fn new(unit: UnitId, dice: Vec<Die>) -> Self {
        Self {
            unit,
            dice,
            cursor: 0,
            speed_broken: false,
            retained: None,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_speed_broken(&self) -> bool {
        self.speed_broken
    }

    pub fn retained(&self) -> Option<&Die> {
        self.retained.as_ref()
    }

    /// Destroys every un-rolled card die that `protects` does not cover.
    pub fn apply_speed_break(&mut self, protects: impl Fn(&Die) -> bool) {
        self.speed_broken = true;
        for die in &mut self.dice[self.cursor..] {
            if !protects(die) {
                die.broken = true;
            }
        }
    }

    /// Die for the next sub-round: the retained die, then the next card die,
    /// then (queue exhausted only) stored and counter reserves.
    pub fn resolve_current_die(&mut self, unit: &mut Unit) -> Option<CurrentDie> {
        if self.retained.is_some() {
            if !unit.can_use_reserves() {
                return None;
            }
            return self.retained.take().map(|die| CurrentDie {
                die,
                origin: DieOrigin::Retained,
            });
        }

        if self.cursor < self.dice.len() {
            return self.resolve_queued_die(unit);
        }

        if !unit.can_use_reserves() {
            return None;
        }
        if let Some(die) = unit.stored_dice.pop_front() {
            return Some(CurrentDie {
                die,
                origin: DieOrigin::Stored,
            });
        }
        unit.counter_dice.pop_front().map(|die| CurrentDie {
            die,
            origin: DieOrigin::Counter,
        })
    }

    /// Next card die only. Broken dice, and every die of a staggered or dead
    /// unit, come back as `None` and stay at the cursor marked broken.
    pub fn resolve_queued_die(&mut self, unit: &Unit) -> Option<CurrentDie> {
        let index = self.cursor;
        let die = self.dice.get_mut(index)?;
        if unit.is_staggered() || unit.is_dead() {
            die.broken = true;
        }
        if die.broken {
            return None;
        }
        Some(CurrentDie {
            die: die.clone(),
            origin: DieOrigin::Queue(index),
        })
    }

    /// Broken die sitting at the cursor.
    pub fn pending_broken(&self) -> Option<&Die> {
        self.dice.get(self.cursor).filter(|die| die.broken)
    }

    /// Steps past a broken die, reporting it.
    pub fn skip_broken(&mut self) -> Option<DieReport> {
        let report = self
            .pending_broken()
            .map(|die| DieReport::unrolled(self.unit, die, DieResult::Broken))?;
        self.cursor += 1;
        Some(report)
    }

    /// The die is spent.
    pub fn consume(&mut self, current: &CurrentDie) {
        if let DieOrigin::Queue(index) = current.origin {
            self.cursor = index + 1;
        }
    }

    /// The die survives to fight again. Counter and reserve dice become the
    /// retained die; a plain card die simply stays at the cursor.
    pub fn recycle(&mut self, current: CurrentDie) {
        match current.origin {
            DieOrigin::Queue(_) if !current.die.counter => {}
            DieOrigin::Queue(index) => {
                self.cursor = index + 1;
                self.retained = Some(current.die);
            }
            DieOrigin::Retained | DieOrigin::Stored | DieOrigin::Counter => {
                self.retained = Some(current.die);
            }
        }
    }

    /// Puts an unused die back where it came from.
    pub fn preserve(&mut self, current: CurrentDie, unit: &mut Unit) {
        match current.origin {
            DieOrigin::Retained => self.retained = Some(current.die),
            DieOrigin::Queue(_) => {}
            DieOrigin::Stored => unit.stored_dice.push_front(current.die),
            DieOrigin::Counter => unit.counter_dice.push_front(current.die),
        }
    }

    /// Any die left that could still fight this exchange.
    pub fn has_unresolved(&self) -> bool {
        self.retained.is_some() || self.dice[self.cursor.min(self.dice.len())..].iter().any(|die| !die.broken)
    }

    /// Exchange cleanup. Queued counter / evade dice and a retained evade go
    /// to the stored reserve; a retained counter is stored only while the
    /// opponent still has dice, otherwise it burns.
    pub fn finish(self, unit: &mut Unit, opponent_has_dice: bool) -> Vec<DieReport> {
        let mut reports = Vec::new();
        if unit.is_dead() {
            return reports;
        }

        let start = self.cursor.min(self.dice.len());
        for die in &self.dice[start..] {
            if die.broken || !(die.counter || die.kind == DiceKind::Evade) {
                continue;
            }
            reports.push(DieReport::unrolled(self.unit, die, DieResult::Stored));
            unit.stored_dice.push_back(die.fresh());
        }

        if let Some(die) = self.retained {
            let keep = die.kind == DiceKind::Evade || !die.counter || opponent_has_dice;
            if keep {
                reports.push(DieReport::unrolled(self.unit, &die, DieResult::Stored));
                unit.stored_dice.push_back(die.fresh());
            } else {
                reports.push(DieReport::unrolled(self.unit, &die, DieResult::Burned));
                tracing::debug!(unit = %self.unit, "undefeated counter die burned");
            }
        }
        reports
    }
}
