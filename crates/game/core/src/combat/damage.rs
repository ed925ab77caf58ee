//! Damage calculation.
//!
//! Pipeline stages: multiplier → percent → resistance → flat reduction →
//! threshold. Barrier absorption and pool application happen in the battle,
//! after this pure step.

use crate::stats::ResourceKind;

/// Everything the pure pipeline needs for one hit on one resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageInput {
    pub raw: i32,
    pub resource: ResourceKind,
    /// Roll damage multiplier in percent (100 = unchanged).
    pub multiplier: i32,
    /// Attacker-side percent bonus.
    pub outgoing_percent: i32,
    /// Target-side percent bonus.
    pub incoming_percent: i32,
    /// Resistance (or staggered override) in percent.
    pub resistance_percent: i32,
    pub flat_reduction: i32,
    /// Hits at or below this value are ignored entirely.
    pub threshold: i32,
}

impl DamageInput {
    pub fn new(raw: i32, resource: ResourceKind) -> Self {
        Self {
            raw,
            resource,
            multiplier: 100,
            outgoing_percent: 0,
            incoming_percent: 0,
            resistance_percent: 100,
            flat_reduction: 0,
            threshold: 0,
        }
    }
}

/// Intermediate values, kept for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageBreakdown {
    pub scaled: i32,
    pub resisted: i32,
    pub reduced: i32,
    pub final_amount: i32,
}

/// Runs the pure pipeline. `status_reduction` applies the target's status
/// `modify_incoming_damage` hooks after the flat stat reduction.
pub fn calculate_damage(
    input: &DamageInput,
    status_reduction: impl FnOnce(i32) -> i32,
) -> DamageBreakdown {
    if input.raw <= 0 {
        return DamageBreakdown::default();
    }

    let percent = (100 + i64::from(input.outgoing_percent) + i64::from(input.incoming_percent)).max(0);
    let scaled = (i64::from(input.raw) * i64::from(input.multiplier.max(0)) * percent / 10_000)
        .min(i64::from(i32::MAX)) as i32;

    let resisted = (i64::from(scaled) * i64::from(input.resistance_percent.max(0)) / 100)
        .min(i64::from(i32::MAX)) as i32;

    let reduced = status_reduction(resisted.saturating_sub(input.flat_reduction.max(0)));

    let final_amount = if input.threshold > 0 && reduced <= input.threshold {
        0
    } else {
        reduced.max(0)
    };

    DamageBreakdown {
        scaled,
        resisted,
        reduced,
        final_amount,
    }
}

/// Multiplier shortcut for SP damage.
pub fn scale_sp_damage(raw: i32, multiplier: i32) -> i32 {
    if raw <= 0 {
        return 0;
    }
    (i64::from(raw) * i64::from(multiplier.max(0)) / 100).min(i64::from(i32::MAX)) as i32
}
