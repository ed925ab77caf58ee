//! Common error infrastructure for clash-core.
//!
//! Resolution itself never fails: unknown content resolves to inert
//! placeholders and runaway exchanges are truncated. Errors only surface when
//! the orchestrating session misuses the API (unknown units, out-of-range
//! slots, unavailable cards).
//!
//! # Design Principles
//!
//! - **Type Safety**: One error enum with specific variants per misuse
//! - **Rich Context**: Errors carry the unit / slot they concern
//! - **Severity Classification**: Errors are categorized for recovery strategies

use crate::card::CardId;
use crate::unit::{SlotRef, UnitId};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The request may succeed later or with another choice
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - pick another card / slot, or retry next turn.
    ///
    /// Examples: card still cooling down, slot already acted
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unit not found, slot index out of range
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Unit that triggered the error (if applicable).
    pub unit: Option<UnitId>,

    /// Slot the request addressed (if applicable).
    pub slot: Option<SlotRef>,
}

impl ErrorContext {
    #[must_use]
    pub const fn with_unit(mut self, unit: UnitId) -> Self {
        self.unit = Some(unit);
        self
    }

    #[must_use]
    pub const fn with_slot(mut self, slot: SlotRef) -> Self {
        self.unit = Some(slot.unit);
        self.slot = Some(slot);
        self
    }
}

/// Common trait for all clash-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors surfaced by the battle API.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("unit {0} is already part of the battle")]
    DuplicateUnit(UnitId),

    #[error("slot {slot} out of range (unit has {available} slots)")]
    SlotOutOfRange { slot: SlotRef, available: usize },

    #[error("unit {0} cannot act this turn")]
    UnitCannotAct(UnitId),

    #[error("card {card} is not available to unit {unit}")]
    CardUnavailable { unit: UnitId, card: CardId },

    #[error("slot {0} has already acted this turn")]
    SlotConsumed(SlotRef),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnitNotFound(_) | Self::SlotOutOfRange { .. } => ErrorSeverity::Validation,
            Self::DuplicateUnit(_) => ErrorSeverity::Internal,
            Self::UnitCannotAct(_) | Self::CardUnavailable { .. } | Self::SlotConsumed(_) => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn context(&self) -> Option<ErrorContext> {
        let context = ErrorContext::default();
        match self {
            Self::UnitNotFound(unit)
            | Self::DuplicateUnit(unit)
            | Self::UnitCannotAct(unit)
            | Self::CardUnavailable { unit, .. } => Some(context.with_unit(*unit)),
            Self::SlotOutOfRange { slot, .. } | Self::SlotConsumed(slot) => {
                Some(context.with_slot(*slot))
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnitNotFound(_) => "unit_not_found",
            Self::DuplicateUnit(_) => "duplicate_unit",
            Self::SlotOutOfRange { .. } => "slot_out_of_range",
            Self::UnitCannotAct(_) => "unit_cannot_act",
            Self::CardUnavailable { .. } => "card_unavailable",
            Self::SlotConsumed(_) => "slot_consumed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        let missing = CombatError::UnitNotFound(UnitId(3));
        assert_eq!(missing.severity(), ErrorSeverity::Validation);
        assert_eq!(missing.error_code(), "unit_not_found");
        assert_eq!(missing.context().and_then(|c| c.unit), Some(UnitId(3)));

        let cooling = CombatError::CardUnavailable {
            unit: UnitId(1),
            card: CardId::from("strike"),
        };
        assert!(cooling.severity().is_recoverable());
        assert_eq!(cooling.to_string(), "card strike is not available to unit #1");

        let spent = CombatError::SlotConsumed(SlotRef::new(UnitId(2), 1));
        assert_eq!(
            spent.context(),
            Some(ErrorContext {
                unit: Some(UnitId(2)),
                slot: Some(SlotRef::new(UnitId(2), 1)),
            })
        );
    }
}
