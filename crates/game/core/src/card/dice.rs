use super::script::{ScriptCall, ScriptTable, Trigger};
use crate::stats::Stat;

/// Die face type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum DiceKind {
    Slash,
    Pierce,
    Blunt,
    Block,
    Evade,
}

impl DiceKind {
    pub const fn is_offensive(self) -> bool {
        matches!(self, Self::Slash | Self::Pierce | Self::Blunt)
    }

    pub const fn is_defensive(self) -> bool {
        !self.is_offensive()
    }

    pub const fn damage_kind(self) -> Option<DamageKind> {
        match self {
            Self::Slash => Some(DamageKind::Slash),
            Self::Pierce => Some(DamageKind::Pierce),
            Self::Blunt => Some(DamageKind::Blunt),
            Self::Block | Self::Evade => None,
        }
    }

    /// Stats whose modifiers apply to rolls of this kind.
    pub const fn power_stats(self) -> [Stat; 3] {
        match self {
            Self::Slash => [Stat::Power, Stat::OffensivePower, Stat::SlashPower],
            Self::Pierce => [Stat::Power, Stat::OffensivePower, Stat::PiercePower],
            Self::Blunt => [Stat::Power, Stat::OffensivePower, Stat::BluntPower],
            Self::Block => [Stat::Power, Stat::DefensivePower, Stat::BlockPower],
            Self::Evade => [Stat::Power, Stat::DefensivePower, Stat::EvadePower],
        }
    }
}

/// Physical damage type, used for resistance lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum DamageKind {
    Slash,
    Pierce,
    Blunt,
}

/// A single die on a card (or in a reserve).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Die {
    pub kind: DiceKind,
    pub min: i32,
    pub max: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub counter: bool,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "ScriptTable::is_empty")
    )]
    pub scripts: ScriptTable,
    /// Destroyed by a lost speed roll. Transient.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub broken: bool,
}

impl Die {
    pub fn new(kind: DiceKind, min: i32, max: i32) -> Self {
        Self {
            kind,
            min,
            max,
            counter: false,
            scripts: ScriptTable::new(),
            broken: false,
        }
    }

    /// Die that always rolls `value`.
    pub fn fixed(kind: DiceKind, value: i32) -> Self {
        Self::new(kind, value, value)
    }

    #[must_use]
    pub fn as_counter(mut self) -> Self {
        self.counter = true;
        self
    }

    #[must_use]
    pub fn with_script(mut self, trigger: Trigger, call: ScriptCall) -> Self {
        self.scripts.entry(trigger).or_default().push(call);
        self
    }

    pub fn scripts_for(&self, trigger: Trigger) -> &[ScriptCall] {
        self.scripts.get(&trigger).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Copy with the transient flag reset.
    pub fn fresh(&self) -> Self {
        Self {
            broken: false,
            ..self.clone()
        }
    }
}
