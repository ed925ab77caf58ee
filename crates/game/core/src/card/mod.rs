//! Cards and dice.
//!
//! Cards are plain data. They are built once from content, shared through the
//! registry as `Arc<Card>`, and never mutated during a battle: resolvers clone
//! the dice they need into per-exchange state.

pub mod dice;
pub mod script;

pub use dice::{DamageKind, DiceKind, Die};
pub use script::{ParamValue, ScriptCall, ScriptParams, ScriptTable, Trigger};

/// Card identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CardId(pub String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for CardId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for CardId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CardCategory {
    Melee,
    Ranged,
    Offensive,
    MassSummation,
    MassIndividual,
    OnPlay,
    Item,
}

impl CardCategory {
    pub const fn is_mass(self) -> bool {
        matches!(self, Self::MassSummation | Self::MassIndividual)
    }

    /// Resolves through scripts only.
    pub const fn is_instant(self) -> bool {
        matches!(self, Self::OnPlay | Self::Item)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CardFlag {
    /// Playing the card never starts a cooldown.
    NoCooldown,
    /// Dice survive a lost speed roll.
    Unbreakable,
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub id: CardId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tier: u32,
    pub category: CardCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dice: Vec<Die>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "ScriptTable::is_empty")
    )]
    pub scripts: ScriptTable,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub flags: Vec<CardFlag>,
}

impl Card {
    pub fn new(id: impl Into<CardId>, tier: u32, category: CardCategory) -> Self {
        let id = id.into();
        Self {
            name: id.0.clone(),
            id,
            tier,
            category,
            dice: Vec::new(),
            scripts: ScriptTable::new(),
            flags: Vec::new(),
        }
    }

    /// Inert stand-in for an id missing from the registry.
    pub fn placeholder(id: CardId) -> Self {
        Self {
            name: format!("unknown card {id}"),
            ..Self::new(id, 0, CardCategory::OnPlay)
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_die(mut self, die: Die) -> Self {
        self.dice.push(die);
        self
    }

    #[must_use]
    pub fn with_script(mut self, trigger: Trigger, call: ScriptCall) -> Self {
        self.scripts.entry(trigger).or_default().push(call);
        self
    }

    #[must_use]
    pub fn with_flag(mut self, flag: CardFlag) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn has_flag(&self, flag: CardFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn scripts_for(&self, trigger: Trigger) -> &[ScriptCall] {
        self.scripts.get(&trigger).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Can meet an incoming attack head-on.
    pub fn is_clashable(&self) -> bool {
        matches!(
            self.category,
            CardCategory::Melee | CardCategory::Ranged | CardCategory::Offensive
        ) && !self.dice.is_empty()
    }

    /// Cooldown pushed when the card is played (zero for none).
    pub fn cooldown(&self) -> u32 {
        if self.has_flag(CardFlag::NoCooldown) {
            0
        } else {
            self.tier
        }
    }
}
