//! Script references attached to cards, dice and passives.
//!
//! Content only names scripts; behaviour lives in the registry (see
//! [`crate::engine::Script`]).
use std::collections::BTreeMap;

/// Moment at which a script list fires.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Trigger {
    OnUse,
    OnRoll,
    OnHit,
    OnClashWin,
    OnClashLose,
    OnClashDraw,
}

/// Trigger → ordered script calls.
pub type ScriptTable = BTreeMap<Trigger, Vec<ScriptCall>>;

/// A single script invocation: registry id plus parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptCall {
    pub script: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: ScriptParams,
}

impl ScriptCall {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            params: ScriptParams::default(),
        }
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key, value);
        self
    }
}

/// Untyped parameter value as written in content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum ParamValue {
    Int(i64),
    Flag(bool),
    Text(String),
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// String-keyed script parameters with typed, defaulting accessors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ScriptParams(BTreeMap<String, ParamValue>);

impl ScriptParams {
    pub fn insert(&mut self, key: &str, value: impl Into<ParamValue>) {
        self.0.insert(key.to_owned(), value.into());
    }

    /// Integer parameter, saturated into `i32`. Missing or mistyped keys
    /// return `default`.
    pub fn int(&self, key: &str, default: i32) -> i32 {
        match self.0.get(key) {
            Some(ParamValue::Int(value)) => (*value).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
            _ => default,
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(ParamValue::Flag(true)))
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(ParamValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
