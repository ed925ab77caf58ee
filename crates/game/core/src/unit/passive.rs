use super::mechanics::{Capabilities, MechanicsProvider};
use crate::card::{Die, ScriptCall, ScriptTable, Trigger};
use crate::stats::Bonus;

/// Passive ability attached to a unit by id.
///
/// Bonuses feed the stat pipeline, `counter_dice` are granted into the counter
/// reserve at every turn start, and `scripts` fire through the unit's
/// mechanics dispatcher.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveDefinition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: Vec<Bonus>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub capabilities: Capabilities,
    #[cfg_attr(feature = "serde", serde(default))]
    pub counter_dice: Vec<Die>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scripts: ScriptTable,
}

impl PassiveDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            bonuses: Vec::new(),
            capabilities: Capabilities::empty(),
            counter_dice: Vec::new(),
            scripts: ScriptTable::new(),
        }
    }

    #[must_use]
    pub fn with_bonus(mut self, bonus: Bonus) -> Self {
        self.bonuses.push(bonus);
        self
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities |= capabilities;
        self
    }

    #[must_use]
    pub fn with_counter_die(mut self, die: Die) -> Self {
        self.counter_dice.push(die.as_counter());
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
}

impl MechanicsProvider for PassiveDefinition {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}
