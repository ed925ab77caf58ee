use crate::card::DamageKind;
use crate::stats::ResourceKind;

/// Resistance level; multiplies incoming damage by [`Resistance::percent`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Resistance {
    Fatal,
    Weak,
    #[default]
    Normal,
    Endured,
    Ineffective,
    Immune,
}

impl Resistance {
    pub const fn percent(self) -> i32 {
        match self {
            Self::Fatal => 200,
            Self::Weak => 150,
            Self::Normal => 100,
            Self::Endured => 50,
            Self::Ineffective => 25,
            Self::Immune => 0,
        }
    }
}

/// Resistance per physical damage kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResistanceTable {
    pub slash: Resistance,
    pub pierce: Resistance,
    pub blunt: Resistance,
}

impl ResistanceTable {
    pub const fn uniform(level: Resistance) -> Self {
        Self {
            slash: level,
            pierce: level,
            blunt: level,
        }
    }

    pub const fn get(&self, kind: DamageKind) -> Resistance {
        match kind {
            DamageKind::Slash => self.slash,
            DamageKind::Pierce => self.pierce,
            DamageKind::Blunt => self.blunt,
        }
    }

    pub fn set(&mut self, kind: DamageKind, level: Resistance) {
        match kind {
            DamageKind::Slash => self.slash = level,
            DamageKind::Pierce => self.pierce = level,
            DamageKind::Blunt => self.blunt = level,
        }
    }
}

/// HP and Stagger resistance tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Resistances {
    pub hp: ResistanceTable,
    pub stagger: ResistanceTable,
}

impl Resistances {
    /// Resistance for a hit on `resource`. SP and kind-less damage are
    /// always [`Resistance::Normal`].
    pub fn get(&self, resource: ResourceKind, kind: Option<DamageKind>) -> Resistance {
        let Some(kind) = kind else {
            return Resistance::Normal;
        };
        match resource {
            ResourceKind::Hp => self.hp.get(kind),
            ResourceKind::Stagger => self.stagger.get(kind),
            ResourceKind::Sp => Resistance::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_independent_per_resource() {
        let mut resistances = Resistances::default();
        resistances.hp.set(DamageKind::Pierce, Resistance::Weak);
        resistances.stagger = ResistanceTable::uniform(Resistance::Endured);

        assert_eq!(resistances.get(ResourceKind::Hp, Some(DamageKind::Pierce)).percent(), 150);
        assert_eq!(resistances.get(ResourceKind::Hp, Some(DamageKind::Slash)).percent(), 100);
        assert_eq!(resistances.get(ResourceKind::Stagger, Some(DamageKind::Pierce)).percent(), 50);
        assert_eq!(resistances.get(ResourceKind::Sp, Some(DamageKind::Blunt)), Resistance::Normal);
        assert_eq!(resistances.get(ResourceKind::Hp, None), Resistance::Normal);
    }
}
