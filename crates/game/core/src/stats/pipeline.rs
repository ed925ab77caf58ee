//! Derived-stat computation.
//!
//! ```text
//! [ base attributes + attribute bonuses ]   (1)
//!      ↓
//! [ base skills + skill bonuses ]           (2)
//!      ↓
//! [ rating-derived stat modifiers ]         (3)
//!      ↓
//! [ equipment / passive stat bonuses ]      (4)
//!      ↓
//! [ status on_calculate_stats hooks ]       (5)
//! ```
//!
//! The result is cached on the unit. Nothing marks it stale: callers
//! re-run [`Unit::recompute`] after anything that feeds it changes.

use strum::IntoEnumIterator;

use super::attributes::{Attribute, Attributes, Skill, Skills};
use super::bonus::{BonusStack, BonusTarget};
use super::modifier::{ModifierMap, Stat};
use super::speed::SpeedDice;
use crate::config::CombatConfig;
use crate::registry::ContentRegistry;
use crate::unit::{Capabilities, Unit};

/// Snapshot produced by the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedStats {
    pub attributes: Attributes,
    pub skills: Skills,
    pub modifiers: ModifierMap,
    pub speed: SpeedDice,
    pub capabilities: Capabilities,
    pub max_hp: i32,
    pub max_sp: i32,
    pub max_stagger: i32,
}

impl Default for DerivedStats {
    fn default() -> Self {
        Self {
            attributes: Attributes::new(),
            skills: Skills::new(),
            modifiers: ModifierMap::new(),
            speed: SpeedDice::default(),
            capabilities: Capabilities::empty(),
            max_hp: 1,
            max_sp: 0,
            max_stagger: 1,
        }
    }
}

pub fn compute_derived(
    unit: &Unit,
    registry: &ContentRegistry,
    config: &CombatConfig,
) -> DerivedStats {
    let mut bonuses = BonusStack::new();
    bonuses.extend(&unit.equipment);

    let mut capabilities = Capabilities::empty();
    for passive_id in &unit.passives {
        match registry.passive(passive_id) {
            Some(passive) => {
                bonuses.extend(&passive.bonuses);
                capabilities |= passive.capabilities;
            }
            None => tracing::warn!(unit = %unit.id, passive = %passive_id, "unknown passive ignored"),
        }
    }

    let attributes: Attributes = Attribute::iter()
        .map(|attribute| {
            let base = unit.attributes.get(attribute);
            (attribute, bonuses.apply_to(BonusTarget::Attribute(attribute), base))
        })
        .collect();
    let skills: Skills = Skill::iter()
        .map(|skill| {
            let base = unit.skills.get(skill);
            (skill, bonuses.apply_to(BonusTarget::Skill(skill), base))
        })
        .collect();

    let mut modifiers = ModifierMap::new();
    apply_rating_modifiers(&attributes, &skills, &mut modifiers);
    bonuses.apply_stats(&mut modifiers);

    for (id, stacks) in unit.statuses.active() {
        let status = registry.status(id);
        status.on_calculate_stats(stacks, &mut modifiers);
        capabilities |= status.capabilities();
    }

    let speed = SpeedDice::from_skill(skills.get(Skill::Speed), &config.speed_thresholds)
        .with_extra(modifiers.get(Stat::SpeedDice).flat);

    DerivedStats {
        max_hp: modifiers.modified_value(unit.max_hp, Stat::MaxHp).max(1),
        max_sp: modifiers.modified_value(unit.max_sp, Stat::MaxSp).max(0),
        max_stagger: modifiers
            .modified_value(unit.max_stagger, Stat::MaxStagger)
            .max(1),
        attributes,
        skills,
        modifiers,
        speed,
        capabilities,
    }
}

/// Layer (3): fixed conversions from ratings to stat modifiers.
fn apply_rating_modifiers(attributes: &Attributes, skills: &Skills, modifiers: &mut ModifierMap) {
    let strength = attributes.get(Attribute::Strength);
    let endurance = attributes.get(Attribute::Endurance);
    let agility = attributes.get(Attribute::Agility);
    let wisdom = attributes.get(Attribute::Wisdom);
    let psyche = attributes.get(Attribute::Psyche);

    modifiers.add_flat(Stat::OffensivePower, strength.div_euclid(5));
    modifiers.add_flat(Stat::MaxHp, endurance * 5);
    modifiers.add_flat(Stat::MaxStagger, endurance * 2);
    modifiers.add_flat(Stat::Speed, agility.div_euclid(5));
    modifiers.add_flat(Stat::MaxSp, wisdom * 2);
    modifiers.add_flat(Stat::DefensivePower, psyche.div_euclid(5));

    modifiers.add_percentage(Stat::DamageDealt, skills.get(Skill::Offense));
    modifiers.add_flat(Stat::BlockPower, skills.get(Skill::Defense).div_euclid(10));
    modifiers.add_flat(Stat::EvadePower, skills.get(Skill::Evasion).div_euclid(10));
    modifiers.add_percentage(Stat::StaggerDamageTaken, -skills.get(Skill::Fortitude));
}
