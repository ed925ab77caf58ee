//! Unit roster loader.

use std::path::Path;

use serde::Deserialize;

use clash_core::{
    Attributes, Bonus, CardId, CombatConfig, ContentRegistry, Resistances, Side, Skills, Unit,
    UnitId,
};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// A unit as authored in content, before it joins a battle.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UnitTemplate {
    pub key: String,
    pub name: String,
    pub side: Side,
    #[serde(default = "defaults::one")]
    pub level: u32,
    #[serde(default = "defaults::one")]
    pub rank: u32,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default = "defaults::max_hp")]
    pub max_hp: i32,
    #[serde(default = "defaults::max_sp")]
    pub max_sp: i32,
    #[serde(default = "defaults::max_stagger")]
    pub max_stagger: i32,
    #[serde(default)]
    pub resistances: Resistances,
    #[serde(default)]
    pub passives: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<Bonus>,
    pub deck: Vec<CardId>,
}

mod defaults {
    use clash_core::Unit;

    pub const fn one() -> u32 {
        1
    }
    pub const fn max_hp() -> i32 {
        Unit::DEFAULT_MAX_HP
    }
    pub const fn max_sp() -> i32 {
        Unit::DEFAULT_MAX_SP
    }
    pub const fn max_stagger() -> i32 {
        Unit::DEFAULT_MAX_STAGGER
    }
}

impl UnitTemplate {
    /// Builds a fresh unit: stats derived through `registry`, HP and Stagger
    /// at their derived maxima.
    pub fn spawn(&self, id: UnitId, registry: &ContentRegistry, config: &CombatConfig) -> Unit {
        let mut unit = Unit::new(id, self.name.clone(), self.side)
            .with_pools(self.max_hp, self.max_sp, self.max_stagger)
            .with_resistances(self.resistances)
            .with_deck(self.deck.iter().cloned());
        unit.level = self.level;
        unit.rank = self.rank;
        unit.attributes = self.attributes.clone();
        unit.skills = self.skills.clone();
        unit.passives = self.passives.clone();
        unit.equipment = self.equipment.clone();
        unit.recompute_fresh(registry, config);
        unit
    }

    /// Deck entries and passives the registry does not know.
    pub fn missing_content(&self, registry: &ContentRegistry) -> Vec<String> {
        let cards = self
            .deck
            .iter()
            .filter(|card| registry.find_card(card).is_none())
            .map(|card| format!("card '{card}'"));
        let passives = self
            .passives
            .iter()
            .filter(|passive| registry.passive(passive).is_none())
            .map(|passive| format!("passive '{passive}'"));
        cards.chain(passives).collect()
    }
}

/// Loader for unit rosters from RON files.
///
/// RON format: `Vec<UnitTemplate>`
pub struct UnitLoader;

impl UnitLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<UnitTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn parse(content: &str, source: &str) -> LoadResult<Vec<UnitTemplate>> {
        let units: Vec<UnitTemplate> = parse_ron(content, source)?;
        if let Some(unit) = units.iter().find(|unit| unit.deck.is_empty()) {
            anyhow::bail!("{}: unit '{}' has an empty deck", source, unit.key);
        }
        Ok(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use clash_core::{Attribute, Battle, Resistance};

    const ROSTER: &str = r#"[
        (
            key: "angela",
            name: "Angela",
            side: ally,
            attributes: {strength: 4},
            max_hp: 72,
            resistances: (hp: (slash: endured)),
            passives: ["vigor"],
            deck: ["light_attack", "light_attack", "evade"],
        ),
    ]"#;

    #[test]
    fn templates_spawn_full_units() {
        let template = &UnitLoader::parse(ROSTER, "inline").expect("valid roster")[0];
        let unit = template.spawn(UnitId(3), &ContentRegistry::builtin(), &CombatConfig::default());

        assert_eq!(unit.side, Side::Ally);
        assert_eq!(unit.attributes.get(Attribute::Strength), 4);
        assert_eq!(unit.max_hp, 72);
        assert_eq!(unit.max_sp, Unit::DEFAULT_MAX_SP);
        assert_eq!(unit.resistances.hp.slash, Resistance::Endured);
        assert_eq!(unit.resistances.hp.blunt, Resistance::Normal);
        assert_eq!(unit.deck_copies(&CardId::from("light_attack")), 2);
    }

    #[test]
    fn endurance_raises_starting_pools_in_battle() {
        let roster = r#"[
            (key: "tank", name: "Tank", side: ally, attributes: {endurance: 2}, deck: ["guard"]),
        ]"#;
        let template = &UnitLoader::parse(roster, "inline").expect("valid roster")[0];
        let registry = Arc::new(ContentRegistry::builtin());
        let config = CombatConfig::default();

        let mut battle = Battle::new(Arc::clone(&registry), config.clone(), 1);
        let id = battle
            .add_unit(template.spawn(UnitId(1), &registry, &config))
            .expect("unit joins");
        let pools = battle.unit(id).expect("unit").pools;

        assert!(pools.hp.max > Unit::DEFAULT_MAX_HP);
        assert!(pools.stagger.max > Unit::DEFAULT_MAX_STAGGER);
        assert_eq!(pools.hp.current, pools.hp.max);
        assert_eq!(pools.stagger.current, pools.stagger.max);
        assert_eq!(pools.sp.current, 0);
    }

    #[test]
    fn reports_content_the_registry_lacks() {
        let template = &UnitLoader::parse(ROSTER, "inline").expect("valid roster")[0];
        let missing = template.missing_content(&ContentRegistry::builtin());
        assert_eq!(missing.len(), 3);
        assert!(missing.contains(&"passive 'vigor'".to_owned()));
    }

    #[test]
    fn empty_decks_are_rejected() {
        let roster = r#"[(key: "idle", name: "Idle", side: enemy, deck: [])]"#;
        assert!(UnitLoader::parse(roster, "inline").is_err());
    }
}
