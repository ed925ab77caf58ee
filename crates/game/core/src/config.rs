use crate::card::CardCategory;

/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Hard cap on sub-rounds inside one clash exchange.
    pub clash_iteration_cap: u32,
    /// Hard cap on sub-rounds inside one one-sided exchange.
    pub one_sided_iteration_cap: u32,
    /// Speed skill values at which a unit gains a speed-dice tier.
    pub speed_thresholds: [i32; 3],
    /// Base priority per card category, before speed and jitter.
    pub priorities: CategoryPriorities,
    /// Resolution of the tie-breaking jitter. Scores are scaled by this value
    /// and the jitter is drawn from `[0, jitter_scale)`.
    pub jitter_scale: i64,
    /// HP damage percentage applied to staggered targets (replaces resistance).
    pub staggered_damage_percent: i32,
    /// Turn ends a staggered unit sits out before Stagger refills.
    pub stagger_recovery_turns: u32,
    /// Flat power granted to every die of the side that wins the speed roll.
    pub speed_advantage_power: i32,
    /// Whether HP hits from offensive dice also chip Stagger.
    pub side_damage: bool,
    /// Damage multiplier bonus (percent) on critical rolls.
    pub critical_bonus_percent: i32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of speed dice (and therefore slots) per unit.
    pub const MAX_SPEED_DICE: usize = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CLASH_ITERATION_CAP: u32 = 25;
    pub const DEFAULT_ONE_SIDED_ITERATION_CAP: u32 = 20;
    pub const DEFAULT_SPEED_THRESHOLDS: [i32; 3] = [10, 20, 30];
    pub const DEFAULT_JITTER_SCALE: i64 = 100;
    pub const DEFAULT_STAGGERED_DAMAGE_PERCENT: i32 = 200;
    pub const DEFAULT_STAGGER_RECOVERY_TURNS: u32 = 1;
    pub const DEFAULT_CRITICAL_BONUS_PERCENT: i32 = 50;

    pub fn new() -> Self {
        Self {
            clash_iteration_cap: Self::DEFAULT_CLASH_ITERATION_CAP,
            one_sided_iteration_cap: Self::DEFAULT_ONE_SIDED_ITERATION_CAP,
            speed_thresholds: Self::DEFAULT_SPEED_THRESHOLDS,
            priorities: CategoryPriorities::default(),
            jitter_scale: Self::DEFAULT_JITTER_SCALE,
            staggered_damage_percent: Self::DEFAULT_STAGGERED_DAMAGE_PERCENT,
            stagger_recovery_turns: Self::DEFAULT_STAGGER_RECOVERY_TURNS,
            speed_advantage_power: 0,
            side_damage: true,
            critical_bonus_percent: Self::DEFAULT_CRITICAL_BONUS_PERCENT,
        }
    }

    pub fn with_iteration_caps(mut self, clash: u32, one_sided: u32) -> Self {
        self.clash_iteration_cap = clash;
        self.one_sided_iteration_cap = one_sided;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Scheduler priority per card category. Higher acts first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CategoryPriorities {
    pub instant: i64,
    pub mass: i64,
    pub ranged: i64,
    pub offensive: i64,
    pub melee: i64,
}

impl CategoryPriorities {
    pub fn for_category(&self, category: CardCategory) -> i64 {
        match category {
            CardCategory::OnPlay | CardCategory::Item => self.instant,
            CardCategory::MassSummation | CardCategory::MassIndividual => self.mass,
            CardCategory::Ranged => self.ranged,
            CardCategory::Offensive => self.offensive,
            CardCategory::Melee => self.melee,
        }
    }
}

impl Default for CategoryPriorities {
    fn default() -> Self {
        Self {
            instant: 400,
            mass: 300,
            ranged: 200,
            offensive: 100,
            melee: 0,
        }
    }
}
