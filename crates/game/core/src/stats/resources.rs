//! Resource pools: HP, SP ("sanity") and Stagger.
//!
//! - Maximum values: recomputed from base maxima through the modifier map
//! - Current values: game state, persisted
//!
//! Floors: HP 0, Stagger 0, SP `-max_sp`. HP or SP at its floor means dead;
//! Stagger at its floor means staggered.

/// Enum representing individual resource pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ResourceKind {
    Hp,
    Sp,
    Stagger,
}

/// A clamped pool `{current, max, floor}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceMeter {
    pub current: i32,
    pub max: i32,
    pub floor: i32,
}

impl ResourceMeter {
    /// Full meter with a floor of zero.
    pub fn new(max: i32) -> Self {
        Self::with_floor(max, 0)
    }

    pub fn with_floor(max: i32, floor: i32) -> Self {
        let max = max.max(floor);
        Self {
            current: max,
            max,
            floor,
        }
    }

    pub fn set_current(&mut self, value: i32) {
        self.current = value.clamp(self.floor, self.max);
    }

    /// Changes the maximum and re-clamps the current value.
    pub fn set_max(&mut self, max: i32) {
        self.max = max.max(self.floor);
        self.current = self.current.clamp(self.floor, self.max);
    }

    pub fn set_floor(&mut self, floor: i32) {
        self.floor = floor.min(self.max);
        self.current = self.current.clamp(self.floor, self.max);
    }

    /// Removes up to `amount`; returns what was actually removed.
    pub fn lose(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let before = self.current;
        self.current = self.current.saturating_sub(amount).max(self.floor);
        before - self.current
    }

    /// Adds up to `amount`; returns what was actually added.
    pub fn gain(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= self.floor
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

/// The three pools every unit carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pools {
    pub hp: ResourceMeter,
    pub sp: ResourceMeter,
    pub stagger: ResourceMeter,
}

impl Pools {
    pub fn new(max_hp: i32, max_sp: i32, max_stagger: i32) -> Self {
        let mut sp = ResourceMeter::with_floor(max_sp, -max_sp.max(0));
        sp.current = 0.clamp(sp.floor, sp.max);
        Self {
            hp: ResourceMeter::new(max_hp),
            sp,
            stagger: ResourceMeter::new(max_stagger),
        }
    }

    pub fn get(&self, kind: ResourceKind) -> &ResourceMeter {
        match kind {
            ResourceKind::Hp => &self.hp,
            ResourceKind::Sp => &self.sp,
            ResourceKind::Stagger => &self.stagger,
        }
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut ResourceMeter {
        match kind {
            ResourceKind::Hp => &mut self.hp,
            ResourceKind::Sp => &mut self.sp,
            ResourceKind::Stagger => &mut self.stagger,
        }
    }

    /// HP and Stagger back to their maxima, SP back to neutral.
    pub fn refill(&mut self) {
        self.hp.refill();
        self.sp.set_current(0);
        self.stagger.refill();
    }

    /// Applies new maxima; SP's floor follows its maximum.
    pub fn set_maxima(&mut self, max_hp: i32, max_sp: i32, max_stagger: i32) {
        self.hp.set_max(max_hp);
        self.sp.set_max(max_sp);
        self.sp.set_floor(-max_sp.max(0));
        self.stagger.set_max(max_stagger);
    }
}
