use bitflags::bitflags;

bitflags! {
    /// Rule overrides granted by passives and statuses.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Capabilities: u32 {
        /// Losing the speed roll never destroys this unit's dice.
        const SPEED_BREAK_IMMUNE = 1 << 0;
        /// Reserve dice may still be drawn while staggered.
        const COUNTER_WHILE_STAGGERED = 1 << 1;
        /// Counter dice survive a lost speed roll.
        const UNBREAKABLE_COUNTERS = 1 << 2;
        /// The unit gets no slots and its slots do not act.
        const CANNOT_ACT = 1 << 3;
    }
}

/// Capability queries for anything that can carry mechanics.
pub trait MechanicsProvider {
    fn capabilities(&self) -> Capabilities;

    fn has(&self, flag: Capabilities) -> bool {
        self.capabilities().contains(flag)
    }

    fn immune_to_speed_break(&self) -> bool {
        self.has(Capabilities::SPEED_BREAK_IMMUNE)
    }
}
