/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// When set, area attacks may hit actors sharing the caster's faction.
    pub pvp_enabled: bool,
    /// Damage multiplier applied when an attack's school counters the target's faction.
    pub type_advantage_multiplier: f32,
    /// Floor applied to any positive damage after defense mitigation.
    pub minimum_damage: f32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// One slot per status effect type; a target never holds two of the same type.
    pub const MAX_STATUS_EFFECTS: usize = 6;
    pub const MAX_LOOT_ENTRIES: usize = 16;

    /// Remaining times at or below this value count as elapsed.
    ///
    /// Fixed steps accumulate float error; without the snap a 0.5s cooldown
    /// ticked five times by 0.1s can be left a few ulps above zero.
    pub const TIME_EPSILON: f32 = 1e-4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TYPE_ADVANTAGE: f32 = 1.5;
    pub const DEFAULT_MINIMUM_DAMAGE: f32 = 1.0;

    pub fn new() -> Self {
        Self {
            pvp_enabled: false,
            type_advantage_multiplier: Self::DEFAULT_TYPE_ADVANTAGE,
            minimum_damage: Self::DEFAULT_MINIMUM_DAMAGE,
        }
    }

    pub fn with_pvp(mut self, enabled: bool) -> Self {
        self.pvp_enabled = enabled;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
