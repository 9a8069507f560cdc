//! Runtime configuration.
//!
//! Values come from code, or from `COMBAT_*` environment variables via
//! [`RuntimeConfig::from_env`]. Unset or unparsable variables keep defaults.

use std::str::FromStr;

use combat_core::CombatConfig;

/// Configuration for the fixed-step simulation loop.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Seconds simulated by one call to `Simulation::step`.
    pub fixed_step: f32,
    /// Upper bound on fixed steps run by a single `advance`; extra time is dropped.
    pub max_steps_per_advance: u32,
    /// World seed feeding every deterministic roll.
    pub seed: u64,
    /// Buffered events per event bus topic.
    pub event_capacity: usize,
    pub combat: CombatConfig,
}

impl RuntimeConfig {
    pub const DEFAULT_FIXED_STEP: f32 = 1.0 / 60.0;
    pub const DEFAULT_MAX_STEPS: u32 = 8;
    pub const DEFAULT_EVENT_CAPACITY: usize = 256;

    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`, so callers can supply their own source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(step) = parse::<f32>(&lookup, "COMBAT_FIXED_STEP") {
            if step > 0.0 {
                config.fixed_step = step;
            }
        }
        if let Some(steps) = parse::<u32>(&lookup, "COMBAT_MAX_STEPS") {
            config.max_steps_per_advance = steps.max(1);
        }
        if let Some(seed) = parse(&lookup, "COMBAT_SEED") {
            config.seed = seed;
        }
        if let Some(pvp) = parse(&lookup, "COMBAT_PVP") {
            config.combat.pvp_enabled = pvp;
        }
        if let Some(capacity) = parse::<usize>(&lookup, "COMBAT_EVENT_CAPACITY") {
            config.event_capacity = capacity.max(1);
        }
        config
    }

    pub fn with_combat(mut self, combat: CombatConfig) -> Self {
        self.combat = combat;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            fixed_step: Self::DEFAULT_FIXED_STEP,
            max_steps_per_advance: Self::DEFAULT_MAX_STEPS,
            seed: 0,
            event_capacity: Self::DEFAULT_EVENT_CAPACITY,
            combat: CombatConfig::default(),
        }
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}
