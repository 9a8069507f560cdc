use crate::config::CombatConfig;
use crate::state::{Faction, School};

/// Type advantage and defense mitigation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageCalculator {
    pub type_advantage_multiplier: f32,
    pub minimum_damage: f32,
}

impl DamageCalculator {
    pub fn new(config: &CombatConfig) -> Self {
        Self {
            type_advantage_multiplier: config.type_advantage_multiplier,
            minimum_damage: config.minimum_damage,
        }
    }

    /// Damage dealt by an attack of `school` to a target of `target_faction`.
    ///
    /// Cross-element hits are multiplied by the type advantage. Defense is
    /// subtracted afterwards and any positive hit deals at least the minimum.
    pub fn compute(
        &self,
        base: f32,
        school: School,
        target_faction: Faction,
        target_defense: f32,
    ) -> f32 {
        let mut raw = base;
        if school.counters(target_faction) {
            raw *= self.type_advantage_multiplier;
        }
        if raw <= 0.0 {
            return 0.0;
        }
        (raw - target_defense).max(self.minimum_damage)
    }
}

impl Default for DamageCalculator {
    fn default() -> Self {
        Self::new(&CombatConfig::default())
    }
}
