//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat tunables from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn load_embedded() -> LoadResult<CombatConfig> {
        Self::parse(include_str!("../../data/config.toml"))
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        if config.type_advantage_multiplier < 0.0 || config.minimum_damage < 0.0 {
            anyhow::bail!("Invalid config: multipliers and minimum damage must be >= 0");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("pvp_enabled = true\n").unwrap();
        assert!(config.pvp_enabled);
        assert_eq!(
            config.type_advantage_multiplier,
            CombatConfig::DEFAULT_TYPE_ADVANTAGE
        );
    }

    #[test]
    fn embedded_config_matches_defaults() {
        assert_eq!(ConfigLoader::load_embedded().unwrap(), CombatConfig::default());
    }

    #[test]
    fn rejects_negative_minimum() {
        assert!(ConfigLoader::parse("minimum_damage = -1.0").is_err());
    }
}
