//! Content factory for building catalogs from a data directory.

use std::path::{Path, PathBuf};

use combat_core::{ActorCatalog, AttackCatalog, CombatConfig, LootCatalog};

use crate::loaders::{
    ActorLoader, AttackLoader, ConfigLoader, LoadResult, LootLoader, ScenarioLoader,
};
use crate::scenario::ScenarioSpec;

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── attacks.ron
/// ├── loot.ron
/// ├── actors.ron
/// └── scenarios/
///     ├── duel.ron
///     └── skirmish.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the attack catalog from `attacks.ron`.
    pub fn load_attacks(&self) -> LoadResult<AttackCatalog> {
        AttackLoader::load(&self.data_dir.join("attacks.ron"))
    }

    /// Load loot tables from `loot.ron`.
    pub fn load_loot(&self) -> LoadResult<LootCatalog> {
        LootLoader::load(&self.data_dir.join("loot.ron"))
    }

    /// Load actor templates from `actors.ron`.
    pub fn load_actors(&self) -> LoadResult<ActorCatalog> {
        ActorLoader::load(&self.data_dir.join("actors.ron"))
    }

    /// Load a scenario from `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<ScenarioSpec> {
        let path = self.data_dir.join("scenarios").join(format!("{}.ron", name));
        ScenarioLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory of the data files shipped with this crate.
    pub fn bundled_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use combat_core::AttackOracle;

    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_directory_loads_completely() {
        let factory = ContentFactory::new(ContentFactory::bundled_data_dir());
        assert!(factory.load_attacks().unwrap().attack("fireDart").is_some());
        assert!(!factory.load_loot().unwrap().is_empty());
        assert!(!factory.load_actors().unwrap().is_empty());
        assert_eq!(factory.load_config().unwrap(), CombatConfig::default());
        assert_eq!(factory.load_scenario("duel").unwrap().name, "duel");
    }

    #[test]
    fn reads_from_custom_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "pvp_enabled = true\n").unwrap();
        fs::create_dir(dir.path().join("scenarios")).unwrap();
        fs::write(
            dir.path().join("scenarios").join("empty.ron"),
            r#"(name: "empty", duration: 1.0, actors: [])"#,
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        assert!(factory.load_config().unwrap().pvp_enabled);
        assert!(factory.load_scenario("empty").unwrap().casts.is_empty());

        let err = factory.load_attacks().unwrap_err();
        assert!(err.to_string().contains("attacks.ron"));
    }
}
