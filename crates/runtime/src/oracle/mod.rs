//! Runtime owner of static combat content.
//!
//! Catalogs are loaded once and shared behind `Arc`, then bundled into a
//! [`CombatEnv`] for every engine call. The data is immutable at runtime;
//! dynamic state lives in [`combat_core::CombatWorld`].

use std::sync::Arc;

use combat_content::ContentFactory;
use combat_core::{
    ActorCatalog, ActorOracle, ActorTemplate, AttackCatalog, AttackOracle, CombatConfig, CombatEnv,
    LootCatalog, LootOracle, PcgRng,
};

use crate::error::{Result, RuntimeError};

/// Manages all oracle implementations and provides unified access.
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) attacks: Arc<AttackCatalog>,
    pub(crate) loot: Arc<LootCatalog>,
    pub(crate) actors: Arc<ActorCatalog>,
    pub(crate) config: CombatConfig,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    /// Bundles the catalogs after checking that every template's loot table
    /// exists in `loot`.
    pub fn new(
        attacks: Arc<AttackCatalog>,
        loot: Arc<LootCatalog>,
        actors: Arc<ActorCatalog>,
        config: CombatConfig,
    ) -> Result<Self> {
        check_loot_references(&actors, &loot)?;
        Ok(Self {
            attacks,
            loot,
            actors,
            config,
            rng: PcgRng,
        })
    }

    /// Loads every catalog and `config.toml` from a data directory.
    pub fn from_factory(factory: &ContentFactory) -> Result<Self> {
        let attacks = factory.load_attacks().map_err(RuntimeError::Content)?;
        let loot = factory.load_loot().map_err(RuntimeError::Content)?;
        let actors = factory.load_actors().map_err(RuntimeError::Content)?;
        let config = factory.load_config().map_err(RuntimeError::Content)?;
        tracing::info!(
            data_dir = %factory.data_dir().display(),
            attacks = attacks.len(),
            loot_tables = loot.len(),
            actors = actors.len(),
            "loaded combat content"
        );
        Self::new(
            Arc::new(attacks),
            Arc::new(loot),
            Arc::new(actors),
            config,
        )
    }

    /// Builds the oracles from the data shipped inside `combat-content`.
    pub fn embedded() -> Result<Self> {
        use combat_content::{ActorLoader, AttackLoader, ConfigLoader, LootLoader};

        Self::new(
            Arc::new(AttackLoader::load_embedded().map_err(RuntimeError::Content)?),
            Arc::new(LootLoader::load_embedded().map_err(RuntimeError::Content)?),
            Arc::new(ActorLoader::load_embedded().map_err(RuntimeError::Content)?),
            ConfigLoader::load_embedded().map_err(RuntimeError::Content)?,
        )
    }

    /// Bundles the oracles with `config` for one engine call.
    pub fn env<'a>(&'a self, config: &'a CombatConfig) -> CombatEnv<'a> {
        CombatEnv::with_all(
            self.attacks.as_ref(),
            self.loot.as_ref(),
            &self.rng,
            config,
        )
    }

    /// Bundles the oracles with the loaded content configuration.
    pub fn as_combat_env(&self) -> CombatEnv<'_> {
        self.env(&self.config)
    }

    pub fn attacks(&self) -> &AttackCatalog {
        &self.attacks
    }

    pub fn loot(&self) -> &LootCatalog {
        &self.loot
    }

    pub fn actors(&self) -> &ActorCatalog {
        &self.actors
    }

    /// Configuration loaded alongside the catalogs.
    pub fn combat_config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn has_attack(&self, id: &str) -> bool {
        self.attacks.attack(id).is_some()
    }

    pub fn template(&self, id: &str) -> Result<&ActorTemplate> {
        self.actors
            .template(id)
            .ok_or_else(|| RuntimeError::UnknownTemplate(id.to_owned()))
    }
}

fn check_loot_references(actors: &ActorCatalog, loot: &LootCatalog) -> Result<()> {
    for id in actors.ids() {
        let Some(table) = actors.template(&id).and_then(|t| t.loot_table.as_deref()) else {
            continue;
        };
        if loot.table(table).is_none() {
            tracing::error!(template = %id, table, "actor template references unknown loot table");
            return Err(RuntimeError::UnresolvedLootTable {
                template: id,
                table: table.to_owned(),
            });
        }
    }
    Ok(())
}

impl std::fmt::Debug for OracleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleManager")
            .field("attacks", &self.attacks.len())
            .field("loot", &self.loot.len())
            .field("actors", &self.actors.len())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_resolves_attacks_and_templates() {
        let oracles = OracleManager::embedded().unwrap();
        assert!(oracles.has_attack("fireDart"));
        assert!(!oracles.has_attack("meteor"));
        assert!(oracles.template("goblin").is_ok());
        assert!(matches!(
            oracles.template("dragon"),
            Err(RuntimeError::UnknownTemplate(id)) if id == "dragon"
        ));
        assert!(oracles.as_combat_env().attack("emberNova").is_ok());
    }

    #[test]
    fn unresolved_loot_table_is_refused_at_load() {
        let hostile = ActorTemplate::builder()
            .max_health(10.0)
            .loot_table("missing")
            .build();
        let actors = ActorCatalog::new([("raider".to_owned(), hostile)]).unwrap();
        let err = OracleManager::new(
            Arc::new(AttackCatalog::default()),
            Arc::new(LootCatalog::default()),
            Arc::new(actors),
            CombatConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::UnresolvedLootTable { ref template, ref table }
                if template == "raider" && table == "missing"
        ));
        assert_eq!(err.severity(), combat_core::ErrorSeverity::Fatal);
    }

    #[test]
    fn missing_directory_is_a_content_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = OracleManager::from_factory(&ContentFactory::new(dir.path())).unwrap_err();
        assert!(matches!(err, RuntimeError::Content(_)));
    }
}
