//! Traits describing read-only combat content.
//!
//! Oracles expose attack definitions, loot tables, actor templates and the
//! deterministic RNG. [`CombatEnv`] bundles the ones the engine needs so it
//! never couples to a concrete content source.
mod actors;
mod attacks;
mod error;
mod loot;
mod rng;

pub use actors::{ActorCatalog, ActorOracle, ActorTemplate, ActorTemplateBuilder, PoolTemplate};
pub use attacks::{
    AttackCatalog, AttackDefinition, AttackOracle, DefinitionError, EffectSpec, EffectTemplate,
    EnergyCost, VisualKind,
};
pub use error::OracleError;
pub use loot::{LootCatalog, LootEntry, LootOracle, LootTable};
pub use rng::{PcgRng, RngOracle, compute_seed};

use crate::config::CombatConfig;

/// Read-only oracles and tunables borrowed for one engine call.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    attacks: Option<&'a dyn AttackOracle>,
    loot: Option<&'a dyn LootOracle>,
    rng: Option<&'a dyn RngOracle>,
    config: &'a CombatConfig,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        attacks: Option<&'a dyn AttackOracle>,
        loot: Option<&'a dyn LootOracle>,
        rng: Option<&'a dyn RngOracle>,
        config: &'a CombatConfig,
    ) -> Self {
        Self {
            attacks,
            loot,
            rng,
            config,
        }
    }

    pub fn with_all(
        attacks: &'a dyn AttackOracle,
        loot: &'a dyn LootOracle,
        rng: &'a dyn RngOracle,
        config: &'a CombatConfig,
    ) -> Self {
        Self::new(Some(attacks), Some(loot), Some(rng), config)
    }

    /// Returns the AttackOracle.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::AttacksNotAvailable` if no attack oracle was provided.
    pub fn attacks(&self) -> Result<&'a dyn AttackOracle, OracleError> {
        self.attacks.ok_or(OracleError::AttacksNotAvailable)
    }

    /// Returns the LootOracle.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::LootNotAvailable` if no loot oracle was provided.
    pub fn loot(&self) -> Result<&'a dyn LootOracle, OracleError> {
        self.loot.ok_or(OracleError::LootNotAvailable)
    }

    /// Returns the RngOracle.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a dyn RngOracle, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    pub fn config(&self) -> &'a CombatConfig {
        self.config
    }

    /// Looks up an attack definition by id.
    pub fn attack(&self, id: &str) -> Result<&'a AttackDefinition, OracleError> {
        self.attacks()?
            .attack(id)
            .ok_or_else(|| OracleError::AttackNotFound(id.into()))
    }
}

impl std::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("attacks", &self.attacks.is_some())
            .field("loot", &self.loot.is_some())
            .field("rng", &self.rng.is_some())
            .field("config", self.config)
            .finish()
    }
}
