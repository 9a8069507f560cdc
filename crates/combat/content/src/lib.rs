//! Data-driven combat content and loaders.
//!
//! This crate houses the shipped combat data and the loaders that turn
//! RON/TOML files into validated catalogs:
//! - Attack definitions (`attacks.ron`)
//! - Loot tables (`loot.ron`)
//! - Actor templates (`actors.ron`)
//! - Combat tunables (`config.toml`)
//! - Scripted scenarios (`scenarios/*.ron`)
//!
//! Content is consumed by runtime oracles and never appears in combat state.

pub mod scenario;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scenario::{ScenarioActor, ScenarioSpec, ScriptedAim, ScriptedCast};

#[cfg(feature = "loaders")]
pub use loaders::{
    ActorLoader, AttackLoader, ConfigLoader, ContentFactory, LoadResult, LootLoader,
    ScenarioLoader,
};
