//! Runtime orchestration for the real-time combat engine.
//!
//! This crate wires the pure `combat-core` rules to loaded content, a
//! fixed-step clock, reactive handlers and a topic-based event bus.
//!
//! Modules are organized by responsibility:
//! - [`simulation`] hosts the fixed-step loop and its builder
//! - [`scenario`] plays scripted scenarios and produces reports
//! - [`events`] provides the topic-based event bus and combat log
//! - [`handlers`] keeps session bookkeeping (kills, loot, stats)
//! - [`oracle`] owns the loaded catalogs
pub mod config;
pub mod error;
pub mod events;
pub mod handlers;
pub mod oracle;
pub mod scenario;
pub mod simulation;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{Event, EventBus, Topic, log_event};
pub use handlers::{
    ActorStats, Casualty, DeathHandler, EventHandler, GroundItem, HandlerContext, HandlerRegistry,
    LootHandler, SessionRecord, StatsHandler,
};
pub use oracle::OracleManager;
pub use scenario::{ActorReport, ScenarioReport, ScenarioRunner};
pub use simulation::{AdvanceReport, Controller, Simulation, SimulationBuilder};
