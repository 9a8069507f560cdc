//! Deterministic real-time combat rules shared across runtimes and tools.
//!
//! `combat-core` turns a cast request into energy expenditure, cooldown
//! gating, area target selection, damage, and timed status effects. State
//! lives in explicit tables ([`state::CombatWorld`], [`ledger::ResourceLedger`],
//! [`ledger::CooldownLedger`]) and every mutation flows through
//! [`engine::CombatEngine`], which reports what happened as [`CombatEvent`]s.
//! Static content (attacks, loot tables, actor templates) is read through the
//! oracle traits in [`env`].
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod ledger;
pub mod state;

pub use combat::{DamageCalculator, DeathResolver, EffectTick, StatusEffectEngine, TargetResolver};
pub use config::CombatConfig;
pub use engine::{
    ActiveAttackInstance, AttackPhase, CastError, CastIntent, CastOutcome, CastRejection,
    CombatEngine, FrameOutcome,
};
pub use env::{
    ActorCatalog, ActorOracle, ActorTemplate, ActorTemplateBuilder, AttackCatalog,
    AttackDefinition, AttackOracle, CombatEnv, DefinitionError, EffectSpec, EffectTemplate,
    EnergyCost, LootCatalog, LootEntry, LootOracle, LootTable, OracleError, PcgRng, PoolTemplate,
    RngOracle, VisualKind, compute_seed,
};
pub use error::{CombatError, ErrorContext, ErrorSeverity};
pub use events::{CombatEvent, DamageCause, RemovalReason, VisualEffectRequest};
pub use ledger::{
    CooldownLedger, EnergyPool, EnergyPools, LedgerError, PoolKind, ResourceLedger,
};
pub use state::{
    Actor, ActorFlags, ActorId, AttackId, CombatWorld, Faction, GamePhase, ItemId, Point, School,
    StatusEffect, StatusEffectKind, StatusEffectType, StatusEffects,
};
