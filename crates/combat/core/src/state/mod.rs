//! Authoritative combat state.
//!
//! Runtime layers read this state freely but mutate it exclusively through
//! [`crate::engine::CombatEngine`].
mod actor;
mod attack;
mod common;
mod status;
mod world;

pub use actor::{Actor, ActorFlags};
pub use attack::{ActiveAttackInstance, AttackPhase};
pub use common::{ActorId, AttackId, Faction, ItemId, Point, School};
pub use status::{StatusEffect, StatusEffectKind, StatusEffectType, StatusEffects};
pub use world::{CombatWorld, GamePhase};
