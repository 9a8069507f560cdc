//! Observable outcomes of combat resolution.
//!
//! The engine never logs or renders anything itself. Every state change a
//! presentation layer or log may care about is returned as a [`CombatEvent`].

use crate::engine::CastRejection;
use crate::env::VisualKind;
use crate::state::{ActorId, AttackId, ItemId, Point, School, StatusEffectType};

/// Request for the presentation layer to spawn an attack visual.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisualEffectRequest {
    pub school: School,
    pub origin: Point,
    pub radius: f32,
    pub kind: VisualKind,
    /// Seconds the visual should stay on screen.
    pub lifetime: f32,
}

/// What dealt a chunk of damage.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageCause {
    Attack(AttackId),
    Effect(StatusEffectType),
}

/// Why a status effect left its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RemovalReason {
    Expired,
    Replaced,
    Death,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    CastAccepted {
        caster: ActorId,
        attack: AttackId,
        instance: u64,
        aim: Point,
    },
    CastRejected {
        caster: ActorId,
        attack: AttackId,
        reason: CastRejection,
    },
    VisualEffect(VisualEffectRequest),
    DamageApplied {
        source: Option<ActorId>,
        target: ActorId,
        amount: f32,
        health_after: f32,
        cause: DamageCause,
    },
    Healed {
        target: ActorId,
        amount: f32,
        health_after: f32,
    },
    StatusApplied {
        target: ActorId,
        effect: StatusEffectType,
        duration: f32,
        source: Option<ActorId>,
    },
    StatusRemoved {
        target: ActorId,
        effect: StatusEffectType,
        reason: RemovalReason,
    },
    ActorDied {
        actor: ActorId,
        killer: Option<ActorId>,
        position: Point,
    },
    LootDropped {
        source: ActorId,
        item: ItemId,
        position: Point,
    },
    AttackExpired {
        instance: u64,
        attack: AttackId,
    },
    GameOver {
        player: ActorId,
    },
}

impl CombatEvent {
    /// Returns true for events a presentation layer renders (visuals, loot on the ground).
    pub fn is_visual(&self) -> bool {
        matches!(self, Self::VisualEffect(_) | Self::LootDropped { .. })
    }

    /// Returns true for events that change who is in the world.
    pub fn is_world_change(&self) -> bool {
        matches!(
            self,
            Self::ActorDied { .. } | Self::LootDropped { .. } | Self::GameOver { .. }
        )
    }

    /// Stable snake_case name of the variant, for logs and reports.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CastAccepted { .. } => "cast_accepted",
            Self::CastRejected { .. } => "cast_rejected",
            Self::VisualEffect(_) => "visual_effect",
            Self::DamageApplied { .. } => "damage_applied",
            Self::Healed { .. } => "healed",
            Self::StatusApplied { .. } => "status_applied",
            Self::StatusRemoved { .. } => "status_removed",
            Self::ActorDied { .. } => "actor_died",
            Self::LootDropped { .. } => "loot_dropped",
            Self::AttackExpired { .. } => "attack_expired",
            Self::GameOver { .. } => "game_over",
        }
    }
}
