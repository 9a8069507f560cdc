//! Combat log: every emitted event rendered through `tracing`.

use combat_core::{CombatEvent, DamageCause};
use tracing::{debug, info};

/// Logs one event at the level its kind warrants.
pub fn log_event(frame: u64, event: &CombatEvent) {
    match event {
        CombatEvent::CastAccepted {
            caster,
            attack,
            instance,
            aim,
        } => debug!(frame, %caster, %attack, instance, %aim, "cast accepted"),
        CombatEvent::CastRejected {
            caster,
            attack,
            reason,
        } => debug!(frame, %caster, %attack, %reason, "cast rejected"),
        CombatEvent::VisualEffect(request) => debug!(
            frame,
            school = %request.school,
            origin = %request.origin,
            radius = request.radius,
            kind = %request.kind,
            "visual effect"
        ),
        CombatEvent::DamageApplied {
            source,
            target,
            amount,
            health_after,
            cause,
        } => {
            let cause = match cause {
                DamageCause::Attack(attack) => attack.to_string(),
                DamageCause::Effect(effect) => effect.to_string(),
            };
            debug!(frame, source = ?source, %target, amount, health_after, %cause, "damage");
        }
        CombatEvent::Healed {
            target,
            amount,
            health_after,
        } => debug!(frame, %target, amount, health_after, "healed"),
        CombatEvent::StatusApplied {
            target,
            effect,
            duration,
            ..
        } => debug!(frame, %target, %effect, duration, "status applied"),
        CombatEvent::StatusRemoved {
            target,
            effect,
            reason,
        } => debug!(frame, %target, %effect, %reason, "status removed"),
        CombatEvent::ActorDied {
            actor,
            killer,
            position,
        } => info!(frame, %actor, killer = ?killer, %position, "actor died"),
        CombatEvent::LootDropped {
            source,
            item,
            position,
        } => info!(frame, %source, %item, %position, "loot dropped"),
        CombatEvent::AttackExpired { instance, attack } => {
            debug!(frame, instance, %attack, "attack expired")
        }
        CombatEvent::GameOver { player } => info!(frame, %player, "game over"),
    }
}
