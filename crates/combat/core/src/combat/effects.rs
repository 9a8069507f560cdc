//! Status effect lifecycle: apply, replace, tick, expire, revert.
//!
//! Slows (freeze and elemental) remember the speed the target had before any
//! slow was applied. While several slows are active their factors multiply
//! against that shared base, and removing the last one restores it exactly.

use crate::config::CombatConfig;
use crate::env::{EffectSpec, EffectTemplate};
use crate::events::{CombatEvent, DamageCause, RemovalReason};
use crate::ledger::ResourceLedger;
use crate::state::{Actor, ActorId, StatusEffect, StatusEffectKind, StatusEffectType};

/// Result of ticking one actor's effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectTick {
    /// Set when effect damage dropped the actor to zero health.
    pub died: bool,
    /// Source of the effect that dealt the killing damage.
    pub killer: Option<ActorId>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StatusEffectEngine;

impl StatusEffectEngine {
    /// Applies `template` to `target`, replacing any effect of the same type.
    ///
    /// Returns false when the target is dead and nothing was applied.
    pub fn apply(
        target: &mut Actor,
        template: &EffectTemplate,
        source: Option<ActorId>,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        if !target.is_alive() {
            return false;
        }

        let ty = template.effect.effect_type();
        if let Some(previous) = target.status.remove(ty) {
            Self::revert(&previous, target);
            events.push(CombatEvent::StatusRemoved {
                target: target.id,
                effect: ty,
                reason: RemovalReason::Replaced,
            });
        }

        let kind = match template.effect {
            EffectSpec::Burn { damage_per_second } => StatusEffectKind::Burn { damage_per_second },
            EffectSpec::Freeze { slow_factor } => StatusEffectKind::Freeze {
                slow_factor,
                original_speed: Self::unslowed_speed(target),
            },
            EffectSpec::Stun => {
                target.set_moving(false);
                StatusEffectKind::Stun
            }
            EffectSpec::Armor { damage_reduction } => {
                target.damage_reduction = damage_reduction;
                StatusEffectKind::Armor { damage_reduction }
            }
            EffectSpec::Regeneration {
                heal_per_second,
                energy_per_second,
            } => StatusEffectKind::Regeneration {
                heal_per_second,
                energy_per_second,
            },
            EffectSpec::Elemental {
                damage_per_second,
                slow_factor,
            } => StatusEffectKind::Elemental {
                damage_per_second,
                slow_factor,
                original_speed: Self::unslowed_speed(target),
            },
        };

        target
            .status
            .insert(StatusEffect::new(kind, template.duration, source));
        if ty.is_slow() {
            Self::refresh_speed(target);
        }

        events.push(CombatEvent::StatusApplied {
            target: target.id,
            effect: ty,
            duration: template.duration.max(0.0),
            source,
        });
        true
    }

    /// Advances every effect on `target` by `dt` seconds.
    ///
    /// Each effect contributes over `min(dt, remaining)` so a tick never
    /// overshoots an effect's duration. Ticking stops at the first death;
    /// the caller hands the actor to the death resolver, which clears the
    /// remaining effects.
    pub fn tick(
        target: &mut Actor,
        resources: &mut ResourceLedger,
        dt: f32,
        events: &mut Vec<CombatEvent>,
    ) -> EffectTick {
        let mut outcome = EffectTick::default();
        if !target.is_alive() {
            return outcome;
        }

        for ty in target.status.types() {
            let Some(effect) = target.status.get(ty).copied() else {
                continue;
            };
            let step = dt.min(effect.remaining).max(0.0);

            match effect.kind {
                StatusEffectKind::Burn { damage_per_second } => {
                    Self::deal(target, &effect, ty, damage_per_second * step, events);
                }
                StatusEffectKind::Freeze { .. } => Self::refresh_speed(target),
                StatusEffectKind::Stun => target.set_moving(false),
                StatusEffectKind::Armor { damage_reduction } => {
                    target.damage_reduction = damage_reduction;
                }
                StatusEffectKind::Regeneration {
                    heal_per_second,
                    energy_per_second,
                } => {
                    let healed = target.heal(heal_per_second * step);
                    if healed > 0.0 {
                        events.push(CombatEvent::Healed {
                            target: target.id,
                            amount: healed,
                            health_after: target.health,
                        });
                    }
                    // Actors without energy pools gain nothing.
                    resources.restore(target.id, energy_per_second * step).ok();
                }
                StatusEffectKind::Elemental {
                    damage_per_second, ..
                } => {
                    Self::deal(target, &effect, ty, damage_per_second * step, events);
                    Self::refresh_speed(target);
                }
            }

            if target.health <= 0.0 {
                outcome.died = true;
                outcome.killer = effect.source;
                return outcome;
            }

            let expired = match target.status.get_mut(ty) {
                Some(live) => {
                    live.remaining -= dt;
                    live.remaining <= CombatConfig::TIME_EPSILON
                }
                None => false,
            };
            if !expired {
                continue;
            }
            if let Some(removed) = target.status.remove(ty) {
                Self::revert(&removed, target);
                events.push(CombatEvent::StatusRemoved {
                    target: target.id,
                    effect: ty,
                    reason: RemovalReason::Expired,
                });
            }
        }
        outcome
    }

    /// Undoes the side effects of an instance already removed from `target`.
    ///
    /// A removed slow hands speed back to the remaining slow, or restores the
    /// pre-slow speed when it was the last one. Armor clears the target's
    /// damage reduction. Other types have nothing to undo.
    pub fn revert(effect: &StatusEffect, target: &mut Actor) {
        match effect.kind {
            StatusEffectKind::Freeze { original_speed, .. }
            | StatusEffectKind::Elemental { original_speed, .. } => {
                if target.status.iter().any(|e| e.effect_type().is_slow()) {
                    Self::refresh_speed(target);
                } else {
                    target.speed = original_speed;
                }
            }
            StatusEffectKind::Armor { .. } => target.damage_reduction = 0.0,
            StatusEffectKind::Burn { .. }
            | StatusEffectKind::Stun
            | StatusEffectKind::Regeneration { .. } => {}
        }
    }

    /// Reverts and removes every effect on `target`, in application order.
    pub fn clear(target: &mut Actor, reason: RemovalReason, events: &mut Vec<CombatEvent>) {
        for effect in target.status.take_all() {
            Self::revert(&effect, target);
            events.push(CombatEvent::StatusRemoved {
                target: target.id,
                effect: effect.effect_type(),
                reason,
            });
        }
    }

    fn deal(
        target: &mut Actor,
        effect: &StatusEffect,
        ty: StatusEffectType,
        amount: f32,
        events: &mut Vec<CombatEvent>,
    ) {
        let dealt = target.apply_damage(amount);
        if dealt > 0.0 {
            events.push(CombatEvent::DamageApplied {
                source: effect.source,
                target: target.id,
                amount: dealt,
                health_after: target.health,
                cause: DamageCause::Effect(ty),
            });
        }
    }

    /// Speed the target would have without any slow.
    fn unslowed_speed(target: &Actor) -> f32 {
        target
            .status
            .iter()
            .find_map(|e| e.kind.slow())
            .map_or(target.speed, |(_, original)| original)
    }

    /// Re-derives speed from the shared pre-slow base and every active slow.
    fn refresh_speed(target: &mut Actor) {
        let mut base = None;
        let mut factor = 1.0;
        for (slow, original) in target.status.iter().filter_map(|e| e.kind.slow()) {
            base.get_or_insert(original);
            factor *= 1.0 - slow;
        }
        if let Some(base) = base {
            target.speed = base * factor;
        }
    }
}
