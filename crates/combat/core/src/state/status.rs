//! Timed status effects attached to actors.
//!
//! An actor holds at most one effect per [`StatusEffectType`]. Re-applying a
//! type replaces the old instance; the lifecycle rules (revert on removal,
//! per-tick payload, expiry) live in [`crate::combat::StatusEffectEngine`].

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::state::ActorId;

/// Discriminant of a status effect, one slot per type on each actor.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusEffectType {
    Burn,
    Freeze,
    Stun,
    Armor,
    Regeneration,
    Elemental,
}

impl StatusEffectType {
    /// Returns true for effect types that lower movement speed.
    pub const fn is_slow(self) -> bool {
        matches!(self, Self::Freeze | Self::Elemental)
    }
}

/// Payload of a live status effect instance.
///
/// Slow payloads carry the speed the target had before any slow was applied,
/// so removal can restore it exactly.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    Burn {
        damage_per_second: f32,
    },
    Freeze {
        slow_factor: f32,
        original_speed: f32,
    },
    Stun,
    Armor {
        damage_reduction: f32,
    },
    Regeneration {
        heal_per_second: f32,
        energy_per_second: f32,
    },
    Elemental {
        damage_per_second: f32,
        slow_factor: f32,
        original_speed: f32,
    },
}

impl StatusEffectKind {
    pub const fn effect_type(&self) -> StatusEffectType {
        match self {
            Self::Burn { .. } => StatusEffectType::Burn,
            Self::Freeze { .. } => StatusEffectType::Freeze,
            Self::Stun => StatusEffectType::Stun,
            Self::Armor { .. } => StatusEffectType::Armor,
            Self::Regeneration { .. } => StatusEffectType::Regeneration,
            Self::Elemental { .. } => StatusEffectType::Elemental,
        }
    }

    /// Slow factor and captured pre-slow speed, for slowing payloads.
    pub const fn slow(&self) -> Option<(f32, f32)> {
        match *self {
            Self::Freeze {
                slow_factor,
                original_speed,
            }
            | Self::Elemental {
                slow_factor,
                original_speed,
                ..
            } => Some((slow_factor, original_speed)),
            _ => None,
        }
    }

    /// Damage dealt per second, for damaging payloads.
    pub const fn damage_per_second(&self) -> Option<f32> {
        match *self {
            Self::Burn { damage_per_second } | Self::Elemental { damage_per_second, .. } => {
                Some(damage_per_second)
            }
            _ => None,
        }
    }
}

/// A single status effect instance on an actor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Seconds left before the effect expires.
    pub remaining: f32,
    /// Actor credited with damage or kills caused by this effect.
    pub source: Option<ActorId>,
}

impl StatusEffect {
    pub fn new(kind: StatusEffectKind, duration: f32, source: Option<ActorId>) -> Self {
        Self {
            kind,
            remaining: duration.max(0.0),
            source,
        }
    }

    #[inline]
    pub const fn effect_type(&self) -> StatusEffectType {
        self.kind.effect_type()
    }
}

/// Ordered set of active effects, at most one per type.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn contains(&self, ty: StatusEffectType) -> bool {
        self.effects.iter().any(|e| e.effect_type() == ty)
    }

    pub fn get(&self, ty: StatusEffectType) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.effect_type() == ty)
    }

    pub fn get_mut(&mut self, ty: StatusEffectType) -> Option<&mut StatusEffect> {
        self.effects.iter_mut().find(|e| e.effect_type() == ty)
    }

    /// Appends an effect whose type is not yet present.
    ///
    /// Callers must remove an existing instance of the same type first.
    pub fn insert(&mut self, effect: StatusEffect) {
        debug_assert!(
            !self.contains(effect.effect_type()),
            "duplicate status effect type {}",
            effect.effect_type()
        );
        if self.contains(effect.effect_type()) {
            return;
        }
        // One slot exists per type, so a set without this type has room.
        self.effects.push(effect);
    }

    /// Removes the instance of `ty`, preserving the order of the rest.
    pub fn remove(&mut self, ty: StatusEffectType) -> Option<StatusEffect> {
        let index = self.effects.iter().position(|e| e.effect_type() == ty)?;
        Some(self.effects.remove(index))
    }

    /// Removes every effect and returns them in application order.
    pub fn take_all(&mut self) -> ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }> {
        std::mem::take(&mut self.effects)
    }

    /// Types currently present, in application order.
    pub fn types(&self) -> ArrayVec<StatusEffectType, { CombatConfig::MAX_STATUS_EFFECTS }> {
        self.effects.iter().map(StatusEffect::effect_type).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burn(dps: f32, remaining: f32) -> StatusEffect {
        StatusEffect::new(
            StatusEffectKind::Burn {
                damage_per_second: dps,
            },
            remaining,
            None,
        )
    }

    #[test]
    fn insert_and_remove_preserve_order() {
        let mut effects = StatusEffects::empty();
        effects.insert(burn(3.0, 2.0));
        effects.insert(StatusEffect::new(StatusEffectKind::Stun, 1.0, None));
        effects.insert(StatusEffect::new(
            StatusEffectKind::Armor {
                damage_reduction: 4.0,
            },
            5.0,
            None,
        ));

        let removed = effects.remove(StatusEffectType::Stun).unwrap();
        assert_eq!(removed.kind, StatusEffectKind::Stun);
        assert_eq!(
            effects.types().as_slice(),
            &[StatusEffectType::Burn, StatusEffectType::Armor]
        );
        assert!(effects.remove(StatusEffectType::Stun).is_none());
    }

    #[test]
    fn one_of_every_type_fits() {
        let kinds = [
            StatusEffectKind::Burn {
                damage_per_second: 1.0,
            },
            StatusEffectKind::Freeze {
                slow_factor: 0.5,
                original_speed: 4.0,
            },
            StatusEffectKind::Stun,
            StatusEffectKind::Armor {
                damage_reduction: 2.0,
            },
            StatusEffectKind::Regeneration {
                heal_per_second: 1.0,
                energy_per_second: 1.0,
            },
            StatusEffectKind::Elemental {
                damage_per_second: 1.0,
                slow_factor: 0.25,
                original_speed: 4.0,
            },
        ];
        let mut effects = StatusEffects::empty();
        for kind in kinds {
            effects.insert(StatusEffect::new(kind, 1.0, None));
        }
        assert_eq!(effects.len(), CombatConfig::MAX_STATUS_EFFECTS);
        assert!(effects.contains(StatusEffectType::Elemental));
    }

    #[test]
    #[should_panic(expected = "duplicate status effect type")]
    fn duplicate_type_is_rejected_in_debug() {
        let mut effects = StatusEffects::empty();
        effects.insert(burn(3.0, 2.0));
        effects.insert(burn(5.0, 1.0));
    }

    #[test]
    fn negative_duration_clamps_to_zero() {
        assert_eq!(burn(1.0, -3.0).remaining, 0.0);
    }

    #[test]
    fn slow_payload_accessors() {
        let freeze = StatusEffectKind::Freeze {
            slow_factor: 0.5,
            original_speed: 4.0,
        };
        assert_eq!(freeze.slow(), Some((0.5, 4.0)));
        assert_eq!(freeze.damage_per_second(), None);
        assert!(freeze.effect_type().is_slow());
        assert!(!StatusEffectType::Burn.is_slow());
    }
}
