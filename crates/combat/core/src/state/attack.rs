use super::{ActorId, AttackId, Faction, Point};

/// Lifecycle phase of a committed attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackPhase {
    /// Registered, damage not yet applied.
    Active,
    /// Damage applied; waiting for the visual lifetime to run out.
    Resolved,
    /// Lifetime elapsed; removed from the world at the end of the frame.
    Expired,
}

/// A committed attack living in the world until its visual lifetime elapses.
///
/// The caster is referenced by id only. Damage resolves even if the caster is
/// gone by the time the instance first updates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveAttackInstance {
    pub id: u64,
    pub attack: AttackId,
    pub caster: ActorId,
    /// Caster faction captured at cast time, used for friendly-fire filtering.
    pub caster_faction: Faction,
    pub origin: Point,
    pub elapsed: f32,
    pub lifetime: f32,
    pub damage_applied: bool,
    pub phase: AttackPhase,
}

impl ActiveAttackInstance {
    pub fn new(
        id: u64,
        attack: AttackId,
        caster: ActorId,
        caster_faction: Faction,
        origin: Point,
        lifetime: f32,
    ) -> Self {
        Self {
            id,
            attack,
            caster,
            caster_faction,
            origin,
            elapsed: 0.0,
            lifetime: lifetime.max(0.0),
            damage_applied: false,
            phase: AttackPhase::Active,
        }
    }

    /// Marks damage as applied. Returns false if it already was.
    pub fn mark_resolved(&mut self) -> bool {
        if self.damage_applied {
            return false;
        }
        self.damage_applied = true;
        self.phase = AttackPhase::Resolved;
        true
    }

    /// Advances the instance clock and reports whether its lifetime is spent.
    pub fn advance(&mut self, dt: f32, epsilon: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.lifetime - epsilon {
            self.phase = AttackPhase::Expired;
        }
        self.phase == AttackPhase::Expired
    }
}
