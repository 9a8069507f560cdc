use bitflags::bitflags;

use super::{ActorId, Faction, Point, StatusEffects};

bitflags! {
    /// Lifecycle and control flags of an actor.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ActorFlags: u8 {
        const ALIVE             = 1 << 0;
        const MOVING            = 1 << 1;
        const PLAYER_CONTROLLED = 1 << 2;
    }
}

/// A combatant in the world.
///
/// Energy pools are not stored here; they live in
/// [`crate::ledger::ResourceLedger`] keyed by `id`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: ActorId,
    pub faction: Faction,
    pub position: Point,
    pub health: f32,
    pub max_health: f32,
    pub defense: f32,
    /// Current movement speed, lowered while a slow is active.
    pub speed: f32,
    /// Armor bonus added to `defense` when mitigating incoming damage.
    pub damage_reduction: f32,
    pub flags: ActorFlags,
    /// Loot table rolled when this actor dies.
    pub loot_table: Option<String>,
    pub status: StatusEffects,
}

impl Actor {
    /// Creates a living actor at full health with no effects.
    pub fn new(id: ActorId, faction: Faction, position: Point, max_health: f32) -> Self {
        let max_health = max_health.max(0.0);
        Self {
            id,
            faction,
            position,
            health: max_health,
            max_health,
            defense: 0.0,
            speed: 0.0,
            damage_reduction: 0.0,
            flags: ActorFlags::ALIVE,
            loot_table: None,
            status: StatusEffects::empty(),
        }
    }

    pub fn with_defense(mut self, defense: f32) -> Self {
        self.defense = defense;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_loot_table(mut self, table: impl Into<String>) -> Self {
        self.loot_table = Some(table.into());
        self
    }

    pub fn player_controlled(mut self) -> Self {
        self.flags.insert(ActorFlags::PLAYER_CONTROLLED);
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.flags.contains(ActorFlags::ALIVE)
    }

    #[inline]
    pub fn is_player_controlled(&self) -> bool {
        self.flags.contains(ActorFlags::PLAYER_CONTROLLED)
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.flags.contains(ActorFlags::MOVING)
    }

    pub fn set_moving(&mut self, moving: bool) {
        self.flags.set(ActorFlags::MOVING, moving);
    }

    /// Defense used by damage mitigation: base defense plus armor.
    #[inline]
    pub fn effective_defense(&self) -> f32 {
        self.defense + self.damage_reduction
    }

    /// Subtracts `amount` from health, clamped at zero. Returns the health actually lost.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        if amount <= 0.0 {
            return 0.0;
        }
        let before = self.health;
        self.health = (self.health - amount).clamp(0.0, self.max_health);
        before - self.health
    }

    /// Adds `amount` to health, clamped at `max_health`. Returns the health actually gained.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if amount <= 0.0 || !self.is_alive() {
            return 0.0;
        }
        let before = self.health;
        self.health = (self.health + amount).clamp(0.0, self.max_health);
        self.health - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy() -> Actor {
        Actor::new(ActorId(1), Faction::Brih, Point::ORIGIN, 100.0)
            .with_defense(2.0)
            .with_speed(3.0)
    }

    #[test]
    fn damage_and_heal_are_clamped() {
        let mut actor = dummy();
        assert_eq!(actor.apply_damage(30.0), 30.0);
        assert_eq!(actor.heal(50.0), 30.0);
        assert_eq!(actor.health, 100.0);
        assert_eq!(actor.apply_damage(250.0), 100.0);
        assert_eq!(actor.health, 0.0);
        assert_eq!(actor.apply_damage(-5.0), 0.0);
    }

    #[test]
    fn effective_defense_adds_armor() {
        let mut actor = dummy();
        actor.damage_reduction = 5.0;
        assert_eq!(actor.effective_defense(), 7.0);
    }

    #[test]
    fn flags_track_movement_and_control() {
        let mut actor = dummy().player_controlled();
        assert!(actor.is_alive());
        assert!(actor.is_player_controlled());
        actor.set_moving(true);
        assert!(actor.is_moving());
        actor.set_moving(false);
        assert!(!actor.is_moving());
    }
}
