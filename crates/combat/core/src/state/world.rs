use std::collections::{BTreeMap, BTreeSet};

use crate::ledger::{CooldownLedger, EnergyPools, ResourceLedger};

use super::{ActiveAttackInstance, Actor, ActorId, Faction};

/// Whether the simulation still accepts casts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Running,
    /// The player-controlled actor died. Frames become no-ops.
    GameOver,
}

/// All mutable combat state.
///
/// Actors, energy pools, cooldowns and live attacks are explicit tables keyed
/// by id. Every mutation goes through [`crate::engine::CombatEngine`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatWorld {
    /// Deterministic seed mixed into every random roll.
    pub seed: u64,
    pub actors: BTreeMap<ActorId, Actor>,
    pub resources: ResourceLedger,
    pub cooldowns: CooldownLedger,
    pub attacks: Vec<ActiveAttackInstance>,
    /// Living non-player actors hostile to the player side.
    pub active_enemies: BTreeSet<ActorId>,
    pub phase: GamePhase,
    /// Number of completed fixed steps.
    pub frame: u64,
    /// Simulated seconds since the world was created.
    pub elapsed: f32,
    next_actor_id: u32,
    next_instance_id: u64,
}

impl CombatWorld {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            next_actor_id: 1,
            next_instance_id: 1,
            ..Self::default()
        }
    }

    /// Allocates an actor id. Id 0 is reserved for the player.
    pub fn allocate_actor_id(&mut self) -> ActorId {
        if self.next_actor_id == ActorId::PLAYER.0 {
            self.next_actor_id = 1;
        }
        while self.actors.contains_key(&ActorId(self.next_actor_id)) {
            self.next_actor_id = self.next_actor_id.wrapping_add(1).max(1);
        }
        let id = ActorId(self.next_actor_id);
        self.next_actor_id = self.next_actor_id.wrapping_add(1).max(1);
        id
    }

    pub(crate) fn allocate_instance_id(&mut self) -> u64 {
        let id = self.next_instance_id.max(1);
        self.next_instance_id = id + 1;
        id
    }

    /// Inserts an actor with its energy pools, replacing any previous actor with the same id.
    ///
    /// Living non-player actors whose faction differs from `Player` are tracked
    /// as active enemies.
    pub fn spawn(&mut self, actor: Actor, pools: EnergyPools) {
        let id = actor.id;
        if actor.is_alive() && !actor.is_player_controlled() && actor.faction != Faction::Player {
            self.active_enemies.insert(id);
        } else {
            self.active_enemies.remove(&id);
        }
        self.resources.insert(id, pools);
        self.actors.insert(id, actor);
    }

    /// Removes an actor and every ledger entry it owns.
    pub fn despawn(&mut self, id: ActorId) -> Option<Actor> {
        self.active_enemies.remove(&id);
        self.resources.remove(id);
        self.cooldowns.forget_actor(id);
        self.actors.remove(&id)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    pub fn is_alive(&self, id: ActorId) -> bool {
        self.actor(id).is_some_and(Actor::is_alive)
    }

    /// Ids of living actors in ascending order.
    pub fn living_ids(&self) -> Vec<ActorId> {
        self.actors
            .values()
            .filter(|actor| actor.is_alive())
            .map(|actor| actor.id)
            .collect()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
