use crate::env::{CombatEnv, LootTable, OracleError, compute_seed};
use crate::events::{CombatEvent, RemovalReason};
use crate::state::{ActorFlags, ActorId, CombatWorld, GamePhase};

use super::StatusEffectEngine;

/// Zero-health transition, enemy bookkeeping and loot rolls.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeathResolver;

impl DeathResolver {
    /// Kills `actor` once its health reached zero.
    ///
    /// Returns `Ok(false)` without side effects when the actor is unknown or
    /// already dead, so repeated calls never drop loot twice.
    ///
    /// # Errors
    ///
    /// Fails before touching the world when the actor references a loot table
    /// the environment cannot provide.
    pub fn on_zero_health(
        world: &mut CombatWorld,
        env: &CombatEnv<'_>,
        actor: ActorId,
        killer: Option<ActorId>,
        events: &mut Vec<CombatEvent>,
    ) -> Result<bool, OracleError> {
        let Some(victim) = world.actors.get(&actor) else {
            return Ok(false);
        };
        if !victim.is_alive() {
            return Ok(false);
        }

        let table = match (&victim.loot_table, victim.is_player_controlled()) {
            (Some(id), false) => Some((Self::lookup_table(env, id)?, env.rng()?)),
            _ => None,
        };

        let seed = world.seed;
        let frame = world.frame;
        let Some(victim) = world.actors.get_mut(&actor) else {
            return Ok(false);
        };
        victim.health = 0.0;
        victim.flags.remove(ActorFlags::ALIVE | ActorFlags::MOVING);
        StatusEffectEngine::clear(victim, RemovalReason::Death, events);
        let position = victim.position;
        let player_controlled = victim.is_player_controlled();

        events.push(CombatEvent::ActorDied {
            actor,
            killer,
            position,
        });

        if player_controlled {
            world.phase = GamePhase::GameOver;
            events.push(CombatEvent::GameOver { player: actor });
            return Ok(true);
        }

        world.active_enemies.remove(&actor);
        if let Some((table, rng)) = table {
            for (index, entry) in table.entries.iter().enumerate() {
                let roll_seed = compute_seed(seed, frame, actor.0, index as u32);
                if rng.chance(roll_seed, entry.probability) {
                    events.push(CombatEvent::LootDropped {
                        source: actor,
                        item: entry.item.clone(),
                        position,
                    });
                }
            }
        }
        Ok(true)
    }

    /// Checks that the loot table of every living NPC resolves.
    ///
    /// # Errors
    ///
    /// Returns the first table the environment cannot provide.
    pub fn check_loot_tables(
        world: &CombatWorld,
        env: &CombatEnv<'_>,
    ) -> Result<(), OracleError> {
        let mut needs_rng = false;
        for actor in world.actors.values() {
            if !actor.is_alive() || actor.is_player_controlled() {
                continue;
            }
            if let Some(id) = &actor.loot_table {
                Self::lookup_table(env, id)?;
                needs_rng = true;
            }
        }
        if needs_rng {
            env.rng()?;
        }
        Ok(())
    }

    fn lookup_table<'a>(env: &CombatEnv<'a>, id: &str) -> Result<&'a LootTable, OracleError> {
        env.loot()?
            .table(id)
            .ok_or_else(|| OracleError::LootTableNotFound(id.to_owned()))
    }
}
