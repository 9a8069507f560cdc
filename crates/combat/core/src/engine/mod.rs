//! Attack lifecycle and fixed-step frame pipeline.
//!
//! [`CombatEngine`] is the only writer of [`CombatWorld`]. A cast moves
//! through validation (attack exists, caster alive, game running, cooldown
//! ready, energy reserved), commits a cooldown, and registers an
//! [`ActiveAttackInstance`]. The instance deals its damage on its first
//! update and lingers until its visual lifetime runs out.
mod types;

pub use crate::state::{ActiveAttackInstance, AttackPhase};
pub use types::{CastError, CastIntent, CastOutcome, CastRejection, FrameOutcome};

use crate::combat::{DamageCalculator, DeathResolver, StatusEffectEngine, TargetResolver};
use crate::config::CombatConfig;
use crate::env::{AttackDefinition, CombatEnv};
use crate::error::ErrorContext;
use crate::events::{CombatEvent, DamageCause, VisualEffectRequest};
use crate::state::{ActorId, CombatWorld, Point};

/// Reducer over [`CombatWorld`] that records what happened as events.
pub struct CombatEngine<'a> {
    world: &'a mut CombatWorld,
    events: Vec<CombatEvent>,
}

impl<'a> CombatEngine<'a> {
    pub fn new(world: &'a mut CombatWorld) -> Self {
        Self {
            world,
            events: Vec::new(),
        }
    }

    pub fn world(&self) -> &CombatWorld {
        self.world
    }

    /// Drains the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Validates and commits one cast.
    ///
    /// Rejections are ordinary outcomes and leave every ledger untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CastError::UnknownAttack`] when `attack` is not in the
    /// catalog, before any state is read or written.
    pub fn cast(
        &mut self,
        env: &CombatEnv<'_>,
        caster: ActorId,
        attack: &str,
        aim: Point,
    ) -> Result<CastOutcome, CastError> {
        let definition = self.lookup(env, caster, attack)?;

        let caster_faction = match self.world.actor(caster) {
            Some(actor) if actor.is_alive() => actor.faction,
            _ => return Ok(self.reject(caster, definition, CastRejection::CasterUnavailable)),
        };
        if self.world.is_game_over() {
            return Ok(self.reject(caster, definition, CastRejection::GameOver));
        }
        if !self.world.cooldowns.is_ready(caster, &definition.id) {
            let remaining = self.world.cooldowns.remaining(caster, &definition.id);
            return Ok(self.reject(caster, definition, CastRejection::OnCooldown { remaining }));
        }
        if !self
            .world
            .resources
            .try_reserve(caster, definition.school, &definition.energy_cost)
        {
            return Ok(self.reject(caster, definition, CastRejection::InsufficientEnergy));
        }

        self.world
            .cooldowns
            .start(caster, &definition.id, definition.cooldown);

        let id = self.world.allocate_instance_id();
        self.world.attacks.push(ActiveAttackInstance::new(
            id,
            definition.id.clone(),
            caster,
            caster_faction,
            aim,
            definition.visual_lifetime,
        ));

        self.events.push(CombatEvent::VisualEffect(VisualEffectRequest {
            school: definition.school,
            origin: aim,
            radius: definition.radius,
            kind: definition.visual,
            lifetime: definition.visual_lifetime,
        }));
        self.events.push(CombatEvent::CastAccepted {
            caster,
            attack: definition.id.clone(),
            instance: id,
            aim,
        });
        Ok(CastOutcome::Accepted { instance: id })
    }

    /// Runs one fixed frame of `dt` seconds.
    ///
    /// Order: energy regeneration, cooldown tick, this frame's casts, attack
    /// instances, then status effects of every living actor. Every intent's
    /// attack id and every living NPC's loot table is checked first, so broken
    /// content aborts the frame with no partial effects. Once the game is over
    /// the frame is skipped.
    pub fn step(
        &mut self,
        env: &CombatEnv<'_>,
        dt: f32,
        intents: &[CastIntent],
    ) -> Result<FrameOutcome, CastError> {
        if self.world.is_game_over() {
            return Ok(FrameOutcome {
                frame: self.world.frame,
                skipped: true,
                ..FrameOutcome::default()
            });
        }
        for intent in intents {
            self.lookup(env, intent.caster, intent.attack.as_str())?;
        }
        DeathResolver::check_loot_tables(self.world, env)?;

        let dt = dt.max(0.0);
        let living = self.world.living_ids();
        self.world.resources.regen_all(&living, dt);
        self.world.cooldowns.tick(dt);

        let mut casts = Vec::with_capacity(intents.len());
        for intent in intents {
            casts.push(self.cast(env, intent.caster, intent.attack.as_str(), intent.aim)?);
        }

        self.update_attacks(env, dt)?;
        self.tick_effects(env, dt)?;

        self.world.frame += 1;
        self.world.elapsed += dt;
        Ok(FrameOutcome {
            frame: self.world.frame,
            casts,
            events: self.take_events(),
            skipped: false,
        })
    }

    fn lookup<'e>(
        &self,
        env: &CombatEnv<'e>,
        caster: ActorId,
        attack: &str,
    ) -> Result<&'e AttackDefinition, CastError> {
        env.attacks()?
            .attack(attack)
            .ok_or_else(|| CastError::UnknownAttack {
                attack: attack.into(),
                context: ErrorContext::new(self.world.frame)
                    .with_actor(caster)
                    .with_message("cast lookup"),
            })
    }

    fn reject(
        &mut self,
        caster: ActorId,
        definition: &AttackDefinition,
        reason: CastRejection,
    ) -> CastOutcome {
        self.events.push(CombatEvent::CastRejected {
            caster,
            attack: definition.id.clone(),
            reason,
        });
        CastOutcome::Rejected(reason)
    }

    fn update_attacks(&mut self, env: &CombatEnv<'_>, dt: f32) -> Result<(), CastError> {
        let mut pending = std::mem::take(&mut self.world.attacks).into_iter();
        let mut live = Vec::with_capacity(pending.len());
        while let Some(mut instance) = pending.next() {
            if !instance.damage_applied {
                if let Err(err) = self.resolve(env, &instance) {
                    // Keep every instance registered, processed or not.
                    live.push(instance);
                    live.extend(pending);
                    self.world.attacks = live;
                    return Err(err);
                }
                instance.mark_resolved();
            }
            if instance.advance(dt, CombatConfig::TIME_EPSILON) {
                self.events.push(CombatEvent::AttackExpired {
                    instance: instance.id,
                    attack: instance.attack.clone(),
                });
            } else {
                live.push(instance);
            }
        }
        self.world.attacks = live;
        Ok(())
    }

    /// Applies an instance's damage, effects, caster effects and lifesteal.
    fn resolve(
        &mut self,
        env: &CombatEnv<'_>,
        instance: &ActiveAttackInstance,
    ) -> Result<(), CastError> {
        let definition = self.lookup(env, instance.caster, instance.attack.as_str())?;
        let config = env.config();
        let friendly_filter = if config.pvp_enabled {
            None
        } else {
            Some(instance.caster_faction)
        };
        let targets = TargetResolver::find_targets(
            &self.world.actors,
            instance.origin,
            definition.radius,
            Some(instance.caster),
            friendly_filter,
        );
        let calculator = DamageCalculator::new(config);

        let mut total_dealt = 0.0;
        for target in targets {
            let Some(actor) = self.world.actor_mut(target) else {
                continue;
            };
            let damage = calculator.compute(
                definition.base_damage,
                definition.school,
                actor.faction,
                actor.effective_defense(),
            );
            let dealt = actor.apply_damage(damage);
            total_dealt += dealt;
            if dealt > 0.0 {
                self.events.push(CombatEvent::DamageApplied {
                    source: Some(instance.caster),
                    target,
                    amount: dealt,
                    health_after: actor.health,
                    cause: DamageCause::Attack(definition.id.clone()),
                });
            }

            if actor.health <= 0.0 {
                DeathResolver::on_zero_health(
                    self.world,
                    env,
                    target,
                    Some(instance.caster),
                    &mut self.events,
                )?;
                continue;
            }
            for template in &definition.effects {
                StatusEffectEngine::apply(actor, template, Some(instance.caster), &mut self.events);
            }
        }

        // The caster may have died or despawned since casting.
        let Some(caster) = self
            .world
            .actor_mut(instance.caster)
            .filter(|actor| actor.is_alive())
        else {
            return Ok(());
        };
        for template in &definition.caster_effects {
            StatusEffectEngine::apply(caster, template, Some(instance.caster), &mut self.events);
        }
        if definition.lifesteal > 0.0 && total_dealt > 0.0 {
            let healed = caster.heal(total_dealt * definition.lifesteal);
            if healed > 0.0 {
                self.events.push(CombatEvent::Healed {
                    target: instance.caster,
                    amount: healed,
                    health_after: caster.health,
                });
            }
        }
        Ok(())
    }

    fn tick_effects(&mut self, env: &CombatEnv<'_>, dt: f32) -> Result<(), CastError> {
        for id in self.world.living_ids() {
            let world = &mut *self.world;
            let Some(actor) = world.actors.get_mut(&id) else {
                continue;
            };
            let tick = StatusEffectEngine::tick(actor, &mut world.resources, dt, &mut self.events);
            if tick.died {
                DeathResolver::on_zero_health(self.world, env, id, tick.killer, &mut self.events)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{
        AttackCatalog, EffectSpec, EffectTemplate, EnergyCost, LootCatalog, OracleError, PcgRng,
    };
    use crate::ledger::{EnergyPool, EnergyPools, PoolKind};
    use crate::state::{Actor, Faction, GamePhase, School};

    const DT: f32 = 1.0 / 60.0;
    const A: ActorId = ActorId(1);
    const B: ActorId = ActorId(2);

    fn catalog() -> AttackCatalog {
        AttackCatalog::new([
            AttackDefinition::new("fireDart", School::Fah, 15.0, EnergyCost::Flat(10.0), 0.5, 1.0, 0.3)
                .with_effect(EffectTemplate::new(
                    2.0,
                    EffectSpec::Burn {
                        damage_per_second: 3.0,
                    },
                )),
            AttackDefinition::new("emberNova", School::Fah, 10.0, EnergyCost::Flat(5.0), 1.0, 3.0, 0.5),
            AttackDefinition::new("siphon", School::Combined, 10.0, EnergyCost::FREE, 0.0, 1.0, 0.0)
                .with_lifesteal(0.5),
        ])
        .unwrap()
    }

    fn pools(energy: f32) -> EnergyPools {
        EnergyPools::new(EnergyPool::full(energy, 0.0), EnergyPool::full(energy, 0.0))
    }

    fn duel(energy: f32) -> CombatWorld {
        let mut world = CombatWorld::new(11);
        world.spawn(Actor::new(A, Faction::Fah, Point::ORIGIN, 100.0), pools(energy));
        world.spawn(
            Actor::new(B, Faction::Brih, Point::new(1.0, 0.0), 100.0).with_defense(2.0),
            pools(energy),
        );
        world
    }

    fn run(
        world: &mut CombatWorld,
        config: &CombatConfig,
        frames: usize,
        intents: &[CastIntent],
    ) -> Vec<FrameOutcome> {
        let attacks = catalog();
        let loot = LootCatalog::default();
        let env = CombatEnv::with_all(&attacks, &loot, &PcgRng, config);
        let mut engine = CombatEngine::new(world);
        (0..frames)
            .map(|i| {
                let frame_intents: &[CastIntent] = if i == 0 { intents } else { &[] };
                engine.step(&env, DT, frame_intents).unwrap()
            })
            .collect()
    }

    #[test]
    fn fire_dart_end_to_end() {
        let mut world = duel(100.0);
        let config = CombatConfig::default();
        let cast = CastIntent::new(A, "fireDart", Point::new(1.0, 0.0));

        let first = run(&mut world, &config, 1, &[cast]);
        assert!(first[0].casts[0].is_accepted());
        let hit = first[0]
            .events
            .iter()
            .find_map(|e| match e {
                CombatEvent::DamageApplied {
                    amount,
                    cause: DamageCause::Attack(_),
                    ..
                } => Some(*amount),
                _ => None,
            })
            .unwrap();
        assert_eq!(hit, 20.5);
        assert_eq!(world.cooldowns.remaining(A, &"fireDart".into()), 0.5);
        assert_eq!(world.resources.current(A, PoolKind::Fah), Some(90.0));
        assert_eq!(world.resources.current(A, PoolKind::Brih), Some(100.0));

        run(&mut world, &config, 180, &[]);
        let health = world.actor(B).unwrap().health;
        assert!((health - 73.5).abs() < 0.01, "health = {health}");
        assert!(world.actor(B).unwrap().status.is_empty());
        assert!(world.attacks.is_empty());
    }

    #[test]
    fn insufficient_energy_mutates_nothing() {
        let mut world = duel(5.0);
        let config = CombatConfig::default();
        let before_cooldowns = world.cooldowns.clone();

        let frames = run(&mut world, &config, 1, &[CastIntent::new(A, "fireDart", Point::new(1.0, 0.0))]);
        assert_eq!(
            frames[0].casts[0],
            CastOutcome::Rejected(CastRejection::InsufficientEnergy)
        );
        assert_eq!(world.resources.current(A, PoolKind::Fah), Some(5.0));
        assert_eq!(world.cooldowns, before_cooldowns);
        assert!(world.attacks.is_empty());
        assert_eq!(world.actor(B).unwrap().health, 100.0);
        assert!(frames[0]
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::CastRejected { .. })));
    }

    #[test]
    fn cooldown_gates_until_elapsed() {
        let mut world = duel(100.0);
        let config = CombatConfig::default();
        let attacks = catalog();
        let loot = LootCatalog::default();
        let env = CombatEnv::with_all(&attacks, &loot, &PcgRng, &config);
        let mut engine = CombatEngine::new(&mut world);
        let cast = [CastIntent::new(A, "fireDart", Point::new(5.0, 5.0))];

        assert!(engine.step(&env, 0.1, &cast).unwrap().casts[0].is_accepted());
        for _ in 0..4 {
            let outcome = engine.step(&env, 0.1, &cast).unwrap();
            assert!(matches!(
                outcome.casts[0],
                CastOutcome::Rejected(CastRejection::OnCooldown { remaining }) if remaining > 0.0
            ));
        }
        assert!(engine.step(&env, 0.1, &cast).unwrap().casts[0].is_accepted());
        assert_eq!(world.resources.current(A, PoolKind::Fah), Some(80.0));
    }

    #[test]
    fn friendly_fire_follows_pvp_setting() {
        let build = || {
            let mut world = duel(100.0);
            world.spawn(
                Actor::new(ActorId(3), Faction::Fah, Point::new(-1.0, 0.0), 100.0),
                pools(100.0),
            );
            world
        };
        let nova = [CastIntent::new(A, "emberNova", Point::ORIGIN)];

        let mut world = build();
        run(&mut world, &CombatConfig::default(), 1, &nova);
        assert_eq!(world.actor(ActorId(3)).unwrap().health, 100.0);
        assert_eq!(world.actor(B).unwrap().health, 87.0);
        assert_eq!(world.actor(A).unwrap().health, 100.0);

        let mut world = build();
        run(&mut world, &CombatConfig::default().with_pvp(true), 1, &nova);
        assert_eq!(world.actor(ActorId(3)).unwrap().health, 90.0);
        assert_eq!(world.actor(A).unwrap().health, 100.0);
    }

    #[test]
    fn unknown_attack_aborts_frame_without_side_effects() {
        let mut world = duel(100.0);
        world.resources.set_current(A, PoolKind::Fah, 50.0).unwrap();
        world.resources.insert(
            B,
            EnergyPools::new(EnergyPool::new(0.0, 100.0, 10.0), EnergyPool::default()),
        );
        let config = CombatConfig::default();
        let attacks = catalog();
        let loot = LootCatalog::default();
        let env = CombatEnv::with_all(&attacks, &loot, &PcgRng, &config);
        let before = world.clone();
        let mut engine = CombatEngine::new(&mut world);

        let err = engine
            .step(
                &env,
                DT,
                &[
                    CastIntent::new(A, "fireDart", Point::ORIGIN),
                    CastIntent::new(A, "meteor", Point::ORIGIN),
                ],
            )
            .unwrap_err();
        assert!(matches!(err, CastError::UnknownAttack { ref attack, .. } if attack.as_str() == "meteor"));
        assert_eq!(world, before);
    }

    #[test]
    fn broken_loot_table_aborts_frame_before_any_mutation() {
        let mut world = duel(100.0);
        let config = CombatConfig::default();
        let attacks = catalog();
        let loot = LootCatalog::default();
        let env = CombatEnv::with_all(&attacks, &loot, &PcgRng, &config);

        CombatEngine::new(&mut world)
            .step(&env, DT, &[CastIntent::new(A, "emberNova", Point::new(20.0, 20.0))])
            .unwrap();
        assert_eq!(world.attacks.len(), 1);

        let raider = ActorId(5);
        world.spawn(
            Actor::new(raider, Faction::Hostile, Point::new(1.0, 0.0), 5.0)
                .with_loot_table("missing"),
            EnergyPools::default(),
        );
        let before = world.clone();
        let err = CombatEngine::new(&mut world)
            .step(&env, DT, &[CastIntent::new(A, "fireDart", Point::new(1.0, 0.0))])
            .unwrap_err();

        assert_eq!(
            err,
            CastError::Oracle(OracleError::LootTableNotFound("missing".into()))
        );
        assert_eq!(world, before);
        assert_eq!(world.attacks.len(), 1);
        assert!(world.is_alive(raider));
        assert_eq!(world.actor(raider).unwrap().health, 5.0);
    }

    #[test]
    fn failed_resolution_keeps_every_instance() {
        let mut world = duel(100.0);
        let config = CombatConfig::default();
        let attacks = catalog();
        let loot = LootCatalog::default();
        let env = CombatEnv::with_all(&attacks, &loot, &PcgRng, &config);
        {
            let mut engine = CombatEngine::new(&mut world);
            engine
                .step(&env, DT, &[CastIntent::new(A, "emberNova", Point::new(20.0, 20.0))])
                .unwrap();
            assert!(engine.cast(&env, B, "siphon", Point::ORIGIN).unwrap().is_accepted());
        }
        assert_eq!(world.attacks.len(), 2);

        // Content swapped under an unresolved instance.
        let reduced = AttackCatalog::new([AttackDefinition::new(
            "emberNova",
            School::Fah,
            10.0,
            EnergyCost::Flat(5.0),
            1.0,
            3.0,
            0.5,
        )])
        .unwrap();
        let env = CombatEnv::with_all(&reduced, &loot, &PcgRng, &config);
        let err = CombatEngine::new(&mut world).step(&env, DT, &[]).unwrap_err();

        assert!(matches!(err, CastError::UnknownAttack { ref attack, .. } if attack.as_str() == "siphon"));
        let kept: Vec<_> = world.attacks.iter().map(|i| i.attack.as_str()).collect();
        assert_eq!(kept, ["emberNova", "siphon"]);
        assert!(!world.attacks[1].damage_applied);
        assert_eq!(world.actor(A).unwrap().health, 100.0);
    }

    #[test]
    fn damage_resolves_without_caster_but_lifesteal_is_skipped() {
        let mut world = duel(100.0);
        let config = CombatConfig::default();
        let attacks = catalog();
        let loot = LootCatalog::default();
        let env = CombatEnv::with_all(&attacks, &loot, &PcgRng, &config);
        {
            let mut engine = CombatEngine::new(&mut world);
            let outcome = engine.cast(&env, A, "siphon", Point::new(1.0, 0.0)).unwrap();
            assert!(outcome.is_accepted());
        }
        world.despawn(A);
        let mut engine = CombatEngine::new(&mut world);
        let frame = engine.step(&env, DT, &[]).unwrap();
        assert_eq!(world.actor(B).unwrap().health, 92.0);
        assert!(!frame.events.iter().any(|e| matches!(e, CombatEvent::Healed { .. })));
        assert!(world.attacks.is_empty());
    }

    #[test]
    fn lifesteal_heals_living_caster() {
        let mut world = duel(100.0);
        world.actor_mut(A).unwrap().health = 50.0;
        run(&mut world, &CombatConfig::default(), 1, &[CastIntent::new(A, "siphon", Point::new(1.0, 0.0))]);
        assert_eq!(world.actor(A).unwrap().health, 54.0);
    }

    #[test]
    fn player_death_stops_the_world() {
        let mut world = CombatWorld::new(3);
        world.spawn(
            Actor::new(ActorId::PLAYER, Faction::Player, Point::ORIGIN, 5.0).player_controlled(),
            pools(0.0),
        );
        world.spawn(Actor::new(B, Faction::Brih, Point::new(0.5, 0.0), 100.0), pools(100.0));
        let config = CombatConfig::default();

        let frames = run(
            &mut world,
            &config,
            3,
            &[CastIntent::new(B, "fireDart", Point::ORIGIN)],
        );
        assert_eq!(world.phase, GamePhase::GameOver);
        assert!(frames[0]
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::GameOver { .. })));
        assert!(frames[1].skipped && frames[2].skipped);
        assert_eq!(world.frame, 1);
        // The lingering instance is frozen with the world.
        assert_eq!(world.attacks.len(), 1);
    }

    #[test]
    fn instance_expires_after_visual_lifetime() {
        let mut world = duel(100.0);
        let frames = run(
            &mut world,
            &CombatConfig::default(),
            30,
            &[CastIntent::new(A, "emberNova", Point::new(20.0, 20.0))],
        );
        let expired_at = frames
            .iter()
            .position(|f| f.events.iter().any(|e| matches!(e, CombatEvent::AttackExpired { .. })))
            .unwrap();
        assert_eq!(expired_at, 29);
        assert!(world.attacks.is_empty());
    }
}
