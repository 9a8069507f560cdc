//! Scripted scenario execution.
//!
//! A [`ScenarioSpec`] places actors from templates and schedules casts by
//! timestamp. [`ScenarioRunner`] plays it through a [`Simulation`] until the
//! duration elapses or the player dies, then summarises the result.

mod report;

pub use report::{ActorReport, ScenarioReport};

use std::collections::BTreeMap;

use combat_content::{ScenarioSpec, ScriptedAim};
use combat_core::{ActorId, CastIntent, CombatConfig, PoolKind};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::oracle::OracleManager;
use crate::simulation::{Controller, Simulation};

/// Runs scenarios against a fixed set of oracles.
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    oracles: OracleManager,
    config: RuntimeConfig,
}

impl ScenarioRunner {
    pub fn new(oracles: OracleManager, config: RuntimeConfig) -> Self {
        Self { oracles, config }
    }

    /// Plays `spec` to completion.
    ///
    /// A scripted cast fires on the first frame starting at or after its
    /// timestamp. The scenario seed and friendly-fire override, when present,
    /// replace the runner's configuration.
    pub fn run(&self, spec: &ScenarioSpec) -> Result<ScenarioReport> {
        let spec = self.validate(spec)?;

        let mut config = self.config.clone();
        if let Some(seed) = spec.seed {
            config.seed = seed;
        }
        if let Some(pvp) = spec.pvp {
            config.combat.pvp_enabled = pvp;
        }
        let step = config.fixed_step;
        let mut sim = Simulation::builder()
            .oracles(self.oracles.clone())
            .config(config)
            .build()?;

        let mut ids = BTreeMap::new();
        for actor in &spec.actors {
            let controller = if self.oracles.template(&actor.template)?.player_controlled {
                Controller::Player
            } else {
                Controller::Npc
            };
            let id = sim.spawn(&actor.template, actor.position, controller)?;
            ids.insert(actor.label.as_str(), id);
        }

        let total = frame_count(spec.duration, step);
        tracing::info!(
            scenario = %spec.name,
            actors = spec.actors.len(),
            casts = spec.casts.len(),
            frames = total,
            "running scenario"
        );

        let mut cursor = 0;
        for frame in 0..total {
            if sim.is_game_over() {
                break;
            }
            let now = frame as f32 * step;
            while let Some(cast) = spec.casts.get(cursor) {
                if cast.at > now + CombatConfig::TIME_EPSILON {
                    break;
                }
                let caster = lookup(&spec, &ids, &cast.caster)?;
                let aim = match &cast.aim {
                    ScriptedAim::Point(point) => *point,
                    ScriptedAim::Actor(label) => {
                        let target = lookup(&spec, &ids, label)?;
                        sim.world()
                            .actor(target)
                            .map(|actor| actor.position)
                            .ok_or(RuntimeError::UnknownActor(target))?
                    }
                };
                sim.queue_cast(CastIntent::new(caster, cast.attack.as_str(), aim))?;
                cursor += 1;
            }
            sim.step()?;
        }

        let report = build_report(&spec, &ids, &sim, cursor);
        tracing::info!(
            scenario = %report.scenario,
            frames = report.frames,
            game_over = report.game_over,
            casualties = report.casualties.len(),
            "scenario finished"
        );
        Ok(report)
    }

    /// Checks labels, timestamps and attack ids before anything is spawned.
    fn validate(&self, spec: &ScenarioSpec) -> Result<ScenarioSpec> {
        let mut spec = spec.clone();
        spec.normalize().map_err(|message| RuntimeError::Scenario {
            scenario: spec.name.clone(),
            message,
        })?;
        for actor in &spec.actors {
            self.oracles.template(&actor.template)?;
        }
        for cast in &spec.casts {
            if !self.oracles.has_attack(&cast.attack) {
                tracing::error!(scenario = %spec.name, attack = %cast.attack, "unknown attack id");
                return Err(RuntimeError::UnknownAttack(cast.attack.as_str().into()));
            }
        }
        Ok(spec)
    }
}

/// Fixed steps covering `duration` seconds.
fn frame_count(duration: f32, step: f32) -> u64 {
    if duration <= 0.0 || step <= 0.0 {
        return 0;
    }
    (duration / step - 1e-3).ceil().max(0.0) as u64
}

fn lookup(spec: &ScenarioSpec, ids: &BTreeMap<&str, ActorId>, label: &str) -> Result<ActorId> {
    ids.get(label)
        .copied()
        .ok_or_else(|| RuntimeError::Scenario {
            scenario: spec.name.clone(),
            message: format!("unknown actor label '{}'", label),
        })
}

fn build_report(
    spec: &ScenarioSpec,
    ids: &BTreeMap<&str, ActorId>,
    sim: &Simulation,
    fired: usize,
) -> ScenarioReport {
    let world = sim.world();
    let record = sim.record();
    let actors = spec
        .actors
        .iter()
        .filter_map(|placed| {
            let id = *ids.get(placed.label.as_str())?;
            let actor = world.actor(id)?;
            let energy = |kind| sim.resources().current(id, kind).unwrap_or(0.0);
            Some(ActorReport {
                label: placed.label.clone(),
                template: placed.template.clone(),
                id,
                faction: actor.faction,
                alive: actor.is_alive(),
                health: actor.health,
                max_health: actor.max_health,
                fah: energy(PoolKind::Fah),
                brih: energy(PoolKind::Brih),
                stats: record.stats(id),
            })
        })
        .collect();

    ScenarioReport {
        scenario: spec.name.clone(),
        seed: world.seed,
        pvp: sim.config().combat.pvp_enabled,
        frames: world.frame,
        elapsed: world.elapsed,
        game_over: world.is_game_over(),
        actors,
        casualties: record.casualties.clone(),
        ground_items: record.ground_items.clone(),
        unfired_casts: spec.casts.len() - fired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_count_covers_duration() {
        assert_eq!(frame_count(3.0, 1.0 / 60.0), 180);
        assert_eq!(frame_count(0.25, 0.1), 3);
        assert_eq!(frame_count(0.0, 0.1), 0);
        assert_eq!(frame_count(1.0, 0.1), 10);
    }
}
