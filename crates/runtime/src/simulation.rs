//! Fixed-step simulation loop.
//!
//! [`Simulation`] owns the world, queues cast intents between steps and feeds
//! them to the engine one fixed step at a time. After every step the emitted
//! events are logged, run through the handler registry and published on the
//! event bus.

use tokio::sync::broadcast;
use tracing::{error, warn};

use combat_core::{
    ActorId, CastIntent, CombatConfig, CombatEngine, CombatWorld, CooldownLedger, FrameOutcome,
    Point, ResourceLedger,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic, log_event};
use crate::handlers::{EventHandler, HandlerContext, HandlerRegistry, SessionRecord};
use crate::oracle::OracleManager;

/// Who drives a spawned actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    /// The player: takes the reserved player id and ends the game on death.
    Player,
    /// Scripted or AI driven; control follows the template.
    Npc,
}

/// Steps run by one [`Simulation::advance`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvanceReport {
    pub frames: Vec<FrameOutcome>,
    /// Whole fixed steps discarded because the step budget was exhausted.
    pub dropped_steps: u32,
}

/// Real-time combat session driven in fixed steps.
pub struct Simulation {
    config: RuntimeConfig,
    oracles: OracleManager,
    world: CombatWorld,
    bus: EventBus,
    handlers: HandlerRegistry,
    record: SessionRecord,
    pending: Vec<CastIntent>,
    accumulator: f32,
}

impl Simulation {
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    /// Spawns an actor from a template at `position`.
    pub fn spawn(
        &mut self,
        template_id: &str,
        position: Point,
        controller: Controller,
    ) -> Result<ActorId> {
        let template = self.oracles.template(template_id)?;
        let id = match controller {
            Controller::Player => {
                if self.world.actor(ActorId::PLAYER).is_some() {
                    return Err(RuntimeError::PlayerAlreadySpawned);
                }
                ActorId::PLAYER
            }
            Controller::Npc => self.world.allocate_actor_id(),
        };
        let (mut actor, pools) = template.to_actor(id, position);
        if controller == Controller::Player {
            actor = actor.player_controlled();
        }
        tracing::debug!(actor = %id, template = template_id, %position, "spawned actor");
        self.world.spawn(actor, pools);
        Ok(id)
    }

    /// Queues a cast for the next step.
    ///
    /// Unknown attack ids are content errors and are refused here, before
    /// they could abort a frame. Gameplay checks (cooldown, energy) happen
    /// when the step runs.
    pub fn queue_cast(&mut self, intent: CastIntent) -> Result<()> {
        if !self.oracles.has_attack(intent.attack.as_str()) {
            error!(caster = %intent.caster, attack = %intent.attack, "unknown attack id");
            return Err(RuntimeError::UnknownAttack(intent.attack));
        }
        self.pending.push(intent);
        Ok(())
    }

    /// Runs one fixed step with every queued intent.
    ///
    /// On error the queued intents are discarded.
    pub fn step(&mut self) -> Result<FrameOutcome> {
        let intents = std::mem::take(&mut self.pending);
        let env = self.oracles.env(&self.config.combat);
        let result = CombatEngine::new(&mut self.world).step(&env, self.config.fixed_step, &intents);
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(frame = self.world.frame, error = %err, "frame aborted");
                return Err(err.into());
            }
        };
        self.dispatch(&outcome);
        Ok(outcome)
    }

    /// Accumulates `frame_dt` seconds of real time and runs the fixed steps it covers.
    ///
    /// At most `max_steps_per_advance` steps run; whole steps beyond that are
    /// dropped so a long stall cannot snowball.
    pub fn advance(&mut self, frame_dt: f32) -> Result<AdvanceReport> {
        let step = self.config.fixed_step;
        self.accumulator += frame_dt.max(0.0);

        let mut report = AdvanceReport::default();
        while self.accumulator + CombatConfig::TIME_EPSILON >= step
            && (report.frames.len() as u32) < self.config.max_steps_per_advance
        {
            self.accumulator -= step;
            report.frames.push(self.step()?);
        }

        if self.accumulator + CombatConfig::TIME_EPSILON >= step {
            let dropped = ((self.accumulator + CombatConfig::TIME_EPSILON) / step).floor();
            self.accumulator = (self.accumulator - dropped * step).max(0.0);
            report.dropped_steps = dropped as u32;
            warn!(
                dropped = report.dropped_steps,
                budget = self.config.max_steps_per_advance,
                "simulation fell behind; dropping fixed steps"
            );
        }
        Ok(report)
    }

    /// Receiver for events published on `topic` from now on.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn world(&self) -> &CombatWorld {
        &self.world
    }

    pub fn resources(&self) -> &ResourceLedger {
        &self.world.resources
    }

    pub fn cooldowns(&self) -> &CooldownLedger {
        &self.world.cooldowns
    }

    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn pending_casts(&self) -> &[CastIntent] {
        &self.pending
    }

    pub fn is_game_over(&self) -> bool {
        self.world.is_game_over()
    }

    fn dispatch(&mut self, outcome: &FrameOutcome) {
        for event in &outcome.events {
            log_event(outcome.frame, event);
        }
        let mut ctx = HandlerContext {
            frame: outcome.frame,
            record: &mut self.record,
        };
        self.handlers.dispatch(&outcome.events, &mut ctx);
        for event in &outcome.events {
            self.bus.publish(Event::new(outcome.frame, event.clone()));
        }
    }
}

/// Builder for [`Simulation`].
pub struct SimulationBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    handlers: Option<HandlerRegistry>,
}

impl SimulationBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            handlers: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Replace the default handler set.
    pub fn handlers(mut self, handlers: HandlerRegistry) -> Self {
        self.handlers = Some(handlers);
        self
    }

    /// Add a handler on top of the default (or previously set) handlers.
    pub fn add_handler(mut self, handler: impl EventHandler + 'static) -> Self {
        self.handlers
            .get_or_insert_with(HandlerRegistry::with_defaults)
            .add_handler(Box::new(handler));
        self
    }

    pub fn build(self) -> Result<Simulation> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        Ok(Simulation {
            world: CombatWorld::new(self.config.seed),
            bus: EventBus::with_capacity(self.config.event_capacity),
            handlers: self.handlers.unwrap_or_default(),
            record: SessionRecord::default(),
            pending: Vec::new(),
            accumulator: 0.0,
            config: self.config,
            oracles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulation() -> Simulation {
        Simulation::builder()
            .oracles(OracleManager::embedded().unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn build_requires_oracles() {
        assert!(matches!(
            Simulation::builder().build(),
            Err(RuntimeError::MissingOracles)
        ));
    }

    #[test]
    fn second_player_is_refused() {
        let mut sim = simulation();
        assert_eq!(
            sim.spawn("player", Point::ORIGIN, Controller::Player).unwrap(),
            ActorId::PLAYER
        );
        assert!(matches!(
            sim.spawn("player", Point::ORIGIN, Controller::Player),
            Err(RuntimeError::PlayerAlreadySpawned)
        ));
        assert_eq!(
            sim.spawn("goblin", Point::ORIGIN, Controller::Npc).unwrap(),
            ActorId(1)
        );
    }

    #[test]
    fn unknown_template_is_refused() {
        let mut sim = simulation();
        assert!(matches!(
            sim.spawn("dragon", Point::ORIGIN, Controller::Npc),
            Err(RuntimeError::UnknownTemplate(_))
        ));
        assert!(sim.world().actors.is_empty());
    }

    #[test]
    fn unknown_attack_fails_fast() {
        let mut sim = simulation();
        let caster = sim.spawn("fah_adept", Point::ORIGIN, Controller::Npc).unwrap();
        let err = sim
            .queue_cast(CastIntent::new(caster, "meteor", Point::ORIGIN))
            .unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownAttack(id) if id.as_str() == "meteor"));
        assert!(sim.pending_casts().is_empty());
    }

    #[test]
    fn advance_caps_steps_and_drops_the_rest() {
        let mut sim = Simulation::builder()
            .oracles(OracleManager::embedded().unwrap())
            .config(RuntimeConfig {
                fixed_step: 0.1,
                max_steps_per_advance: 3,
                ..RuntimeConfig::default()
            })
            .build()
            .unwrap();

        let report = sim.advance(0.25).unwrap();
        assert_eq!(report.frames.len(), 2);
        assert_eq!(report.dropped_steps, 0);

        let report = sim.advance(1.0).unwrap();
        assert_eq!(report.frames.len(), 3);
        assert_eq!(report.dropped_steps, 7);
        assert_eq!(sim.world().frame, 5);
    }
}
