//! Handlers reacting to combat events after every fixed step.
//!
//! The engine reports what happened; handlers turn those reports into
//! session bookkeeping (kills, ground items, damage totals) that outlives a
//! single frame.

mod death;
mod loot;
mod stats;

pub use death::DeathHandler;
pub use loot::LootHandler;
pub use stats::StatsHandler;

use std::collections::BTreeMap;

use combat_core::{ActorId, CombatEvent, ItemId, Point};
use serde::{Deserialize, Serialize};

/// Item lying on the ground after a loot drop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundItem {
    pub item: ItemId,
    pub position: Point,
    pub dropped_by: ActorId,
    pub frame: u64,
}

/// An actor that died during the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Casualty {
    pub actor: ActorId,
    pub killer: Option<ActorId>,
    pub frame: u64,
}

/// Per-actor combat totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorStats {
    pub damage_dealt: f32,
    pub damage_taken: f32,
    pub healing: f32,
    pub casts: u32,
    pub rejected_casts: u32,
    pub kills: u32,
}

/// Everything handlers accumulated over a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub stats: BTreeMap<ActorId, ActorStats>,
    pub casualties: Vec<Casualty>,
    pub ground_items: Vec<GroundItem>,
}

impl SessionRecord {
    pub fn stats(&self, actor: ActorId) -> ActorStats {
        self.stats.get(&actor).copied().unwrap_or_default()
    }

    pub(crate) fn stats_mut(&mut self, actor: ActorId) -> &mut ActorStats {
        self.stats.entry(actor).or_default()
    }

    pub fn kills(&self, actor: ActorId) -> u32 {
        self.stats(actor).kills
    }
}

/// Context provided to handlers for one event.
pub struct HandlerContext<'a> {
    /// Frame counter after the step that produced the event
    pub frame: u64,
    pub record: &'a mut SessionRecord,
}

/// Composable reaction to combat events.
pub trait EventHandler: Send + Sync {
    /// Returns the handler name for logging and debugging.
    fn name(&self) -> &'static str;

    /// Returns execution priority (lower values execute first).
    fn priority(&self) -> i32 {
        0
    }

    /// Reacts to one event. Handlers ignore events they do not care about.
    fn handle(&self, event: &CombatEvent, ctx: &mut HandlerContext<'_>);
}

/// Ordered set of handlers run over every event of a step.
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn EventHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Registry with the death, loot and stats handlers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.add_handler(Box::new(DeathHandler));
        registry.add_handler(Box::new(LootHandler));
        registry.add_handler(Box::new(StatsHandler));
        registry
    }

    /// Adds a handler, keeping the list sorted by priority.
    ///
    /// Handlers sharing a priority run in insertion order.
    pub fn add_handler(&mut self, handler: Box<dyn EventHandler>) {
        self.handlers.push(handler);
        self.handlers.sort_by_key(|h| h.priority());
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Runs every handler over every event, events in emission order.
    pub fn dispatch(&self, events: &[CombatEvent], ctx: &mut HandlerContext<'_>) {
        for event in events {
            for handler in &self.handlers {
                tracing::trace!(handler = handler.name(), event = event.name(), "dispatch");
                handler.handle(event, ctx);
            }
        }
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
