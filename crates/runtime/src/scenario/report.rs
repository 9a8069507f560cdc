use combat_core::{ActorId, Faction};
use serde::{Deserialize, Serialize};

use crate::handlers::{ActorStats, Casualty, GroundItem};

/// Final state of one scenario actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorReport {
    pub label: String,
    pub template: String,
    pub id: ActorId,
    pub faction: Faction,
    pub alive: bool,
    pub health: f32,
    pub max_health: f32,
    pub fah: f32,
    pub brih: f32,
    pub stats: ActorStats,
}

/// Outcome of a scenario run, ready for printing or JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub scenario: String,
    pub seed: u64,
    pub pvp: bool,
    /// Fixed steps that actually ran.
    pub frames: u64,
    /// Simulated seconds.
    pub elapsed: f32,
    pub game_over: bool,
    pub actors: Vec<ActorReport>,
    pub casualties: Vec<Casualty>,
    pub ground_items: Vec<GroundItem>,
    /// Scripted casts that never fired because the run ended first.
    pub unfired_casts: usize,
}

impl ScenarioReport {
    pub fn actor(&self, label: &str) -> Option<&ActorReport> {
        self.actors.iter().find(|actor| actor.label == label)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
