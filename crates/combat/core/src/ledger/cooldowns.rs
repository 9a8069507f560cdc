use std::collections::BTreeMap;

use crate::config::CombatConfig;
use crate::state::{ActorId, AttackId};

/// Remaining cooldown per (actor, attack).
///
/// Entries are never negative and are pruned once they reach zero, so an
/// absent entry means the attack is ready.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownLedger {
    entries: BTreeMap<ActorId, BTreeMap<AttackId, f32>>,
}

impl CooldownLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self, actor: ActorId, attack: &AttackId) -> bool {
        self.remaining(actor, attack) <= 0.0
    }

    /// Seconds until `attack` is ready for `actor`; zero when ready.
    pub fn remaining(&self, actor: ActorId, attack: &AttackId) -> f32 {
        self.entries
            .get(&actor)
            .and_then(|timers| timers.get(attack))
            .copied()
            .unwrap_or(0.0)
    }

    /// Starts (or restarts) a cooldown. Negative durations floor to zero.
    pub fn start(&mut self, actor: ActorId, attack: &AttackId, seconds: f32) {
        let seconds = seconds.max(0.0);
        if seconds <= CombatConfig::TIME_EPSILON {
            if let Some(timers) = self.entries.get_mut(&actor) {
                timers.remove(attack);
                if timers.is_empty() {
                    self.entries.remove(&actor);
                }
            }
            return;
        }
        self.entries
            .entry(actor)
            .or_default()
            .insert(attack.clone(), seconds);
    }

    /// Decrements every timer by `dt` and prunes the ones that reached zero.
    pub fn tick(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.entries.retain(|_, timers| {
            timers.retain(|_, remaining| {
                *remaining = (*remaining - dt).max(0.0);
                *remaining > CombatConfig::TIME_EPSILON
            });
            !timers.is_empty()
        });
    }

    pub fn forget_actor(&mut self, actor: ActorId) {
        self.entries.remove(&actor);
    }

    /// Active timers of one actor.
    pub fn timers(&self, actor: ActorId) -> impl Iterator<Item = (&AttackId, f32)> {
        self.entries
            .get(&actor)
            .into_iter()
            .flat_map(|timers| timers.iter().map(|(id, remaining)| (id, *remaining)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
