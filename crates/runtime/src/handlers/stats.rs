//! Handler accumulating per-actor damage, healing and cast totals.

use combat_core::CombatEvent;

use super::{EventHandler, HandlerContext};

#[derive(Debug, Clone, Copy)]
pub struct StatsHandler;

impl EventHandler for StatsHandler {
    fn name(&self) -> &'static str {
        "stats"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn handle(&self, event: &CombatEvent, ctx: &mut HandlerContext<'_>) {
        match event {
            CombatEvent::CastAccepted { caster, .. } => ctx.record.stats_mut(*caster).casts += 1,
            CombatEvent::CastRejected { caster, .. } => {
                ctx.record.stats_mut(*caster).rejected_casts += 1
            }
            CombatEvent::DamageApplied {
                source,
                target,
                amount,
                ..
            } => {
                ctx.record.stats_mut(*target).damage_taken += amount;
                // Damage from effects whose source died still counts for the source.
                if let Some(source) = source {
                    ctx.record.stats_mut(*source).damage_dealt += amount;
                }
            }
            CombatEvent::Healed { target, amount, .. } => {
                ctx.record.stats_mut(*target).healing += amount
            }
            _ => {}
        }
    }
}
