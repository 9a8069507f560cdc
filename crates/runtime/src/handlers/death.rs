//! Handler for actor death.

use combat_core::CombatEvent;

use super::{Casualty, EventHandler, HandlerContext};

/// Handler that records casualties and credits kills.
///
/// The engine already marks the actor dead and drops it from the active
/// enemy set; this handler keeps the session-level record.
#[derive(Debug, Clone, Copy)]
pub struct DeathHandler;

impl EventHandler for DeathHandler {
    fn name(&self) -> &'static str {
        "death"
    }

    fn priority(&self) -> i32 {
        -50
    }

    fn handle(&self, event: &CombatEvent, ctx: &mut HandlerContext<'_>) {
        let CombatEvent::ActorDied { actor, killer, .. } = event else {
            return;
        };
        ctx.record.casualties.push(Casualty {
            actor: *actor,
            killer: *killer,
            frame: ctx.frame,
        });
        if let Some(killer) = killer {
            if killer != actor {
                ctx.record.stats_mut(*killer).kills += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{ActorId, Point};

    use super::*;
    use crate::handlers::SessionRecord;

    #[test]
    fn credits_killer_once_per_death() {
        let mut record = SessionRecord::default();
        let mut ctx = HandlerContext {
            frame: 9,
            record: &mut record,
        };
        for victim in [2, 3] {
            DeathHandler.handle(
                &CombatEvent::ActorDied {
                    actor: ActorId(victim),
                    killer: Some(ActorId(1)),
                    position: Point::ORIGIN,
                },
                &mut ctx,
            );
        }
        DeathHandler.handle(
            &CombatEvent::ActorDied {
                actor: ActorId(4),
                killer: None,
                position: Point::ORIGIN,
            },
            &mut ctx,
        );

        assert_eq!(record.kills(ActorId(1)), 2);
        assert_eq!(record.casualties.len(), 3);
        assert_eq!(record.casualties[0].frame, 9);
    }
}
