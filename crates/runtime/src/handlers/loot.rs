//! Handler that places dropped loot on the ground.

use combat_core::CombatEvent;

use super::{EventHandler, GroundItem, HandlerContext};

#[derive(Debug, Clone, Copy)]
pub struct LootHandler;

impl EventHandler for LootHandler {
    fn name(&self) -> &'static str {
        "loot"
    }

    fn handle(&self, event: &CombatEvent, ctx: &mut HandlerContext<'_>) {
        if let CombatEvent::LootDropped {
            source,
            item,
            position,
        } = event
        {
            ctx.record.ground_items.push(GroundItem {
                item: item.clone(),
                position: *position,
                dropped_by: *source,
                frame: ctx.frame,
            });
        }
    }
}
