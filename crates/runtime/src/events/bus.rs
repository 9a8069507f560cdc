//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use combat_core::CombatEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Casts, damage, healing and status changes
    Combat,
    /// Visual requests and loot a presentation layer draws
    Visual,
    /// Deaths, loot and game over
    World,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Combat, Topic::Visual, Topic::World];
}

/// A combat event stamped with the frame that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Frame counter after the step that emitted the event.
    pub frame: u64,
    pub event: CombatEvent,
}

impl Event {
    pub fn new(frame: u64, event: CombatEvent) -> Self {
        Self { frame, event }
    }

    /// Topics this event is delivered to.
    ///
    /// Loot drops are both rendered and world changes, so they reach two topics.
    pub fn topics(&self) -> impl Iterator<Item = Topic> + '_ {
        let visual = self.event.is_visual();
        let world = self.event.is_world_change();
        Topic::ALL.into_iter().filter(move |topic| match topic {
            Topic::Visual => visual,
            Topic::World => world,
            Topic::Combat => !visual && !world,
        })
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. The channels are never locked, so publishing
/// from the simulation loop does not need an async runtime.
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity.max(1)).0))
            .collect();

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to every topic it belongs to.
    pub fn publish(&self, event: Event) {
        for topic in event.topics() {
            if let Some(tx) = self.channels.get(&topic) {
                if tx.send(event.clone()).is_err() {
                    // No subscribers for this topic - this is normal, not an error
                    tracing::trace!("No subscribers for topic {:?}", topic);
                }
            }
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        match self.channels.get(&topic) {
            Some(tx) => tx.subscribe(),
            // Every topic is created in `with_capacity`; a detached receiver never yields.
            None => broadcast::channel(1).1,
        }
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    /// Number of live receivers on `topic`.
    pub fn receiver_count(&self, topic: Topic) -> usize {
        self.channels
            .get(&topic)
            .map_or(0, broadcast::Sender::receiver_count)
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{ActorId, ItemId, Point};

    use super::*;

    fn died() -> Event {
        Event::new(
            3,
            CombatEvent::ActorDied {
                actor: ActorId(2),
                killer: None,
                position: Point::ORIGIN,
            },
        )
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        EventBus::new().publish(died());
    }

    #[test]
    fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut world = bus.subscribe(Topic::World);
        let mut combat = bus.subscribe(Topic::Combat);

        bus.publish(died());

        assert_eq!(world.try_recv().unwrap(), died());
        assert!(combat.try_recv().is_err());
    }

    #[test]
    fn loot_reaches_visual_and_world() {
        let bus = EventBus::new();
        let mut receivers = bus.subscribe_multiple(&Topic::ALL);
        bus.publish(Event::new(
            1,
            CombatEvent::LootDropped {
                source: ActorId(4),
                item: ItemId::new("coin"),
                position: Point::ORIGIN,
            },
        ));

        assert!(receivers.get_mut(&Topic::Visual).unwrap().try_recv().is_ok());
        assert!(receivers.get_mut(&Topic::World).unwrap().try_recv().is_ok());
        assert!(receivers.get_mut(&Topic::Combat).unwrap().try_recv().is_err());
    }
}
