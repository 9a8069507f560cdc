//! Topic-based event bus for combat events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need.

mod bus;
mod log;

pub use bus::{Event, EventBus, Topic};
pub use log::log_event;
