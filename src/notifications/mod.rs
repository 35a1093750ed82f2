//! Notifications module
//!
//! Change notifications from the directory to whatever is rendering it.
//!
//! # Usage
//! ```ignore
//! use oceanwatch::notifications::{create_event_bus, Event, PresenceTickedEvent};
//!
//! let event_bus = create_event_bus();
//! let mut subscriber = event_bus.subscribe();
//!
//! event_bus.publish(Event::PresenceTicked(PresenceTickedEvent {
//!     total: 8,
//!     online: 3,
//! }));
//! ```

pub mod event_bus;
pub mod events;

pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::*;
