//! # Events
//!
//! Order status changes are published on an in-process [`EventBus`] under [`ORDER_UPDATED_TOPIC`]. Consumers subscribe
//! by topic through the narrow [`EventSubscriber`] trait, so anything that can deliver events asynchronously can stand
//! in for the bus.
mod bus;
mod channel;
mod event_types;

pub use bus::{EventBus, EventBusError, EventClock, EventSubscriber, Published, DEFAULT_EVENT_BUFFER_SIZE};
pub use channel::{EventHandler, EventProducer, Handler};
pub use event_types::*;
