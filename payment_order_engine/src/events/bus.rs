//! An in-process, topic-based event bus built on [`EventHandler`] channels.
//!
//! Each call to [`EventSubscriber::subscribe_async`] creates its own channel and handler task, so a slow subscriber
//! never holds up another one, while events for a single subscription are still delivered in publishing order.
//!
//! Every published event is stamped with the next tick of the bus's [`EventClock`]. Handlers run some time after the
//! event was published, so a subscriber that cares about *when* something happened compares the stamp with the clock
//! rather than with the moment its handler runs.
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
        Mutex,
        PoisonError,
    },
};

use log::*;
use thiserror::Error;

use crate::events::{EventHandler, EventProducer, Handler};

pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventBusError {
    #[error("Cannot subscribe to {topic}: no async runtime is available to run the handler. {reason}")]
    NoRuntime { topic: String, reason: String },
}

/// A monotonic publication counter shared by a bus and everyone holding a copy.
#[derive(Debug, Clone, Default)]
pub struct EventClock(Arc<AtomicU64>);

impl EventClock {
    /// The stamp of the most recently published event, or 0 if nothing was published yet.
    pub fn now(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Advance the clock and return the new stamp.
    pub fn tick(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// An event as handed to subscribers, with the clock stamp it was published under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published<E> {
    pub sequence: u64,
    pub event: E,
}

/// Subscribe-by-topic capability. This is all the notification bridge needs to know about an event bus.
pub trait EventSubscriber<E> {
    /// Register `handler` for every event published on `topic` from now on. The handler is called asynchronously, on
    /// the bus's own task.
    fn subscribe_async(&self, topic: &str, handler: Handler<Published<E>>) -> Result<(), EventBusError>;

    /// The clock that stamps events for this subscriber.
    fn clock(&self) -> EventClock;
}

#[derive(Clone)]
pub struct EventBus<E: Send + Sync + 'static> {
    buffer_size: usize,
    clock: EventClock,
    topics: Arc<Mutex<HashMap<String, Vec<EventProducer<Published<E>>>>>>,
}

impl<E: Send + Sync + 'static> Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EventBus(buffer_size: {})", self.buffer_size)
    }
}

impl<E: Send + Sync + 'static> Default for EventBus<E> {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl<E: Send + Sync + 'static> EventBus<E> {
    pub fn new(buffer_size: usize) -> Self {
        Self { buffer_size, clock: EventClock::default(), topics: Arc::new(Mutex::new(HashMap::new())) }
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        let topics = self.topics.lock().unwrap_or_else(PoisonError::into_inner);
        topics.get(topic).map(|p| p.len()).unwrap_or(0)
    }

    fn producers_for(&self, topic: &str) -> Vec<EventProducer<Published<E>>> {
        let topics = self.topics.lock().unwrap_or_else(PoisonError::into_inner);
        topics.get(topic).cloned().unwrap_or_default()
    }
}

impl<E: Clone + Send + Sync + 'static> EventBus<E> {
    /// Publish `event` to every subscriber of `topic`. Events published on a topic nobody listens to are discarded.
    pub async fn publish(&self, topic: &str, event: E) {
        let sequence = self.clock.tick();
        let producers = self.producers_for(topic);
        if producers.is_empty() {
            trace!("📬️ No subscribers for {topic}. Event #{sequence} discarded");
            return;
        }
        trace!("📬️ Publishing event #{sequence} on {topic} to {} subscribers", producers.len());
        let published = Published { sequence, event };
        for producer in producers {
            producer.publish_event(published.clone()).await;
        }
    }
}

impl<E: Send + Sync + 'static> EventSubscriber<E> for EventBus<E> {
    fn subscribe_async(&self, topic: &str, handler: Handler<Published<E>>) -> Result<(), EventBusError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| EventBusError::NoRuntime { topic: topic.to_string(), reason: e.to_string() })?;
        let event_handler = EventHandler::new(self.buffer_size, handler);
        let producer = event_handler.subscribe();
        runtime.spawn(event_handler.start_handler());
        let mut topics = self.topics.lock().unwrap_or_else(PoisonError::into_inner);
        topics.entry(topic.to_string()).or_default().push(producer);
        debug!("📬️ New subscriber for {topic}");
        Ok(())
    }

    fn clock(&self) -> EventClock {
        self.clock.clone()
    }
}
