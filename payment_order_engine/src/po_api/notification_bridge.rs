//! Redelivers order status changes from the internal event bus to a single external listener.
//!
//! The bridge subscribes to [`ORDER_UPDATED_TOPIC`] once, when it is created, and stays subscribed for as long as the
//! bus keeps running. Each event is projected to an [`OrderUpdatedPayload`] and handed to the registered listener.
//! There is at most one listener. Registering another one replaces it, and events that arrive while no listener is
//! registered are dropped rather than queued.
//!
//! A listener only ever sees events published after it was registered. The bus stamps each event from its clock when
//! it is published, and the bridge notes the clock reading at registration, so an event that was still waiting in the
//! bus's buffer when the listener arrived is dropped too.
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
    Mutex,
    PoisonError,
};

use futures_util::FutureExt;
use log::*;

use crate::{
    events::{EventBusError, EventClock, EventSubscriber, Handler, OrderUpdatedEvent, Published, ORDER_UPDATED_TOPIC},
    po_api::order_objects::OrderUpdatedPayload,
};

/// The consumer of order update notifications, typically the mobile client.
///
/// `on_update` is called from the event bus task. It must return quickly and must not block.
pub trait OrderUpdatedCallback: Send + Sync {
    fn on_update(&self, update: &OrderUpdatedPayload);
}

impl<F> OrderUpdatedCallback for F
where F: Fn(&OrderUpdatedPayload) + Send + Sync
{
    fn on_update(&self, update: &OrderUpdatedPayload) {
        self(update)
    }
}

#[derive(Clone)]
struct Registration {
    listener: Arc<dyn OrderUpdatedCallback>,
    /// Clock reading at registration. Events stamped at or before this were published before the listener existed.
    since: u64,
}

type ListenerSlot = Arc<Mutex<Option<Registration>>>;

#[derive(Debug, Default)]
struct DeliveryStats {
    delivered: AtomicU64,
    dropped: AtomicU64,
}

#[derive(Clone)]
pub struct OrderUpdateBridge {
    listener: ListenerSlot,
    clock: EventClock,
    stats: Arc<DeliveryStats>,
}

impl std::fmt::Debug for OrderUpdateBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "OrderUpdateBridge(listener: {}, delivered: {}, dropped: {})",
            self.has_listener(),
            self.delivered_events(),
            self.dropped_events()
        )
    }
}

impl OrderUpdateBridge {
    /// Create the bridge and subscribe it to order updates on `bus`.
    pub fn new<S>(bus: &S) -> Result<Self, EventBusError>
    where S: EventSubscriber<OrderUpdatedEvent> {
        let listener: ListenerSlot = Arc::new(Mutex::new(None));
        let stats = Arc::new(DeliveryStats::default());
        bus.subscribe_async(ORDER_UPDATED_TOPIC, delivery_handler(Arc::clone(&listener), Arc::clone(&stats)))?;
        debug!("📬️ Order update bridge subscribed to {ORDER_UPDATED_TOPIC}");
        Ok(Self { listener, clock: bus.clock(), stats })
    }

    /// Make `listener` the recipient of all future order updates. Any previously registered listener stops receiving
    /// updates. Updates published before this call are not replayed.
    pub fn register_listener(&self, listener: Arc<dyn OrderUpdatedCallback>) {
        let mut slot = self.listener.lock().unwrap_or_else(PoisonError::into_inner);
        // Read under the lock, so a delivery never pairs the new listener with an older reading
        let since = self.clock.now();
        let previous = slot.replace(Registration { listener, since });
        drop(slot);
        match previous {
            Some(_) => info!("📬️ Order update listener replaced"),
            None => info!("📬️ Order update listener registered"),
        }
        trace!("📬️ Listener receives events published after #{since}");
    }

    pub fn has_listener(&self) -> bool {
        self.listener.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// The number of updates handed to a listener so far.
    pub fn delivered_events(&self) -> u64 {
        self.stats.delivered.load(Ordering::SeqCst)
    }

    /// The number of updates that had no listener to go to, either because none was registered or because they were
    /// published before the current listener was registered.
    pub fn dropped_events(&self) -> u64 {
        self.stats.dropped.load(Ordering::SeqCst)
    }
}

fn delivery_handler(listener: ListenerSlot, stats: Arc<DeliveryStats>) -> Handler<Published<OrderUpdatedEvent>> {
    Arc::new(move |published: Published<OrderUpdatedEvent>| {
        let listener = Arc::clone(&listener);
        let stats = Arc::clone(&stats);
        async move { deliver(&listener, &stats, &published) }.boxed()
    })
}

fn deliver(listener: &ListenerSlot, stats: &DeliveryStats, published: &Published<OrderUpdatedEvent>) {
    let event = &published.event;
    // The lock is released before the listener runs, so a listener may register a replacement for itself.
    let current = listener.lock().unwrap_or_else(PoisonError::into_inner).clone();
    match current {
        Some(registration) if published.sequence > registration.since => {
            let payload = OrderUpdatedPayload::from(event);
            trace!("📬️ Delivering update #{} for order {} ({})", published.sequence, payload.order_id, payload.status);
            registration.listener.on_update(&payload);
            stats.delivered.fetch_add(1, Ordering::SeqCst);
        },
        Some(_) => {
            debug!("📬️ Update for order {} was published before the listener registered. Dropped", event.id);
            stats.dropped.fetch_add(1, Ordering::SeqCst);
        },
        None => {
            debug!("📬️ No listener registered. Update for order {} dropped", event.id);
            stats.dropped.fetch_add(1, Ordering::SeqCst);
        },
    }
}
