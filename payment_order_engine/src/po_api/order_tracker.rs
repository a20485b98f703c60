//! Watches orders created through the API and publishes an [`OrderUpdatedEvent`] whenever the backend reports a new
//! status for one of them.
//!
//! Orders are watched until they reach a final status, disappear from the backend, or have been watched for longer
//! than the tracking timeout. The tracker does no scheduling of its own; something has to call
//! [`OrderStatusTracker::poll`] periodically.
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::{Arc, Mutex, PoisonError},
};

use chrono::{DateTime, Duration, Utc};
use log::*;

use crate::{
    events::{EventBus, OrderUpdatedEvent, ORDER_UPDATED_TOPIC},
    order_types::{GatewayOrder, IdentityAddress, OrderStatus},
    traits::OrderBackend,
};

#[derive(Debug, Clone)]
struct TrackedOrder {
    identity: IdentityAddress,
    status: OrderStatus,
    since: DateTime<Utc>,
}

/// The set of orders whose status is being watched. Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct TrackedOrders {
    orders: Arc<Mutex<HashMap<String, TrackedOrder>>>,
}

impl TrackedOrders {
    /// Start watching `order`. Orders that are already in a final status are ignored.
    pub fn track(&self, order: &GatewayOrder) {
        self.track_since(order, Utc::now())
    }

    pub fn track_since(&self, order: &GatewayOrder, since: DateTime<Utc>) {
        if order.status.is_final() {
            trace!("🧾️ Order {} is already {}. Not tracking it", order.id, order.status);
            return;
        }
        let tracked = TrackedOrder { identity: order.identity.clone(), status: order.status.clone(), since };
        self.lock().insert(order.id.clone(), tracked);
        debug!("🧾️ Tracking status of order {}", order.id);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn contains(&self, order_id: &str) -> bool {
        self.lock().contains_key(order_id)
    }

    fn snapshot(&self) -> Vec<(String, TrackedOrder)> {
        self.lock().iter().map(|(id, o)| (id.clone(), o.clone())).collect()
    }

    fn set_status(&self, order_id: &str, status: OrderStatus) {
        if let Some(order) = self.lock().get_mut(order_id) {
            order.status = status;
        }
    }

    fn remove(&self, order_id: &str) {
        self.lock().remove(order_id);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, TrackedOrder>> {
        self.orders.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// What happened during a single [`OrderStatusTracker::poll`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerPollResult {
    /// Orders whose status changed. An event was published for each.
    pub updated: Vec<String>,
    /// Orders that reached a final status and are no longer tracked.
    pub completed: Vec<String>,
    /// Orders that timed out or are no longer known to the backend.
    pub abandoned: Vec<String>,
    /// Orders whose status could not be fetched. They stay tracked.
    pub failed: Vec<String>,
}

impl TrackerPollResult {
    pub fn updated_count(&self) -> usize {
        self.updated.len()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn abandoned_count(&self) -> usize {
        self.abandoned.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

pub struct OrderStatusTracker<B> {
    backend: B,
    bus: EventBus<OrderUpdatedEvent>,
    tracked: TrackedOrders,
    timeout: Duration,
}

impl<B> Debug for OrderStatusTracker<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderStatusTracker(tracking: {}, timeout: {})", self.tracked.len(), self.timeout)
    }
}

impl<B> OrderStatusTracker<B> {
    pub fn new(backend: B, bus: EventBus<OrderUpdatedEvent>, tracked: TrackedOrders, timeout: Duration) -> Self {
        Self { backend, bus, tracked, timeout }
    }

    pub fn tracked_orders(&self) -> &TrackedOrders {
        &self.tracked
    }
}

impl<B> OrderStatusTracker<B>
where B: OrderBackend
{
    /// Fetch every tracked order from the backend and publish an update for each one whose status has changed.
    pub async fn poll(&self) -> TrackerPollResult {
        self.poll_at(Utc::now()).await
    }

    pub async fn poll_at(&self, now: DateTime<Utc>) -> TrackerPollResult {
        let mut result = TrackerPollResult::default();
        for (id, tracked) in self.tracked.snapshot() {
            if now - tracked.since > self.timeout {
                info!("🧾️ Order {id} is still {} after {}. No longer tracking it", tracked.status, self.timeout);
                self.tracked.remove(&id);
                result.abandoned.push(id);
                continue;
            }
            let order = match self.backend.fetch_payment_order(&tracked.identity, &id).await {
                Ok(Some(order)) => order,
                Ok(None) => {
                    warn!("🧾️ Tracked order {id} for {} no longer exists", tracked.identity);
                    self.tracked.remove(&id);
                    result.abandoned.push(id);
                    continue;
                },
                Err(e) => {
                    warn!("🧾️ Could not fetch the status of order {id}. {e}");
                    result.failed.push(id);
                    continue;
                },
            };
            if order.status != tracked.status {
                debug!("🧾️ Order {id} changed from {} to {}", tracked.status, order.status);
                self.bus.publish(ORDER_UPDATED_TOPIC, OrderUpdatedEvent::from_order(&order)).await;
                result.updated.push(id.clone());
            }
            if order.status.is_final() {
                self.tracked.remove(&id);
                result.completed.push(id);
            } else {
                self.tracked.set_status(&id, order.status);
            }
        }
        result
    }
}
