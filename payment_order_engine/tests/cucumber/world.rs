use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use cucumber::World;
use log::*;
use payment_order_engine::{
    events::{EventBus, OrderUpdatedEvent},
    order_objects::{OrderUpdatedPayload, PaymentOrder},
    FixedLocationResolver,
    GatewayCatalogApi,
    InMemoryOrderBackend,
    OrderApiError,
    OrderLifecycleApi,
    OrderStatusTracker,
    OrderUpdateBridge,
    OrderUpdatedCallback,
    TrackedOrders,
};
use tokio::time::sleep;

#[derive(Default, Debug, World)]
pub struct OrderWorld {
    pub system: Option<OrderSystem>,
    pub last_order: Option<PaymentOrder>,
    pub listed: Vec<PaymentOrder>,
    pub last_error: Option<OrderApiError>,
    pub listeners: HashMap<String, RecordingListener>,
    /// The number of order updates published on the bus so far.
    pub published: u64,
}

#[derive(Debug)]
pub struct OrderSystem {
    pub backend: InMemoryOrderBackend,
    pub locator: FixedLocationResolver,
    pub bus: EventBus<OrderUpdatedEvent>,
    pub bridge: OrderUpdateBridge,
    pub tracked: TrackedOrders,
}

impl OrderSystem {
    pub fn new(backend: InMemoryOrderBackend) -> Self {
        let bus = EventBus::default();
        let bridge = OrderUpdateBridge::new(&bus).expect("Error subscribing the notification bridge");
        debug!("🚀️ New order system created");
        Self {
            backend,
            locator: FixedLocationResolver::failing("no location configured"),
            bus,
            bridge,
            tracked: TrackedOrders::default(),
        }
    }

    pub fn lifecycle_api(&self) -> OrderLifecycleApi<InMemoryOrderBackend, FixedLocationResolver> {
        OrderLifecycleApi::new(self.backend.clone(), self.locator.clone()).with_tracked_orders(self.tracked.clone())
    }

    pub fn catalog_api(&self) -> GatewayCatalogApi<InMemoryOrderBackend> {
        GatewayCatalogApi::new(self.backend.clone())
    }

    pub fn tracker(&self) -> OrderStatusTracker<InMemoryOrderBackend> {
        OrderStatusTracker::new(self.backend.clone(), self.bus.clone(), self.tracked.clone(), chrono::Duration::hours(48))
    }
}

impl OrderWorld {
    pub fn system(&self) -> &OrderSystem {
        self.system.as_ref().expect("Order system not initialised")
    }

    pub fn system_mut(&mut self) -> &mut OrderSystem {
        self.system.as_mut().expect("Order system not initialised")
    }

    /// Wait until the bridge has handled every published update.
    pub async fn wait_for_bridge(&self) {
        let bridge = &self.system().bridge;
        for _ in 0..400 {
            if bridge.delivered_events() + bridge.dropped_events() >= self.published {
                return;
            }
            sleep(Duration::from_millis(5)).await;
        }
        panic!("Timed out waiting for {} updates. Bridge state: {bridge:?}", self.published);
    }
}

#[derive(Debug, Default, Clone)]
pub struct RecordingListener {
    pub received: Arc<Mutex<Vec<OrderUpdatedPayload>>>,
}

impl OrderUpdatedCallback for RecordingListener {
    fn on_update(&self, update: &OrderUpdatedPayload) {
        self.received.lock().unwrap().push(update.clone());
    }
}
