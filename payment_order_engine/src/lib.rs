//! Payment Order Engine
//!
//! The payment order engine sits between a mobile client and the backend payment order service. It does not process
//! payments itself. Instead it translates the backend's order and gateway model into a stable external representation,
//! fills in the billing country when the client leaves it out, and passes order status changes on to the client.
//!
//! The library is divided into three main sections:
//! 1. Collaborator contracts ([`mod@traits`]). The backend order service and the location resolver are reached only
//!    through these traits. The [`mod@memory`] module has simple in-memory implementations of both.
//! 2. Events ([`mod@events`]). A small topic-based event bus carries [`events::OrderUpdatedEvent`]s from the order
//!    status tracker to anything that subscribes.
//! 3. The public API (`po_api`). This is what clients use: gateway catalog, order lifecycle, exchange rates, the
//!    order status tracker, and the notification bridge that redelivers order updates to a single external listener.
pub mod events;
pub mod memory;
pub mod order_types;
pub mod traits;

mod po_api;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use memory::{FixedLocationResolver, InMemoryOrderBackend};
pub use po_api::{
    errors::OrderApiError,
    exchange_rate_api::ExchangeRateApi,
    gateway_api::GatewayCatalogApi,
    notification_bridge::{OrderUpdateBridge, OrderUpdatedCallback},
    order_lifecycle_api::OrderLifecycleApi,
    order_objects,
    order_tracker::{OrderStatusTracker, TrackedOrders, TrackerPollResult},
};
