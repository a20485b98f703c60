//! # Payment order public API
//!
//! The `po_api` module is the facade the mobile client talks to. Each API is created by supplying the collaborators
//! it needs, so clients can pick only the parts they use.
//!
//! * [`gateway_api`] lists the payment gateways and their amount options.
//! * [`order_lifecycle_api`] creates, fetches and lists orders, and relays client-side gateway callbacks.
//! * [`exchange_rate_api`] passes MYST exchange rates through from the backend.
//! * [`notification_bridge`] redelivers order status changes from the event bus to a single registered listener.
//! * [`order_tracker`] polls the backend for status changes of recently created orders and publishes them on the
//!   event bus.
//!
//! [`order_objects`] holds the external representations of orders, gateways and updates, and the conversions into
//! them.
//!
//! # API usage
//!
//! ```rust,ignore
//! use payment_order_engine::{OrderLifecycleApi, InMemoryOrderBackend, FixedLocationResolver};
//! let api = OrderLifecycleApi::new(InMemoryOrderBackend::default(), FixedLocationResolver::new("lt"));
//! let orders = api.list_orders("0x1234").await?;
//! ```

pub mod errors;
pub mod exchange_rate_api;
pub mod gateway_api;
pub mod notification_bridge;
pub mod order_lifecycle_api;
pub mod order_objects;
pub mod order_tracker;
