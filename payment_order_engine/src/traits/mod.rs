//! # Collaborator contracts
//!
//! The payment order engine does not talk to gateways, price orders or persist anything itself. Those concerns belong
//! to collaborators, and this module defines the contracts they must honour:
//!
//! * [`OrderBackend`] is the backend order service. It creates, stores and prices orders, knows the available gateways
//!   and relays client callbacks to gateway integrations.
//! * [`LocationResolver`] reports where the node is, based on its IP address. It is used to default the billing
//!   country when a client does not provide one.
//!
//! The event bus contract lives with the bus itself, in [`crate::events`].
mod location_resolver;
mod order_backend;

pub use location_resolver::{LocationError, LocationResolver, Origin};
pub use order_backend::{OrderBackend, OrderBackendError};
