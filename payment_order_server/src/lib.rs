//! # Mobile payment orders server
//! This crate hosts an HTTP facade over the payment order engine. It is responsible for:
//! Accepting order, gateway and exchange rate requests from the mobile client.
//! Forwarding them to the backend payment order service and translating the results.
//! Polling the backend for status changes of new orders and passing them on as order updates.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/gateways`: The payment gateways and their order amount options.
//! * `/api/orders`: Create, fetch and list payment orders, and fetch order invoices.
//! * `/api/gateways/{gateway}/callback`: Relay client-side purchase callbacks to a gateway.
//! * `/api/exchange/myst/{quote}`: The MYST exchange rate.

pub mod backend_client;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod listener;
pub mod location;
pub mod routes;
pub mod server;
pub mod tracker_worker;

#[cfg(test)]
mod endpoint_tests;
