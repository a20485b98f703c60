//! Self-contained collaborators that keep everything in memory.
//!
//! Useful for local development and for tests that need behaviour rather than expectations. Clones share state.
mod backend;
mod location;

pub use backend::InMemoryOrderBackend;
pub use location::FixedLocationResolver;
