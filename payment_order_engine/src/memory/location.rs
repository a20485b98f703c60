use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use crate::traits::{LocationError, LocationResolver, Origin};

/// A [`LocationResolver`] that always gives the same answer.
#[derive(Debug, Clone)]
pub struct FixedLocationResolver {
    origin: Result<Origin, LocationError>,
    lookups: Arc<AtomicUsize>,
}

impl FixedLocationResolver {
    pub fn new<S: Into<String>>(country: S) -> Self {
        Self::with_origin(Origin::with_country(country))
    }

    pub fn with_origin(origin: Origin) -> Self {
        Self { origin: Ok(origin), lookups: Arc::new(AtomicUsize::new(0)) }
    }

    /// A resolver whose every lookup fails with `reason`.
    pub fn failing<S: Into<String>>(reason: S) -> Self {
        Self { origin: Err(LocationError::LookupFailed(reason.into())), lookups: Arc::new(AtomicUsize::new(0)) }
    }

    /// How many times the location has been asked for.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl LocationResolver for FixedLocationResolver {
    async fn get_origin(&self) -> Result<Origin, LocationError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.origin.clone()
    }
}
