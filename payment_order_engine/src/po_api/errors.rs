use thiserror::Error;

use crate::traits::{LocationError, OrderBackendError};

/// Errors returned by the public payment order API.
///
/// Every failure from a collaborator is passed on with some context about what was being attempted. The kind of
/// failure is never changed along the way, and nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderApiError {
    #[error("Could not {operation}. {reason}")]
    UpstreamUnavailable { operation: String, reason: String },
    #[error("Order {order_id} does not exist for identity {identity}")]
    OrderNotFound { identity: String, order_id: String },
    #[error("The billing country was not given and could not be derived from the current location. {0}")]
    LocationUnavailable(String),
    #[error("{gateway} rejected the request. {reason}")]
    GatewayRejected { gateway: String, reason: String },
    #[error("Could not encode or decode order data. {0}")]
    EncodingError(String),
}

impl OrderApiError {
    /// Wrap a backend failure that happened while trying to do `operation`.
    pub fn upstream(operation: &str, err: OrderBackendError) -> Self {
        match err {
            OrderBackendError::Unavailable(reason) => {
                Self::UpstreamUnavailable { operation: operation.to_string(), reason }
            },
            OrderBackendError::GatewayRejected { gateway, reason } => Self::GatewayRejected { gateway, reason },
            OrderBackendError::InvalidResponse(reason) => Self::EncodingError(format!("{operation}: {reason}")),
        }
    }

    pub fn not_found<I: ToString, O: ToString>(identity: I, order_id: O) -> Self {
        Self::OrderNotFound { identity: identity.to_string(), order_id: order_id.to_string() }
    }
}

impl From<LocationError> for OrderApiError {
    fn from(e: LocationError) -> Self {
        Self::LocationUnavailable(e.to_string())
    }
}

impl From<serde_json::Error> for OrderApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::EncodingError(e.to_string())
    }
}
