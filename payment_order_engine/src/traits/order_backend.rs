use rust_decimal::Decimal;
use thiserror::Error;

use crate::order_types::{ClientCallbackPayload, GatewayInfo, GatewayOrder, GatewayOrderRequest, IdentityAddress};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderBackendError {
    #[error("The order backend is unavailable. {0}")]
    Unavailable(String),
    #[error("{gateway} rejected the request. {reason}")]
    GatewayRejected { gateway: String, reason: String },
    #[error("The order backend sent a response that could not be decoded. {0}")]
    InvalidResponse(String),
}

/// The backend order service.
///
/// The backend owns the gateway integrations, exchange rates and order persistence. Implementations are expected to
/// handle their own timeouts; callers do not retry.
#[allow(async_fn_in_trait)]
pub trait OrderBackend {
    /// Create a new order with the given gateway. Every field of `request` has already been filled in.
    async fn create_payment_order(&self, request: &GatewayOrderRequest) -> Result<GatewayOrder, OrderBackendError>;

    /// Fetch a single order. `Ok(None)` means the backend has no such order for the identity.
    async fn fetch_payment_order(
        &self,
        identity: &IdentityAddress,
        order_id: &str,
    ) -> Result<Option<GatewayOrder>, OrderBackendError>;

    /// Fetch the invoice document for an order. `Ok(None)` means the backend has no such order for the identity.
    async fn fetch_payment_order_invoice(
        &self,
        identity: &IdentityAddress,
        order_id: &str,
    ) -> Result<Option<Vec<u8>>, OrderBackendError>;

    /// All orders for the identity, in the order the backend keeps them.
    async fn fetch_payment_orders(&self, identity: &IdentityAddress) -> Result<Vec<GatewayOrder>, OrderBackendError>;

    /// The available gateways, with their order options expressed for `options_currency`.
    async fn fetch_payment_gateways(&self, options_currency: &str) -> Result<Vec<GatewayInfo>, OrderBackendError>;

    /// Forward a client-side callback to the gateway-specific handler on the backend.
    async fn gateway_client_callback(
        &self,
        identity: &IdentityAddress,
        gateway: &str,
        payload: &ClientCallbackPayload,
    ) -> Result<(), OrderBackendError>;

    /// The price of one MYST in `quote_currency`.
    async fn fetch_myst_exchange_rate(&self, quote_currency: &str) -> Result<Decimal, OrderBackendError>;
}
