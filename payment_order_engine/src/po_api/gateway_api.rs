use std::fmt::Debug;

use log::*;

use crate::{
    po_api::{
        errors::OrderApiError,
        order_objects::{to_external_gateways, Gateway},
    },
    traits::OrderBackend,
};

/// Read-only view of the payment gateways the backend supports. Nothing is cached: every call goes to the backend.
pub struct GatewayCatalogApi<B> {
    backend: B,
}

impl<B> Debug for GatewayCatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GatewayCatalogApi")
    }
}

impl<B> GatewayCatalogApi<B>
where B: OrderBackend
{
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The available gateways, with order amount options expressed for `currency`. The currency code is handed to the
    /// backend as given.
    pub async fn list_gateways(&self, currency: &str) -> Result<Vec<Gateway>, OrderApiError> {
        let gateways = self
            .backend
            .fetch_payment_gateways(currency)
            .await
            .map_err(|e| OrderApiError::upstream(&format!("fetch payment gateways for {currency}"), e))?;
        trace!("🧾️ {} payment gateways available for {currency}", gateways.len());
        Ok(to_external_gateways(&gateways))
    }
}
