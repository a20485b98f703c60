//! Passthrough access to the backend's MYST exchange rates.

use std::fmt::Debug;

use rust_decimal::Decimal;

use crate::{po_api::errors::OrderApiError, traits::OrderBackend};

pub struct ExchangeRateApi<B> {
    backend: B,
}

impl<B> Debug for ExchangeRateApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ExchangeRateApi")
    }
}

impl<B> ExchangeRateApi<B>
where B: OrderBackend
{
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The price of one MYST in `quote_currency`.
    pub async fn myst_rate(&self, quote_currency: &str) -> Result<Decimal, OrderApiError> {
        self.backend
            .fetch_myst_exchange_rate(quote_currency)
            .await
            .map_err(|e| OrderApiError::upstream(&format!("fetch the MYST/{quote_currency} exchange rate"), e))
    }
}
