use std::fmt::Display;

use mpo_common::USD_CURRENCY_CODE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }
}

/// Query parameters for the gateway list. `currency` is the currency the order amount options are expressed in, and
/// defaults to USD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayQuery {
    #[serde(default = "default_options_currency")]
    pub currency: String,
}

fn default_options_currency() -> String {
    USD_CURRENCY_CODE.to_string()
}

/// A purchase completed on the client, e.g. a Google Play in-app purchase, to be relayed to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCallbackRequest {
    pub identity: String,
    pub purchase_token: String,
    pub google_product_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRateResult {
    pub base: String,
    pub quote: String,
    /// The price of one unit of `base` in `quote`, as a decimal string.
    pub rate: String,
}
