//! Domain types exchanged with the backend order service.
//!
//! These are the *internal* representations. They are never handed to the mobile client directly; see
//! [`crate::order_objects`] for the external, serialization-stable forms.
use std::fmt::Display;

use mpo_common::{Amount, GatewayData};
use serde::{Deserialize, Serialize};

//--------------------------------------   IdentityAddress   ---------------------------------------------------------
/// Handle for a node identity. Addresses are case-insensitive, so they are normalised to lower case on parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct IdentityAddress(String);

impl IdentityAddress {
    pub fn from_address(address: &str) -> Self {
        Self(address.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for IdentityAddress {
    fn from(value: String) -> Self {
        Self::from_address(&value)
    }
}

impl From<&str> for IdentityAddress {
    fn from(value: &str) -> Self {
        Self::from_address(value)
    }
}

impl From<IdentityAddress> for String {
    fn from(value: IdentityAddress) -> Self {
        value.0
    }
}

impl Display for IdentityAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//--------------------------------------     OrderStatus     ---------------------------------------------------------
/// The status of a payment order, as reported by the backend.
///
/// The backend owns this enumeration and may add to it at any time. Statuses this crate does not know about are kept
/// in [`OrderStatus::Other`] with their original spelling, so they can still be passed on to clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    /// The order was registered, but the gateway has not produced payment details yet.
    Initial,
    /// Payment details are available and the order is waiting for payment.
    New,
    /// The order has been paid in full.
    Paid,
    /// The gateway reported a failed payment.
    Failed,
    /// The order was not paid in time.
    Expired,
    /// The order was cancelled by the user or the gateway.
    Canceled,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Initial => "initial",
            OrderStatus::New => "new",
            OrderStatus::Paid => "paid",
            OrderStatus::Failed => "failed",
            OrderStatus::Expired => "expired",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Other(s) => s.as_str(),
        }
    }

    /// True if no further status changes are expected for an order in this state.
    pub fn is_final(&self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Failed | OrderStatus::Expired | OrderStatus::Canceled)
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "initial" => OrderStatus::Initial,
            "new" => OrderStatus::New,
            "paid" => OrderStatus::Paid,
            "failed" => OrderStatus::Failed,
            "expired" => OrderStatus::Expired,
            "canceled" | "cancelled" => OrderStatus::Canceled,
            _ => OrderStatus::Other(value.to_string()),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        OrderStatus::from(value.as_str())
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//--------------------------------------     GatewayOrder    ---------------------------------------------------------
/// A payment order as held by the backend order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub status: OrderStatus,
    pub identity: IdentityAddress,
    pub channel_address: String,
    pub gateway_name: String,
    pub receive_myst: Amount,
    pub pay_amount: Amount,
    pub pay_currency: String,
    pub country: String,
    pub currency: String,
    pub items_sub_total: Amount,
    pub tax_rate: Amount,
    pub tax_sub_total: Amount,
    pub order_total: Amount,
    #[serde(default)]
    pub public_gateway_data: Option<GatewayData>,
}

//--------------------------------------  GatewayOrderRequest ---------------------------------------------------------
/// A fully populated order creation request, ready to be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOrderRequest {
    pub identity: IdentityAddress,
    pub gateway: String,
    pub myst_amount: Amount,
    pub amount_usd: Amount,
    pub pay_currency: String,
    pub country: String,
    pub state: String,
    #[serde(default)]
    pub caller_data: Option<GatewayData>,
}

//--------------------------------------     GatewayInfo     ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayInfo {
    pub name: String,
    pub order_options: GatewayOrderOptions,
    pub currencies: Vec<String>,
}

/// Order amount options for a gateway, in MYST.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayOrderOptions {
    pub minimum: f64,
    #[serde(default)]
    pub suggested: Vec<f64>,
}

//-------------------------------------- ClientCallbackPayload --------------------------------------------------------
/// The payload relayed to a gateway's client-side callback handler, e.g. after a Google Play purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCallbackPayload {
    pub purchase_token: String,
    pub google_product_id: String,
}

impl ClientCallbackPayload {
    pub fn new<S: Into<String>>(purchase_token: S, google_product_id: S) -> Self {
        Self { purchase_token: purchase_token.into(), google_product_id: google_product_id.into() }
    }
}
