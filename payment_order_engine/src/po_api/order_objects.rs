//! External, serialization-stable representations of orders, gateways and order updates.
//!
//! These are the only shapes that leave the engine. The conversions from the internal model are pure and total: every
//! field is copied directly, statuses become their string form, monetary values stay exact decimal strings and opaque
//! gateway data is carried through byte-for-byte.
use mpo_common::{Amount, GatewayData};
use serde::{Deserialize, Serialize};

use crate::{
    events::OrderUpdatedEvent,
    order_types::{GatewayInfo, GatewayOrder},
};

//--------------------------------------     PaymentOrder    ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub id: String,
    pub status: String,
    #[serde(rename = "identity")]
    pub identity_address: String,
    pub channel_address: String,
    pub gateway: String,
    pub receive_myst: Amount,
    pub pay_amount: Amount,
    pub pay_currency: String,
    pub country: String,
    pub currency: String,
    pub items_sub_total: Amount,
    pub tax_rate: Amount,
    pub tax_sub_total: Amount,
    pub order_total: Amount,
    pub public_gateway_data: Option<GatewayData>,
}

impl From<&GatewayOrder> for PaymentOrder {
    fn from(order: &GatewayOrder) -> Self {
        Self {
            id: order.id.clone(),
            status: order.status.to_string(),
            identity_address: order.identity.to_string(),
            channel_address: order.channel_address.clone(),
            gateway: order.gateway_name.clone(),
            receive_myst: order.receive_myst,
            pay_amount: order.pay_amount,
            pay_currency: order.pay_currency.clone(),
            country: order.country.clone(),
            currency: order.currency.clone(),
            items_sub_total: order.items_sub_total,
            tax_rate: order.tax_rate,
            tax_sub_total: order.tax_sub_total,
            order_total: order.order_total,
            public_gateway_data: order.public_gateway_data.clone(),
        }
    }
}

impl From<GatewayOrder> for PaymentOrder {
    fn from(order: GatewayOrder) -> Self {
        Self::from(&order)
    }
}

pub fn to_external_orders(orders: &[GatewayOrder]) -> Vec<PaymentOrder> {
    orders.iter().map(PaymentOrder::from).collect()
}

//--------------------------------------       Gateway       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gateway {
    pub name: String,
    pub order_options: PaymentOrderOptions,
    pub currencies: Vec<String>,
}

/// The minimum and suggested MYST amounts for orders with a gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentOrderOptions {
    pub minimum: f64,
    pub suggested: Vec<f64>,
}

impl From<&GatewayInfo> for Gateway {
    fn from(gateway: &GatewayInfo) -> Self {
        Self {
            name: gateway.name.clone(),
            order_options: PaymentOrderOptions {
                minimum: gateway.order_options.minimum,
                suggested: gateway.order_options.suggested.clone(),
            },
            currencies: gateway.currencies.clone(),
        }
    }
}

/// One external gateway per input gateway, in the same order.
pub fn to_external_gateways(gateways: &[GatewayInfo]) -> Vec<Gateway> {
    gateways.iter().map(Gateway::from).collect()
}

//--------------------------------------  OrderUpdatedPayload --------------------------------------------------------
/// What a registered listener receives when the status of an order changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdatedPayload {
    pub order_id: String,
    pub status: String,
    pub pay_amount: Amount,
    pub pay_currency: String,
}

impl From<&OrderUpdatedEvent> for OrderUpdatedPayload {
    fn from(event: &OrderUpdatedEvent) -> Self {
        Self {
            order_id: event.id.clone(),
            status: event.status.to_string(),
            pay_amount: event.pay_amount,
            pay_currency: event.pay_currency.clone(),
        }
    }
}

//--------------------------------------       Requests      ---------------------------------------------------------
/// A request from the client to create a payment order.
///
/// `country` may be left empty, in which case it is derived from the node's current location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(rename = "identity")]
    pub identity_address: String,
    pub gateway: String,
    pub myst_amount: Amount,
    pub amount_usd: Amount,
    pub pay_currency: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: String,
    /// JSON understood by the chosen gateway. Forwarded untouched.
    #[serde(default)]
    pub gateway_caller_data: Option<GatewayData>,
}
