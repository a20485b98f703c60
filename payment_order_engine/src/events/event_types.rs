use mpo_common::Amount;
use serde::{Deserialize, Serialize};

use crate::order_types::{GatewayOrder, OrderStatus};

/// The bus topic on which order status changes are published.
pub const ORDER_UPDATED_TOPIC: &str = "order_updated";

/// Published by the backend side whenever the status of a payment order changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdatedEvent {
    pub id: String,
    pub status: OrderStatus,
    pub pay_amount: Amount,
    pub pay_currency: String,
}

impl OrderUpdatedEvent {
    pub fn new<S: Into<String>>(id: S, status: OrderStatus, pay_amount: Amount, pay_currency: S) -> Self {
        Self { id: id.into(), status, pay_amount, pay_currency: pay_currency.into() }
    }

    pub fn from_order(order: &GatewayOrder) -> Self {
        Self {
            id: order.id.clone(),
            status: order.status.clone(),
            pay_amount: order.pay_amount,
            pay_currency: order.pay_currency.clone(),
        }
    }
}
