use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use log::*;
use mpo_common::Amount;
use rust_decimal::Decimal;

use crate::{
    order_types::{
        ClientCallbackPayload,
        GatewayInfo,
        GatewayOrder,
        GatewayOrderRequest,
        IdentityAddress,
        OrderStatus,
    },
    traits::{OrderBackend, OrderBackendError},
};

#[derive(Debug, Default)]
struct BackendState {
    next_id: u64,
    orders: Vec<GatewayOrder>,
    gateways: Vec<GatewayInfo>,
    rates: HashMap<String, Decimal>,
    callbacks: Vec<(IdentityAddress, String, ClientCallbackPayload)>,
    rejections: HashMap<String, String>,
    outage: Option<String>,
}

/// An [`OrderBackend`] that keeps orders in memory.
///
/// Orders are priced at face value: the pay amount and order total are the requested USD amount, with no tax. Unknown
/// gateways are rejected once any gateway has been registered.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderBackend {
    state: Arc<Mutex<BackendState>>,
}

impl InMemoryOrderBackend {
    pub fn with_gateways(gateways: Vec<GatewayInfo>) -> Self {
        let backend = Self::default();
        backend.lock().gateways = gateways;
        backend
    }

    pub fn set_exchange_rate(&self, quote_currency: &str, rate: Decimal) {
        self.lock().rates.insert(quote_currency.to_uppercase(), rate);
    }

    /// Insert an order as-is, as if another client had created it.
    pub fn insert_order(&self, order: GatewayOrder) {
        self.lock().orders.push(order);
    }

    /// Change the status of a stored order. Returns false if there is no such order.
    pub fn set_order_status(&self, order_id: &str, status: OrderStatus) -> bool {
        let mut state = self.lock();
        match state.orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                order.status = status;
                true
            },
            None => false,
        }
    }

    /// Make every client callback for `gateway` fail with `reason`.
    pub fn reject_callbacks(&self, gateway: &str, reason: &str) {
        self.lock().rejections.insert(gateway.to_string(), reason.to_string());
    }

    /// Simulate an outage. While set, every call fails as unavailable with `reason`.
    pub fn set_outage(&self, reason: Option<&str>) {
        self.lock().outage = reason.map(String::from);
    }

    /// Every client callback accepted so far, oldest first.
    pub fn callbacks(&self) -> Vec<(IdentityAddress, String, ClientCallbackPayload)> {
        self.lock().callbacks.clone()
    }

    pub fn order_count(&self) -> usize {
        self.lock().orders.len()
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn available(&self) -> Result<MutexGuard<'_, BackendState>, OrderBackendError> {
        let state = self.lock();
        match &state.outage {
            Some(reason) => Err(OrderBackendError::Unavailable(reason.clone())),
            None => Ok(state),
        }
    }
}

impl OrderBackend for InMemoryOrderBackend {
    async fn create_payment_order(&self, request: &GatewayOrderRequest) -> Result<GatewayOrder, OrderBackendError> {
        let mut state = self.available()?;
        if !state.gateways.is_empty() && !state.gateways.iter().any(|g| g.name == request.gateway) {
            return Err(OrderBackendError::GatewayRejected {
                gateway: request.gateway.clone(),
                reason: format!("Unknown payment gateway: {}", request.gateway),
            });
        }
        state.next_id += 1;
        let order = GatewayOrder {
            id: format!("ord_{:06}", state.next_id),
            status: OrderStatus::Initial,
            identity: request.identity.clone(),
            channel_address: String::new(),
            gateway_name: request.gateway.clone(),
            receive_myst: request.myst_amount,
            pay_amount: request.amount_usd,
            pay_currency: request.pay_currency.clone(),
            country: request.country.clone(),
            currency: request.pay_currency.clone(),
            items_sub_total: request.amount_usd,
            tax_rate: Amount::zero(),
            tax_sub_total: Amount::zero(),
            order_total: request.amount_usd,
            public_gateway_data: request.caller_data.clone(),
        };
        trace!("🧾️ In-memory backend stored order {}", order.id);
        state.orders.push(order.clone());
        Ok(order)
    }

    async fn fetch_payment_order(
        &self,
        identity: &IdentityAddress,
        order_id: &str,
    ) -> Result<Option<GatewayOrder>, OrderBackendError> {
        let state = self.available()?;
        Ok(state.orders.iter().find(|o| o.id == order_id && &o.identity == identity).cloned())
    }

    async fn fetch_payment_order_invoice(
        &self,
        identity: &IdentityAddress,
        order_id: &str,
    ) -> Result<Option<Vec<u8>>, OrderBackendError> {
        let invoice = self.fetch_payment_order(identity, order_id).await?.map(|o| {
            format!("INVOICE {}\n{} {} {}\n", o.id, o.gateway_name, o.order_total, o.pay_currency).into_bytes()
        });
        Ok(invoice)
    }

    async fn fetch_payment_orders(&self, identity: &IdentityAddress) -> Result<Vec<GatewayOrder>, OrderBackendError> {
        let state = self.available()?;
        Ok(state.orders.iter().filter(|o| &o.identity == identity).cloned().collect())
    }

    async fn fetch_payment_gateways(&self, _options_currency: &str) -> Result<Vec<GatewayInfo>, OrderBackendError> {
        Ok(self.available()?.gateways.clone())
    }

    async fn gateway_client_callback(
        &self,
        identity: &IdentityAddress,
        gateway: &str,
        payload: &ClientCallbackPayload,
    ) -> Result<(), OrderBackendError> {
        let mut state = self.available()?;
        if let Some(reason) = state.rejections.get(gateway) {
            return Err(OrderBackendError::GatewayRejected { gateway: gateway.to_string(), reason: reason.clone() });
        }
        state.callbacks.push((identity.clone(), gateway.to_string(), payload.clone()));
        Ok(())
    }

    async fn fetch_myst_exchange_rate(&self, quote_currency: &str) -> Result<Decimal, OrderBackendError> {
        let state = self.available()?;
        state
            .rates
            .get(&quote_currency.to_uppercase())
            .copied()
            .ok_or_else(|| OrderBackendError::Unavailable(format!("No MYST exchange rate for {quote_currency}")))
    }
}
