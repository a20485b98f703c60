use std::fmt::Debug;

use log::*;

use crate::{
    order_types::{ClientCallbackPayload, GatewayOrderRequest, IdentityAddress},
    po_api::{
        errors::OrderApiError,
        order_objects::{to_external_orders, CreateOrderRequest, PaymentOrder},
        order_tracker::TrackedOrders,
    },
    traits::{LocationError, LocationResolver, OrderBackend},
};

/// `OrderLifecycleApi` creates and retrieves payment orders on behalf of the mobile client, and relays gateway
/// callbacks from the client to the backend.
///
/// The only business rule applied here is billing country defaulting: when a create request carries no country, the
/// node's current country is looked up with the [`LocationResolver`] and used instead. Everything else is handed to
/// the [`OrderBackend`] and the result translated to its external representation.
pub struct OrderLifecycleApi<B, L> {
    backend: B,
    locator: L,
    tracked: Option<TrackedOrders>,
}

impl<B, L> Debug for OrderLifecycleApi<B, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderLifecycleApi")
    }
}

impl<B, L> OrderLifecycleApi<B, L> {
    pub fn new(backend: B, locator: L) -> Self {
        Self { backend, locator, tracked: None }
    }

    /// Newly created orders will be added to `tracked`, so that their status changes can be published.
    pub fn with_tracked_orders(mut self, tracked: TrackedOrders) -> Self {
        self.tracked = Some(tracked);
        self
    }
}

impl<B, L> OrderLifecycleApi<B, L>
where
    B: OrderBackend,
    L: LocationResolver,
{
    /// Create a new payment order with the gateway named in the request.
    ///
    /// If `request.country` is empty, the current country is resolved and upper-cased. If that fails, no order is
    /// created and [`OrderApiError::LocationUnavailable`] is returned. A non-empty country is sent as-is.
    pub async fn create_order(&self, request: CreateOrderRequest) -> Result<PaymentOrder, OrderApiError> {
        let country = match request.country.is_empty() {
            true => self.current_country().await?,
            false => request.country,
        };
        let order_request = GatewayOrderRequest {
            identity: IdentityAddress::from_address(&request.identity_address),
            gateway: request.gateway,
            myst_amount: request.myst_amount,
            amount_usd: request.amount_usd,
            pay_currency: request.pay_currency,
            country,
            state: request.state,
            caller_data: request.gateway_caller_data,
        };
        let order = self.backend.create_payment_order(&order_request).await.map_err(|e| {
            let operation = format!("create a {} payment order for {}", order_request.gateway, order_request.identity);
            OrderApiError::upstream(&operation, e)
        })?;
        info!(
            "🧾️ Created {} payment order {} for {} ({} {})",
            order.gateway_name, order.id, order.identity, order.pay_amount, order.pay_currency
        );
        if let Some(tracked) = &self.tracked {
            tracked.track(&order);
        }
        Ok(PaymentOrder::from(&order))
    }

    async fn current_country(&self) -> Result<String, OrderApiError> {
        let origin = self.locator.get_origin().await.map_err(|e| {
            warn!("🌍️ Could not determine the billing country. {e}");
            OrderApiError::from(e)
        })?;
        if origin.country.is_empty() {
            warn!("🌍️ The resolved location for {} has no country", origin.ip);
            return Err(LocationError::MissingCountry.into());
        }
        let country = origin.country.to_uppercase();
        debug!("🌍️ Billing country defaulted to {country}");
        Ok(country)
    }

    pub async fn get_order(&self, identity: &str, order_id: &str) -> Result<PaymentOrder, OrderApiError> {
        let identity = IdentityAddress::from_address(identity);
        let order = self
            .backend
            .fetch_payment_order(&identity, order_id)
            .await
            .map_err(|e| OrderApiError::upstream(&format!("fetch payment order {order_id} for {identity}"), e))?
            .ok_or_else(|| OrderApiError::not_found(&identity, order_id))?;
        Ok(PaymentOrder::from(&order))
    }

    /// The invoice document for an order, exactly as the backend produced it.
    pub async fn get_order_invoice(&self, identity: &str, order_id: &str) -> Result<Vec<u8>, OrderApiError> {
        let identity = IdentityAddress::from_address(identity);
        self.backend
            .fetch_payment_order_invoice(&identity, order_id)
            .await
            .map_err(|e| OrderApiError::upstream(&format!("fetch the invoice for order {order_id} of {identity}"), e))?
            .ok_or_else(|| OrderApiError::not_found(&identity, order_id))
    }

    /// Every order for the identity, in backend order. An identity with no orders gets an empty list.
    pub async fn list_orders(&self, identity: &str) -> Result<Vec<PaymentOrder>, OrderApiError> {
        let identity = IdentityAddress::from_address(identity);
        let orders = self
            .backend
            .fetch_payment_orders(&identity)
            .await
            .map_err(|e| OrderApiError::upstream(&format!("fetch payment orders for {identity}"), e))?;
        trace!("🧾️ {} payment orders found for {identity}", orders.len());
        Ok(to_external_orders(&orders))
    }

    /// Pass a purchase completed on the client (e.g. an in-app purchase) to the gateway's callback handler on the
    /// backend. A rejection from the gateway is returned with its reason untouched.
    pub async fn relay_client_callback(
        &self,
        identity: &str,
        gateway: &str,
        purchase_token: &str,
        product_id: &str,
    ) -> Result<(), OrderApiError> {
        let identity = IdentityAddress::from_address(identity);
        let payload = ClientCallbackPayload::new(purchase_token, product_id);
        self.backend
            .gateway_client_callback(&identity, gateway, &payload)
            .await
            .map_err(|e| OrderApiError::upstream(&format!("relay the {gateway} client callback for {identity}"), e))?;
        debug!("🧾️ {gateway} client callback relayed for {identity}");
        Ok(())
    }
}
