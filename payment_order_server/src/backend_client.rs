//! A REST client for the backend payment order service.
//!
//! | Operation           | Request                                                   |
//! |---------------------|-----------------------------------------------------------|
//! | create order        | `POST /orders`                                            |
//! | fetch order         | `GET /identities/{identity}/orders/{order_id}`            |
//! | fetch invoice       | `GET /identities/{identity}/orders/{order_id}/invoice`    |
//! | list orders         | `GET /identities/{identity}/orders`                       |
//! | list gateways       | `GET /gateways?options_currency={currency}`               |
//! | client callback     | `POST /identities/{identity}/gateways/{gateway}/callback` |
//! | MYST exchange rate  | `GET /exchange/myst/{quote}`                              |
//!
//! Path parameters are percent-encoded as single segments, so an identity or order id can never change which backend
//! endpoint is called.
//!
//! A 404 from an order lookup means the order does not exist. A failed client callback is a rejection by the gateway,
//! and the response body is passed on as the reason. Every other failure means the backend is unavailable.
use std::{str::FromStr, sync::Arc, time::Duration};

use log::*;
use payment_order_engine::{
    order_types::{ClientCallbackPayload, GatewayInfo, GatewayOrder, GatewayOrderRequest, IdentityAddress},
    traits::{OrderBackend, OrderBackendError},
};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::ServerError;

#[derive(Clone, Debug)]
pub struct HttpOrderBackend {
    base_url: Url,
    client: Arc<Client>,
}

impl HttpOrderBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServerError> {
        if base_url.is_empty() {
            return Err(ServerError::ConfigurationError("The backend URL is not set".into()));
        }
        let base_url = Url::parse(base_url)
            .map_err(|e| ServerError::ConfigurationError(format!("Invalid backend URL {base_url}. {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ServerError::ConfigurationError(format!("{base_url} cannot be used as a backend URL")));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServerError::InitializeError(format!("Could not create the backend client. {e}")))?;
        Ok(Self { base_url, client: Arc::new(client) })
    }

    /// The backend URL for the given path segments. Each segment is percent-encoded on its own, so `/`, `?` and `#`
    /// inside a segment stay part of it.
    pub fn url(&self, segments: &[&str]) -> Result<Url, OrderBackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| OrderBackendError::Unavailable(format!("{} cannot be used as a backend URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, OrderBackendError> {
        req.send().await.map_err(|e| OrderBackendError::Unavailable(e.to_string()))
    }

    /// GET `path` and decode the JSON response. A 404 gives `Ok(None)`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &[&str],
        params: &[(&str, &str)],
    ) -> Result<Option<T>, OrderBackendError> {
        let url = self.url(path)?;
        trace!("🧾️ GET {url}");
        let response = self.send(self.client.get(url).query(params)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_success(response).await?;
        response.json::<T>().await.map(Some).map_err(|e| OrderBackendError::InvalidResponse(e.to_string()))
    }

    async fn get_bytes(&self, path: &[&str]) -> Result<Option<Vec<u8>>, OrderBackendError> {
        let url = self.url(path)?;
        trace!("🧾️ GET {url}");
        let response = self.send(self.client.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_success(response).await?;
        let bytes = response.bytes().await.map_err(|e| OrderBackendError::InvalidResponse(e.to_string()))?;
        Ok(Some(bytes.to_vec()))
    }
}

async fn check_success(response: Response) -> Result<Response, OrderBackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(OrderBackendError::Unavailable(format!("Backend responded with {status}. {message}")))
}

impl OrderBackend for HttpOrderBackend {
    async fn create_payment_order(&self, request: &GatewayOrderRequest) -> Result<GatewayOrder, OrderBackendError> {
        let url = self.url(&["orders"])?;
        debug!("🧾️ Creating {} order for {} at {url}", request.gateway, request.identity);
        let response = self.send(self.client.post(url).json(request)).await?;
        let response = check_success(response).await?;
        response.json::<GatewayOrder>().await.map_err(|e| OrderBackendError::InvalidResponse(e.to_string()))
    }

    async fn fetch_payment_order(
        &self,
        identity: &IdentityAddress,
        order_id: &str,
    ) -> Result<Option<GatewayOrder>, OrderBackendError> {
        self.get_json(&["identities", identity.as_str(), "orders", order_id], &[]).await
    }

    async fn fetch_payment_order_invoice(
        &self,
        identity: &IdentityAddress,
        order_id: &str,
    ) -> Result<Option<Vec<u8>>, OrderBackendError> {
        self.get_bytes(&["identities", identity.as_str(), "orders", order_id, "invoice"]).await
    }

    async fn fetch_payment_orders(&self, identity: &IdentityAddress) -> Result<Vec<GatewayOrder>, OrderBackendError> {
        let orders = self.get_json::<Vec<GatewayOrder>>(&["identities", identity.as_str(), "orders"], &[]).await?;
        Ok(orders.unwrap_or_default())
    }

    async fn fetch_payment_gateways(&self, options_currency: &str) -> Result<Vec<GatewayInfo>, OrderBackendError> {
        self.get_json::<Vec<GatewayInfo>>(&["gateways"], &[("options_currency", options_currency)])
            .await?
            .ok_or_else(|| OrderBackendError::Unavailable("The gateway list is not available".into()))
    }

    async fn gateway_client_callback(
        &self,
        identity: &IdentityAddress,
        gateway: &str,
        payload: &ClientCallbackPayload,
    ) -> Result<(), OrderBackendError> {
        let url = self.url(&["identities", identity.as_str(), "gateways", gateway, "callback"])?;
        debug!("🧾️ Relaying {gateway} client callback for {identity}");
        let response = self.send(self.client.post(url).json(payload)).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let reason = response.text().await.map_err(|e| OrderBackendError::Unavailable(e.to_string()))?;
        if status.is_server_error() {
            return Err(OrderBackendError::Unavailable(format!("Backend responded with {status}. {reason}")));
        }
        Err(OrderBackendError::GatewayRejected { gateway: gateway.to_string(), reason })
    }

    async fn fetch_myst_exchange_rate(&self, quote_currency: &str) -> Result<Decimal, OrderBackendError> {
        let value = self
            .get_json::<Value>(&["exchange", "myst", quote_currency], &[])
            .await?
            .ok_or_else(|| OrderBackendError::Unavailable(format!("No MYST exchange rate for {quote_currency}")))?;
        parse_rate(&value["rate"])
    }
}

/// Rates may be sent as JSON strings or numbers. Numbers are converted through their shortest decimal form, so
/// `0.1` stays `0.1`.
fn parse_rate(value: &Value) -> Result<Decimal, OrderBackendError> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        v => return Err(OrderBackendError::InvalidResponse(format!("Invalid exchange rate: {v}"))),
    };
    Decimal::from_str(&text).map_err(|e| OrderBackendError::InvalidResponse(format!("Invalid exchange rate {text}. {e}")))
}
