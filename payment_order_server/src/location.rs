use std::{sync::Arc, time::Duration};

use log::*;
use payment_order_engine::traits::{LocationError, LocationResolver, Origin};
use reqwest::Client;

use crate::errors::ServerError;

/// Resolves the node's location by asking a location oracle, which answers a plain GET with a JSON [`Origin`].
///
/// Without an oracle URL every lookup fails.
#[derive(Clone, Debug)]
pub struct OracleLocationResolver {
    url: Option<String>,
    client: Arc<Client>,
}

impl OracleLocationResolver {
    pub fn new(url: Option<String>, timeout: Duration) -> Result<Self, ServerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServerError::InitializeError(format!("Could not create the location oracle client. {e}")))?;
        Ok(Self { url, client: Arc::new(client) })
    }
}

impl LocationResolver for OracleLocationResolver {
    async fn get_origin(&self) -> Result<Origin, LocationError> {
        let url = self.url.as_ref().ok_or_else(|| LocationError::LookupFailed("No location oracle is configured".into()))?;
        trace!("🌍️ Looking up node location at {url}");
        let response = self.client.get(url).send().await.map_err(|e| LocationError::LookupFailed(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(LocationError::LookupFailed(format!("The location oracle responded with {status}")));
        }
        let origin = response.json::<Origin>().await.map_err(|e| LocationError::LookupFailed(e.to_string()))?;
        debug!("🌍️ Node location: {} {} ({})", origin.country, origin.city, origin.ip);
        Ok(origin)
    }
}
