use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where the node appears to be, based on its public IP address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Origin {
    pub ip: String,
    pub asn: u64,
    pub isp: String,
    pub continent: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub ip_type: String,
}

impl Origin {
    pub fn with_country<S: Into<String>>(country: S) -> Self {
        Self { country: country.into(), ..Default::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location lookup failed. {0}")]
    LookupFailed(String),
    #[error("The resolved location does not include a country")]
    MissingCountry,
}

#[allow(async_fn_in_trait)]
pub trait LocationResolver {
    /// Resolve the current network location of this node.
    async fn get_origin(&self) -> Result<Origin, LocationError>;
}
