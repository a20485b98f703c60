use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Gateway-specific JSON that is carried through the system without being interpreted.
///
/// The original bytes are kept exactly as received and are embedded as a nested JSON value (never as an escaped
/// string) when serialized.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GatewayData(Box<RawValue>);

impl GatewayData {
    /// Wrap a JSON document. Fails if `json` is not valid JSON.
    pub fn from_json<S: Into<String>>(json: S) -> Result<Self, serde_json::Error> {
        RawValue::from_string(json.into()).map(Self)
    }

    /// The raw JSON text, byte-for-byte as it was received.
    pub fn get(&self) -> &str {
        self.0.get()
    }
}

impl PartialEq for GatewayData {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl Eq for GatewayData {}

impl Debug for GatewayData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GatewayData({})", self.get())
    }
}

impl Display for GatewayData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get())
    }
}
