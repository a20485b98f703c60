use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub const MYST_CURRENCY_CODE: &str = "MYST";
pub const USD_CURRENCY_CODE: &str = "USD";

//--------------------------------------       Amount        ---------------------------------------------------------
/// A non-negative monetary amount that crosses every API boundary as a decimal string.
///
/// The scale of the parsed value is preserved, so `"12.00"` is written back out as `"12.00"`. Only plain decimal
/// notation is accepted: `.5`, `5.`, `+5`, `-5`, `1e3`, `007` and the empty string are all rejected, as are JSON
/// numbers. Every accepted string is written back out exactly as it was received. Values that cannot be held without
/// rounding, such as more than 28 decimal places, are refused with [`AmountError::OutOfRange`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Amount(Decimal);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Amount cannot be empty")]
    Empty,
    #[error("Invalid amount format: {0}. Use plain decimal notation, e.g. 12.50")]
    InvalidFormat(String),
    #[error("Amount cannot be negative: {0}")]
    Negative(String),
    #[error("Amount is out of range: {0}")]
    OutOfRange(String),
}

impl Amount {
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn from_decimal(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative(value.to_string()));
        }
        Ok(Self(value))
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AmountError::Empty);
        }
        if s.starts_with('-') {
            return Err(AmountError::Negative(s.to_string()));
        }
        let dots = s.chars().filter(|c| *c == '.').count();
        let well_formed = dots <= 1 &&
            !s.starts_with('.') &&
            !s.ends_with('.') &&
            s.chars().all(|c| c.is_ascii_digit() || c == '.');
        let integer_part = s.split('.').next().unwrap_or_default();
        let leading_zero = integer_part.len() > 1 && integer_part.starts_with('0');
        if !well_formed || leading_zero {
            return Err(AmountError::InvalidFormat(s.to_string()));
        }
        let value = Decimal::from_str(s).map_err(|e| AmountError::OutOfRange(format!("{s}: {e}")))?;
        // Decimal rounds what it cannot hold
        if value.to_string() != s {
            return Err(AmountError::OutOfRange(format!("{s} cannot be represented without rounding")));
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for Amount {
    type Error = AmountError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Only strings are accepted. JSON numbers would already have been through a float.
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(de::Error::custom)
    }
}
