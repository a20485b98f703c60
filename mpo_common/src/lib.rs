mod amount;
mod gateway_data;
pub mod helpers;

pub use amount::{Amount, AmountError, MYST_CURRENCY_CODE, USD_CURRENCY_CODE};
pub use gateway_data::GatewayData;
