use mockall::mock;
use payment_order_engine::{
    order_types::{ClientCallbackPayload, GatewayInfo, GatewayOrder, GatewayOrderRequest, IdentityAddress},
    traits::{LocationError, LocationResolver, OrderBackend, OrderBackendError, Origin},
};
use rust_decimal::Decimal;

mock! {
    pub Backend {}
    impl OrderBackend for Backend {
        async fn create_payment_order(&self, request: &GatewayOrderRequest) -> Result<GatewayOrder, OrderBackendError>;
        async fn fetch_payment_order(&self, identity: &IdentityAddress, order_id: &str) -> Result<Option<GatewayOrder>, OrderBackendError>;
        async fn fetch_payment_order_invoice(&self, identity: &IdentityAddress, order_id: &str) -> Result<Option<Vec<u8>>, OrderBackendError>;
        async fn fetch_payment_orders(&self, identity: &IdentityAddress) -> Result<Vec<GatewayOrder>, OrderBackendError>;
        async fn fetch_payment_gateways(&self, options_currency: &str) -> Result<Vec<GatewayInfo>, OrderBackendError>;
        async fn gateway_client_callback(&self, identity: &IdentityAddress, gateway: &str, payload: &ClientCallbackPayload) -> Result<(), OrderBackendError>;
        async fn fetch_myst_exchange_rate(&self, quote_currency: &str) -> Result<Decimal, OrderBackendError>;
    }
}

mock! {
    pub Locator {}
    impl LocationResolver for Locator {
        async fn get_origin(&self) -> Result<Origin, LocationError>;
    }
}
