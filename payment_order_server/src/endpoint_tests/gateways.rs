use actix_web::{http::StatusCode, web, web::ServiceConfig};
use payment_order_engine::{
    order_types::{GatewayInfo, GatewayOrderOptions},
    traits::OrderBackendError,
    ExchangeRateApi,
    GatewayCatalogApi,
    InMemoryOrderBackend,
};
use rust_decimal::Decimal;

use super::{
    helpers::{as_json, get_request},
    mocks::MockBackend,
};
use crate::routes::{ListGatewaysRoute, MystExchangeRateRoute};

fn gateways() -> Vec<GatewayInfo> {
    vec![
        GatewayInfo {
            name: "coingate".into(),
            order_options: GatewayOrderOptions { minimum: 2.5, suggested: vec![5.0, 10.0, 20.0] },
            currencies: vec!["BTC".into(), "ETH".into(), "USDT".into()],
        },
        GatewayInfo {
            name: "stripe".into(),
            order_options: GatewayOrderOptions { minimum: 5.0, suggested: vec![] },
            currencies: vec!["USD".into(), "EUR".into()],
        },
    ]
}

fn configure_catalog(backend: MockBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(GatewayCatalogApi::new(backend))).service(ListGatewaysRoute::<MockBackend>::new());
    }
}

fn configure_rates(backend: InMemoryOrderBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(ExchangeRateApi::new(backend)))
            .service(MystExchangeRateRoute::<InMemoryOrderBackend>::new());
    }
}

#[actix_web::test]
async fn list_gateways() {
    let mut backend = MockBackend::new();
    backend
        .expect_fetch_payment_gateways()
        .withf(|currency: &str| currency == "EUR")
        .times(1)
        .returning(|_| Ok(gateways()));
    let (status, body) = get_request("/api/gateways?currency=EUR", configure_catalog(backend)).await;
    assert_eq!(status, StatusCode::OK);
    let list = as_json(&body);
    assert_eq!(list[0]["name"], "coingate");
    assert_eq!(list[0]["order_options"]["minimum"], 2.5);
    assert_eq!(list[0]["order_options"]["suggested"][2], 20.0);
    assert_eq!(list[0]["currencies"][1], "ETH");
    assert_eq!(list[1]["name"], "stripe");
    assert_eq!(list[1]["order_options"]["suggested"].as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn list_gateways_defaults_to_usd() {
    let mut backend = MockBackend::new();
    backend
        .expect_fetch_payment_gateways()
        .withf(|currency: &str| currency == "USD")
        .times(1)
        .returning(|_| Ok(vec![]));
    let (status, body) = get_request("/api/gateways", configure_catalog(backend)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]");
}

#[actix_web::test]
async fn list_gateways_upstream_failure() {
    let mut backend = MockBackend::new();
    backend
        .expect_fetch_payment_gateways()
        .times(1)
        .returning(|_| Err(OrderBackendError::Unavailable("503 from backend".into())));
    let (status, body) = get_request("/api/gateways?currency=USD", configure_catalog(backend)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(as_json(&body)["error"].as_str().unwrap().contains("503 from backend"));
}

#[actix_web::test]
async fn myst_exchange_rate() {
    let backend = InMemoryOrderBackend::default();
    backend.set_exchange_rate("EUR", Decimal::new(1834, 4));
    let (status, body) = get_request("/api/exchange/myst/eur", configure_rates(backend.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let result = as_json(&body);
    assert_eq!(result["base"], "MYST");
    assert_eq!(result["quote"], "eur");
    assert_eq!(result["rate"], "0.1834");

    let (status, _) = get_request("/api/exchange/myst/GBP", configure_rates(backend)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
