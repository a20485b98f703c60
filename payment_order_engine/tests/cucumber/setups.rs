use cucumber::given;
use payment_order_engine::{
    order_types::{GatewayInfo, GatewayOrderOptions},
    FixedLocationResolver,
    InMemoryOrderBackend,
};

use crate::cucumber::{world::OrderSystem, OrderWorld};

#[given(expr = "a payment backend offering the gateways {string}")]
async fn backend_with_gateways(world: &mut OrderWorld, names: String) {
    let gateways = names
        .split(',')
        .map(|name| GatewayInfo {
            name: name.trim().to_string(),
            order_options: GatewayOrderOptions { minimum: 5.0, suggested: vec![10.0, 20.0, 50.0] },
            currencies: vec!["BTC".into(), "EUR".into(), "USD".into()],
        })
        .collect();
    world.system = Some(OrderSystem::new(InMemoryOrderBackend::with_gateways(gateways)));
}

#[given(expr = "the node is located in '{word}'")]
async fn node_location(world: &mut OrderWorld, country: String) {
    world.system_mut().locator = FixedLocationResolver::new(country);
}

#[given("the node location cannot be determined")]
async fn node_location_unknown(world: &mut OrderWorld) {
    world.system_mut().locator = FixedLocationResolver::failing("location oracle timed out");
}

#[given(expr = "the {word} gateway rejects callbacks with {string}")]
async fn gateway_rejects_callbacks(world: &mut OrderWorld, gateway: String, reason: String) {
    world.system().backend.reject_callbacks(&gateway, &reason);
}

#[given(expr = "listener '{word}' is registered")]
async fn register_listener(world: &mut OrderWorld, name: String) {
    let listener = world.listeners.entry(name).or_default().clone();
    world.system().bridge.register_listener(std::sync::Arc::new(listener));
}
