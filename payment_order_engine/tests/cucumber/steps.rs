use cucumber::{then, when};
use payment_order_engine::{order_objects::CreateOrderRequest, order_types::OrderStatus, OrderApiError};

use crate::cucumber::OrderWorld;

fn order_request(identity: &str, gateway: &str, myst: &str, usd: &str, country: &str) -> CreateOrderRequest {
    CreateOrderRequest {
        identity_address: identity.to_string(),
        gateway: gateway.to_string(),
        myst_amount: myst.parse().expect("Invalid MYST amount"),
        amount_usd: usd.parse().expect("Invalid USD amount"),
        pay_currency: "USD".into(),
        country: country.to_string(),
        state: String::new(),
        gateway_caller_data: None,
    }
}

async fn create_order(world: &mut OrderWorld, request: CreateOrderRequest) {
    match world.system().lifecycle_api().create_order(request).await {
        Ok(order) => {
            world.last_order = Some(order);
            world.last_error = None;
        },
        Err(e) => world.last_error = Some(e),
    }
}

#[when(expr = "identity '{word}' creates a {word} order for {word} MYST and {word} USD without a country")]
async fn create_order_without_country(world: &mut OrderWorld, identity: String, gw: String, myst: String, usd: String) {
    create_order(world, order_request(&identity, &gw, &myst, &usd, "")).await;
}

#[when(expr = "identity '{word}' creates a {word} order for {word} MYST and {word} USD in country '{word}'")]
async fn create_order_with_country(
    world: &mut OrderWorld,
    identity: String,
    gw: String,
    myst: String,
    usd: String,
    country: String,
) {
    create_order(world, order_request(&identity, &gw, &myst, &usd, &country)).await;
}

#[when(expr = "identity '{word}' lists their orders")]
async fn list_orders(world: &mut OrderWorld, identity: String) {
    match world.system().lifecycle_api().list_orders(&identity).await {
        Ok(orders) => world.listed = orders,
        Err(e) => world.last_error = Some(e),
    }
}

#[when(expr = "identity '{word}' fetches order '{word}'")]
async fn fetch_order(world: &mut OrderWorld, identity: String, order_id: String) {
    match world.system().lifecycle_api().get_order(&identity, &order_id).await {
        Ok(order) => world.last_order = Some(order),
        Err(e) => world.last_error = Some(e),
    }
}

#[when(expr = "identity '{word}' relays a {word} callback with token '{word}' for product '{word}'")]
async fn relay_callback(world: &mut OrderWorld, identity: String, gateway: String, token: String, product: String) {
    let api = world.system().lifecycle_api();
    if let Err(e) = api.relay_client_callback(&identity, &gateway, &token, &product).await {
        world.last_error = Some(e);
    }
}

#[when(expr = "the last order becomes '{word}'")]
async fn last_order_status(world: &mut OrderWorld, status: String) {
    let id = world.last_order.as_ref().expect("No order has been created").id.clone();
    assert!(world.system().backend.set_order_status(&id, OrderStatus::from(status.as_str())));
}

#[when("the order tracker polls the backend")]
async fn poll_tracker(world: &mut OrderWorld) {
    let result = world.system().tracker().poll().await;
    world.published += result.updated_count() as u64;
    world.wait_for_bridge().await;
}

#[then(expr = "the order country is '{word}'")]
async fn order_country(world: &mut OrderWorld, country: String) {
    let order = world.last_order.as_ref().expect("No order was created");
    assert_eq!(order.country, country);
}

#[then(expr = "the location was looked up {int} time(s)")]
async fn location_lookups(world: &mut OrderWorld, count: usize) {
    assert_eq!(world.system().locator.lookups(), count);
}

#[then(expr = "the backend holds {int} order(s)")]
async fn backend_order_count(world: &mut OrderWorld, count: usize) {
    assert_eq!(world.system().backend.order_count(), count);
}

#[then("the request fails because the location is unavailable")]
async fn location_unavailable(world: &mut OrderWorld) {
    assert!(
        matches!(world.last_error, Some(OrderApiError::LocationUnavailable(_))),
        "Unexpected result: {:?}",
        world.last_error
    );
}

#[then("the request fails because the order was not found")]
async fn order_not_found(world: &mut OrderWorld) {
    assert!(
        matches!(world.last_error, Some(OrderApiError::OrderNotFound { .. })),
        "Unexpected result: {:?}",
        world.last_error
    );
}

#[then(expr = "the request is rejected by {word} with {string}")]
async fn rejected_by_gateway(world: &mut OrderWorld, gateway: String, reason: String) {
    assert_eq!(world.last_error, Some(OrderApiError::GatewayRejected { gateway, reason }));
}

#[then(expr = "{int} order(s) is/are returned")]
async fn listed_count(world: &mut OrderWorld, count: usize) {
    assert!(world.last_error.is_none(), "Unexpected error: {:?}", world.last_error);
    assert_eq!(world.listed.len(), count);
}

#[then(expr = "the listed gateways are {string}")]
async fn listed_gateways(world: &mut OrderWorld, gateways: String) {
    let listed = world.listed.iter().map(|o| o.gateway.as_str()).collect::<Vec<_>>().join(", ");
    assert_eq!(listed, gateways);
}

#[then(expr = "the catalog for {word} lists {string}")]
async fn catalog_lists(world: &mut OrderWorld, currency: String, gateways: String) {
    let catalog = world.system().catalog_api().list_gateways(&currency).await.expect("Error listing gateways");
    let names = catalog.iter().map(|g| g.name.as_str()).collect::<Vec<_>>().join(", ");
    assert_eq!(names, gateways);
}

#[then(expr = "the backend received a {word} callback from '{word}' with token '{word}' for product '{word}'")]
async fn backend_received_callback(
    world: &mut OrderWorld,
    gateway: String,
    identity: String,
    token: String,
    product: String,
) {
    let callbacks = world.system().backend.callbacks();
    let (id, gw, payload) = callbacks.last().expect("No callbacks were received");
    assert_eq!(id.as_str(), identity);
    assert_eq!(gw, &gateway);
    assert_eq!(payload.purchase_token, token);
    assert_eq!(payload.google_product_id, product);
}

#[then(expr = "listener '{word}' receives {int} update(s)")]
async fn listener_update_count(world: &mut OrderWorld, name: String, count: usize) {
    world.wait_for_bridge().await;
    let listener = world.listeners.get(&name).expect("No such listener");
    assert_eq!(listener.received.lock().unwrap().len(), count);
}

#[then(expr = "the last update for listener '{word}' has status '{word}'")]
async fn listener_last_status(world: &mut OrderWorld, name: String, status: String) {
    let listener = world.listeners.get(&name).expect("No such listener");
    let received = listener.received.lock().unwrap();
    let last = received.last().expect("No updates were received");
    assert_eq!(last.status, status);
    let order = world.last_order.as_ref().expect("No order was created");
    assert_eq!(last.order_id, order.id);
    assert_eq!(last.pay_amount, order.pay_amount);
}
