use std::{sync::Arc, time::Duration};

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, Error, HttpServer};
use log::*;
use payment_order_engine::{
    events::{EventBus, OrderUpdatedEvent},
    ExchangeRateApi,
    GatewayCatalogApi,
    OrderLifecycleApi,
    OrderStatusTracker,
    OrderUpdateBridge,
    TrackedOrders,
};

use crate::{
    backend_client::HttpOrderBackend,
    config::ServerConfig,
    errors::ServerError,
    listener::LoggingOrderListener,
    location::OracleLocationResolver,
    routes::{
        health,
        CreateOrderRoute,
        GatewayCallbackRoute,
        GetOrderRoute,
        ListGatewaysRoute,
        ListOrdersRoute,
        MystExchangeRateRoute,
        OrderInvoiceRoute,
    },
    tracker_worker::start_tracker_worker,
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let backend = HttpOrderBackend::new(&config.backend_url, config.backend_timeout)?;
    let locator = OracleLocationResolver::new(config.location_oracle_url.clone(), config.backend_timeout)?;
    let bus = EventBus::<OrderUpdatedEvent>::new(config.event_buffer_size);
    let bridge = OrderUpdateBridge::new(&bus).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    bridge.register_listener(Arc::new(LoggingOrderListener));
    let tracked = config.track_order_status.then(TrackedOrders::default);
    let worker = tracked.as_ref().map(|tracked| {
        let tracker =
            OrderStatusTracker::new(backend.clone(), bus.clone(), tracked.clone(), config.status_tracking_timeout);
        start_tracker_worker(tracker, config.status_poll_interval)
    });
    if worker.is_none() {
        info!("🕰️ Order status tracking is disabled. No order updates will be published.");
    }
    let srv = create_server_instance(config, backend, locator, tracked)?;
    let result = srv.await.map_err(|e| ServerError::Unspecified(e.to_string()));
    if let Some(worker) = worker {
        worker.abort();
    }
    debug!("📬️ Server stopped. {bridge:?}");
    result
}

pub fn create_server_instance(
    config: ServerConfig,
    backend: HttpOrderBackend,
    locator: OracleLocationResolver,
    tracked: Option<TrackedOrders>,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let catalog_api = GatewayCatalogApi::new(backend.clone());
        let exchange_api = ExchangeRateApi::new(backend.clone());
        let mut lifecycle_api = OrderLifecycleApi::new(backend.clone(), locator.clone());
        if let Some(tracked) = &tracked {
            lifecycle_api = lifecycle_api.with_tracked_orders(tracked.clone());
        }
        let api_scope = web::scope("/api")
            .service(ListGatewaysRoute::<HttpOrderBackend>::new())
            .service(GatewayCallbackRoute::<HttpOrderBackend, OracleLocationResolver>::new())
            .service(CreateOrderRoute::<HttpOrderBackend, OracleLocationResolver>::new())
            .service(ListOrdersRoute::<HttpOrderBackend, OracleLocationResolver>::new())
            .service(GetOrderRoute::<HttpOrderBackend, OracleLocationResolver>::new())
            .service(OrderInvoiceRoute::<HttpOrderBackend, OracleLocationResolver>::new())
            .service(MystExchangeRateRoute::<HttpOrderBackend>::new());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("mpo::access_log"))
            .app_data(json_config())
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(exchange_api))
            .app_data(web::Data::new(lifecycle_api))
            .service(health)
            .service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Malformed JSON bodies, including amounts sent as numbers, are answered with a 400 in the usual error format.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!("💻️ Rejected request body. {err}");
        Error::from(ServerError::InvalidRequestBody(err.to_string()))
    })
}
