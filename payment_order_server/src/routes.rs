//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Every handler here awaits the backend, so none of them block.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use mpo_common::MYST_CURRENCY_CODE;
use payment_order_engine::{
    order_objects::CreateOrderRequest,
    traits::{LocationResolver, OrderBackend},
    ExchangeRateApi,
    GatewayCatalogApi,
    OrderLifecycleApi,
};

use crate::{
    data_objects::{ClientCallbackRequest, ExchangeRateResult, GatewayQuery, JsonResponse},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Gateways  ----------------------------------------------------
route!(list_gateways => Get "/gateways" impl OrderBackend);
/// The payment gateways the backend supports, with their order amount options in the requested currency.
pub async fn list_gateways<B: OrderBackend>(
    query: web::Query<GatewayQuery>,
    api: web::Data<GatewayCatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET gateways for {}", query.currency);
    let gateways = api.list_gateways(&query.currency).await.map_err(|e| {
        debug!("💻️ Could not fetch payment gateways. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(gateways))
}

route!(gateway_callback => Post "/gateways/{gateway}/callback" impl OrderBackend, LocationResolver);
/// Relay a purchase completed on the client to the gateway's callback handler.
///
/// If the gateway rejects the purchase, the response is a 422 carrying the gateway's reason.
pub async fn gateway_callback<B, L>(
    path: web::Path<String>,
    body: web::Json<ClientCallbackRequest>,
    api: web::Data<OrderLifecycleApi<B, L>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderBackend,
    L: LocationResolver,
{
    let gateway = path.into_inner();
    let request = body.into_inner();
    debug!("💻️ POST {gateway} client callback for {}", request.identity);
    api.relay_client_callback(&request.identity, &gateway, &request.purchase_token, &request.google_product_id)
        .await
        .map_err(|e| {
            info!("💻️ {gateway} client callback for {} failed. {e}", request.identity);
            ServerError::from(e)
        })?;
    Ok(HttpResponse::Ok().json(JsonResponse::success(format!("{gateway} callback accepted"))))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_order => Post "/orders" impl OrderBackend, LocationResolver);
/// Create a new payment order.
///
/// Monetary amounts must be decimal strings. If `country` is left out or empty, it is derived from the node location.
pub async fn create_order<B, L>(
    body: web::Json<CreateOrderRequest>,
    api: web::Data<OrderLifecycleApi<B, L>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderBackend,
    L: LocationResolver,
{
    let request = body.into_inner();
    debug!("💻️ POST new {} order for {}", request.gateway, request.identity_address);
    let order = api.create_order(request).await.map_err(|e| {
        info!("💻️ Could not create payment order. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(order))
}

route!(list_orders => Get "/orders/{identity}" impl OrderBackend, LocationResolver);
pub async fn list_orders<B, L>(
    path: web::Path<String>,
    api: web::Data<OrderLifecycleApi<B, L>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderBackend,
    L: LocationResolver,
{
    let identity = path.into_inner();
    debug!("💻️ GET orders for {identity}");
    let orders = api.list_orders(&identity).await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(get_order => Get "/orders/{identity}/{order_id}" impl OrderBackend, LocationResolver);
pub async fn get_order<B, L>(
    path: web::Path<(String, String)>,
    api: web::Data<OrderLifecycleApi<B, L>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderBackend,
    L: LocationResolver,
{
    let (identity, order_id) = path.into_inner();
    debug!("💻️ GET order {order_id} for {identity}");
    let order = api.get_order(&identity, &order_id).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(order_invoice => Get "/orders/{identity}/{order_id}/invoice" impl OrderBackend, LocationResolver);
/// The invoice document for an order, passed through untouched.
pub async fn order_invoice<B, L>(
    path: web::Path<(String, String)>,
    api: web::Data<OrderLifecycleApi<B, L>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderBackend,
    L: LocationResolver,
{
    let (identity, order_id) = path.into_inner();
    debug!("💻️ GET invoice for order {order_id} of {identity}");
    let invoice = api.get_order_invoice(&identity, &order_id).await?;
    Ok(HttpResponse::Ok().content_type("application/octet-stream").body(invoice))
}

//----------------------------------------------   Exchange rates  ----------------------------------------------------
route!(myst_exchange_rate => Get "/exchange/myst/{quote}" impl OrderBackend);
pub async fn myst_exchange_rate<B: OrderBackend>(
    path: web::Path<String>,
    api: web::Data<ExchangeRateApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let quote = path.into_inner();
    debug!("💻️ GET MYST exchange rate in {quote}");
    let rate = api.myst_rate(&quote).await?;
    let result = ExchangeRateResult { base: MYST_CURRENCY_CODE.into(), quote, rate: rate.to_string() };
    Ok(HttpResponse::Ok().json(result))
}
