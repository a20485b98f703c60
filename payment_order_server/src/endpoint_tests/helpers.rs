use actix_web::{
    body::MessageBody,
    http::StatusCode,
    test,
    test::TestRequest,
    web::{self, ServiceConfig},
    App,
};
use log::debug;

use crate::server::json_config;

pub async fn get_request<F>(path: &str, configure: F) -> (StatusCode, Vec<u8>)
where F: FnOnce(&mut ServiceConfig) {
    let req = TestRequest::get().uri(path).to_request();
    send(req, configure).await
}

pub async fn post_request<F>(path: &str, body: &str, configure: F) -> (StatusCode, Vec<u8>)
where F: FnOnce(&mut ServiceConfig) {
    let req = TestRequest::post()
        .uri(path)
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body.to_string())
        .to_request();
    send(req, configure).await
}

async fn send<F>(req: actix_http::Request, configure: F) -> (StatusCode, Vec<u8>)
where F: FnOnce(&mut ServiceConfig) {
    let app = App::new().app_data(json_config()).service(web::scope("/api").configure(configure));
    let service = test::init_service(app).await;
    debug!("Making request");
    let (_, res) = test::call_service(&service, req).await.into_parts();
    let status = res.status();
    let body = res.into_body().try_into_bytes().unwrap().to_vec();
    (status, body)
}

pub fn as_json(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).unwrap_or_else(|e| panic!("Not JSON ({e}): {}", String::from_utf8_lossy(body)))
}
