//! Shared helpers for router-level tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Method, Request, StatusCode, header};
use intake_server::catalog::CatalogService;
use intake_server::payment::MockPaymentProvider;
use intake_server::{Config, ServerState, api};
use serde_json::{Value, json};
use shared::models::CatalogFile;
use tower::ServiceExt;

/// Termos in two colours (20 red, 5 blue), sold as 1 or 2 pieces
pub fn catalog() -> CatalogService {
    let file: CatalogFile = serde_json::from_value(json!({
        "products": [{
            "id": "p-termos",
            "name": "Çelik Termos",
            "variants": [
                { "id": "v-red", "name": "Kırmızı", "initial_stock": 20 },
                { "id": "v-blue", "name": "Mavi", "initial_stock": 5 }
            ],
            "prices": [
                { "id": "t-1", "label": "1 Adet", "quantity": 1, "price": "299.90" },
                { "id": "t-2", "label": "2 Adet", "quantity": 2, "price": "499.00" }
            ]
        }]
    }))
    .unwrap();
    CatalogService::new(file.products).unwrap()
}

pub fn state_with(config: Config) -> ServerState {
    ServerState::with_catalog(config, catalog(), Arc::new(MockPaymentProvider)).unwrap()
}

pub fn app_with(config: Config) -> Router {
    api::build_app(state_with(config))
}

pub fn app() -> Router {
    app_with(Config::default())
}

/// A submission that passes every gate check
pub fn checkout_body(phone: &str) -> Value {
    json!({
        "product_id": "p-termos",
        "price_id": "t-2",
        "name": "Ayşe Yılmaz",
        "phone": phone,
        "address": "Atatürk Cd. No:5 D:3",
        "city": "İzmir",
        "district": "Konak",
        "payment_method": "CASH_ON_DELIVERY",
        "variant_selection": "v-red"
    })
}

pub fn checkout_request(ip: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/checkout/orders")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", ip)
        .header(header::USER_AGENT, "Mozilla/5.0 (Linux; Android 14)")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-user-id", "op-7")
        .header("x-user-name", "Zeynep")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    // Extractor rejections come back as plain text
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

/// Place an accepted order and return its id
pub async fn place_order(app: &Router, ip: &str, phone: &str) -> String {
    let (status, body) = send(app, checkout_request(ip, &checkout_body(phone))).await;
    assert_eq!(status, StatusCode::OK, "checkout failed: {body}");
    body["data"]["id"].as_str().unwrap().to_string()
}

pub async fn stock_of(app: &Router, variant_id: &str) -> i64 {
    let (status, body) = send(app, get(&format!("/api/stock/{variant_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["quantity"].as_i64().unwrap()
}

pub async fn event_count(app: &Router, event_type: &str) -> usize {
    let (status, body) = send(
        app,
        get(&format!("/api/security/events?event_type={event_type}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"].as_array().unwrap().len()
}
