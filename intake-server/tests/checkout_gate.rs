//! 结账准入网关 - 路由级测试
//!
//! 限流 → 黑名单 → 欺诈评分 → 创建订单，经由完整路由 (oneshot) 驱动。

mod common;

use common::*;
use http::{Method, StatusCode};
use intake_server::Config;
use serde_json::json;

fn distinct_phone(i: usize) -> String {
    format!("0532 418 {:02} {:02}", 10 + i, 40 + i)
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["products"], 1);
    assert_eq!(body["blacklisted_ips"], 0);
}

#[tokio::test]
async fn test_accepted_order_posts_stock_and_log() {
    let app = app();
    let (status, body) = send(
        &app,
        checkout_request("203.0.113.10, 10.0.0.1", &checkout_body("0532 418 27 93")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);

    let receipt = &body["data"];
    assert!(receipt["order_number"].as_str().unwrap().starts_with("ORD"));
    assert_eq!(receipt["status"], "NEW");
    assert_eq!(receipt["payment_status"], "UNPAID");
    assert_eq!(receipt["total_amount"], "499.00");

    let id = receipt["id"].as_str().unwrap();
    let (_, order) = send(&app, get(&format!("/api/orders/{id}"))).await;
    assert_eq!(order["data"]["ip_address"], "203.0.113.10");
    assert_eq!(order["data"]["user_agent"], "Mozilla/5.0 (Linux; Android 14)");
    assert_eq!(order["data"]["items"][0]["quantity"], 2);
    assert_eq!(order["data"]["items"][0]["variant_selection"], "Kırmızı");

    // Exactly one OUT movement of the tier quantity
    assert_eq!(stock_of(&app, "v-red").await, 18);
    let (_, movements) = send(&app, get("/api/stock/v-red/movements")).await;
    let out: Vec<_> = movements["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|m| m["movement_type"] == "OUT")
        .collect();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0]["quantity"], 2);
    assert_eq!(out[0]["order_id"], id);

    let (_, logs) = send(&app, get(&format!("/api/orders/{id}/logs"))).await;
    let logs = logs["data"].as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["action"], "CREATED");
}

#[tokio::test]
async fn test_eleventh_request_is_rate_limited() {
    let app = app();
    for i in 0..10 {
        let (status, body) = send(
            &app,
            checkout_request("198.51.100.20", &checkout_body(&distinct_phone(i))),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "request {} rejected: {body}", i + 1);
    }

    let (status, body) = send(
        &app,
        checkout_request("198.51.100.20", &checkout_body(&distinct_phone(10))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 4010);

    assert_eq!(event_count(&app, "RATE_LIMIT").await, 1);
    let (_, orders) = send(&app, get("/api/orders")).await;
    assert_eq!(orders["data"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_critical_fraud_auto_blacklists_ip() {
    let app = app();
    let mut fake = checkout_body("5555555555");
    fake["name"] = json!("test");

    let (status, _) = send(&app, checkout_request("192.0.2.66", &fake)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(event_count(&app, "FAKE_ORDER_ATTEMPT").await, 1);
    assert_eq!(event_count(&app, "AUTO_BLACKLIST").await, 1);

    let (_, list) = send(&app, get("/api/security/blacklist")).await;
    let entries = list["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["ip"], "192.0.2.66");
    assert_eq!(entries[0]["reason"], "Auto-blocked: Critical Fraud Detected");
    assert_eq!(entries[0]["created_by"], "System AI");

    // The same submission now stops at the blacklist, before scoring
    let (status, _) = send(&app, checkout_request("192.0.2.66", &fake)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(event_count(&app, "BLACKLIST_BLOCK").await, 1);
    assert_eq!(event_count(&app, "FAKE_ORDER_ATTEMPT").await, 1);

    let (_, list) = send(&app, get("/api/security/blacklist")).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);

    // Even a clean submission from that IP is refused
    let (status, _) = send(
        &app,
        checkout_request("192.0.2.66", &checkout_body("0532 418 27 93")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(stock_of(&app, "v-red").await, 20);
}

#[tokio::test]
async fn test_security_rejections_look_identical() {
    let app = app_with(Config {
        rate_limit_max_requests: 1,
        ..Config::default()
    });

    let mut fake = checkout_body("5555555555");
    fake["name"] = json!("test");
    let (fraud_status, fraud_body) = send(&app, checkout_request("192.0.2.1", &fake)).await;

    let (first_status, _) = send(
        &app,
        checkout_request("192.0.2.2", &checkout_body("0532 418 27 93")),
    )
    .await;
    assert_eq!(first_status, StatusCode::OK);
    let (limited_status, limited_body) = send(
        &app,
        checkout_request("192.0.2.2", &checkout_body("0532 418 27 94")),
    )
    .await;

    assert_eq!(fraud_status, StatusCode::FORBIDDEN);
    assert_eq!(limited_status, StatusCode::FORBIDDEN);
    assert_eq!(fraud_body, limited_body);
    assert_eq!(fraud_body["code"], 4010);
    assert!(fraud_body.get("details").is_none());
}

#[tokio::test]
async fn test_untrusted_forwarded_for_does_not_reset_rate_limit() {
    let app = app_with(Config {
        rate_limit_max_requests: 1,
        trust_proxy_headers: false,
        ..Config::default()
    });

    let (status, body) = send(
        &app,
        checkout_request("192.0.2.50", &checkout_body("0532 418 27 93")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["data"]["id"], json!(null));

    // A different forged address lands in the same bucket
    let (status, _) = send(
        &app,
        checkout_request("192.0.2.51", &checkout_body("0533 512 64 08")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(event_count(&app, "RATE_LIMIT").await, 1);
}

#[tokio::test]
async fn test_manual_blacklist_and_unblock() {
    let app = app();
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/security/blacklist",
            &json!({ "ip": "203.0.113.99", "reason": "Chargeback abuse" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["created_by"], "Zeynep");
    let entry_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        checkout_request("203.0.113.99", &checkout_body("0532 418 27 93")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, delete(&format!("/api/security/blacklist/{entry_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, delete(&format!("/api/security/blacklist/{entry_id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        checkout_request("203.0.113.99", &checkout_body("0532 418 27 93")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_blank_reason_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/security/blacklist",
            &json!({ "ip": "203.0.113.99", "reason": "  " }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
}

#[tokio::test]
async fn test_data_errors_are_reported_plainly() {
    let app = app();

    let mut body = checkout_body("0532 418 27 93");
    body["product_id"] = json!("p-missing");
    let (status, response) = send(&app, checkout_request("192.0.2.30", &body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_ne!(response["code"], 4010);

    let mut body = checkout_body("0532 418 27 93");
    body["district"] = json!(" ");
    let (status, _) = send(&app, checkout_request("192.0.2.30", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut body = checkout_body("0532 418 27 93");
    body["variant_selection"] = json!("Yeşil");
    let (status, _) = send(&app, checkout_request("192.0.2.30", &body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, events) = send(&app, get("/api/security/events")).await;
    assert!(events["data"].as_array().unwrap().is_empty());
    assert_eq!(stock_of(&app, "v-red").await, 20);
}

#[tokio::test]
async fn test_credit_card_checkout() {
    let app = app();
    let card = |number: &str| {
        json!({
            "holder_name": "Ayşe Yılmaz",
            "number": number,
            "expiry_month": 12,
            "expiry_year": 2099,
            "cvc": "123"
        })
    };

    let mut body = checkout_body("0532 418 27 93");
    body["payment_method"] = json!("CREDIT_CARD");
    body["card"] = card("4111 1111 1111 1111");
    let (status, response) = send(&app, checkout_request("192.0.2.40", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["data"]["payment_status"], "PAID");
    assert_eq!(response["data"]["status"], "ONAYLANDI");

    // A decline keeps the order
    let mut body = checkout_body("0533 512 64 08");
    body["payment_method"] = json!("CREDIT_CARD");
    body["card"] = card("4000000000000002");
    let (status, response) = send(&app, checkout_request("192.0.2.41", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["data"]["payment_status"], "FAILED");
    assert_eq!(response["data"]["status"], "NEW");
    let id = response["data"]["id"].as_str().unwrap().to_string();

    // Retried from the console with a good card
    let (status, response) = send(
        &app,
        json_request(
            Method::POST,
            &format!("/api/orders/{id}/payment"),
            &card("4111111111111111"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["data"]["payment_status"], "PAID");

    let (_, logs) = send(&app, get(&format!("/api/orders/{id}/logs"))).await;
    let payments = logs["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|l| l["action"] == "PAYMENT")
        .count();
    assert_eq!(payments, 2);

    // Credit card without card details
    let mut body = checkout_body("0534 771 20 19");
    body["payment_method"] = json!("CREDIT_CARD");
    let (status, body) = send(&app, checkout_request("192.0.2.42", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5006);
}
