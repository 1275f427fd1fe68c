//! 公开结账 API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/checkout/orders | POST | 落地页提交订单 |
//!
//! 所有安全拒绝 (限流、黑名单、欺诈) 返回同一个 403 响应。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub use handler::CheckoutReceipt;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/checkout/orders", post(handler::create))
}
