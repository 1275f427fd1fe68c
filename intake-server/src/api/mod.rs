//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`checkout`] - 公开结账 (准入网关)
//! - [`orders`] - 订单管理: 查询、状态、外呼、发货、备注、支付
//! - [`security`] - 安全事件与 IP 黑名单
//! - [`stock`] - 库存流水

pub mod client;
pub mod operator;

pub mod checkout;
pub mod health;
pub mod orders;
pub mod security;
pub mod stock;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub use client::ClientInfo;
pub use operator::Operator;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};

/// Build the router without middleware or state
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(checkout::router())
        .merge(orders::router())
        .merge(security::router())
        .merge(stock::router())
}

/// Build a fully configured application with all middleware and state
///
/// Used by the HTTP server and by oneshot calls in tests
pub fn build_app(state: ServerState) -> Router {
    let timeout = state.config.request_timeout();
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::with_status_code(
            http::StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
