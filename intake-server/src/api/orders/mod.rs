//! 订单管理 API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/orders | GET | 订单列表 (可按 status 过滤) |
//! | /api/orders/{id} | GET | 订单详情 |
//! | /api/orders/{id}/logs | GET | 订单日志 |
//! | /api/orders/{id}/status | PUT | 修改状态 |
//! | /api/orders/bulk-status | POST | 批量修改状态 |
//! | /api/orders/{id}/call-outcome | POST | 外呼结果 |
//! | /api/orders/{id}/notes | POST | 添加备注 |
//! | /api/orders/{id}/shipment | POST | 发货 |
//! | /api/orders/{id}/payment | POST | 在线支付 |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders", get(handler::list))
        .route("/api/orders/bulk-status", post(handler::bulk_update_status))
        .route("/api/orders/{id}", get(handler::get_by_id))
        .route("/api/orders/{id}/logs", get(handler::logs))
        .route("/api/orders/{id}/status", put(handler::update_status))
        .route("/api/orders/{id}/call-outcome", post(handler::call_outcome))
        .route("/api/orders/{id}/notes", post(handler::add_note))
        .route("/api/orders/{id}/shipment", post(handler::create_shipment))
        .route("/api/orders/{id}/payment", post(handler::pay))
}
