//! 库存 API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/stock/movements | POST | 手动入库/出库/退货/取消 |
//! | /api/stock/{variant_id} | GET | 当前库存 |
//! | /api/stock/{variant_id}/movements | GET | 规格流水 (旧到新) |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/stock/movements", post(handler::create_movement))
        .route("/api/stock/{variant_id}", get(handler::level))
        .route("/api/stock/{variant_id}/movements", get(handler::movements))
}
