//! 安全 API 模块 - 运营后台读取安全事件、维护 IP 黑名单
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/security/events | GET | 安全事件 (event_type, limit) |
//! | /api/security/blacklist | GET | 黑名单列表 |
//! | /api/security/blacklist | POST | 手动封禁 IP |
//! | /api/security/blacklist/{id} | DELETE | 解除封禁 |

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/security/events", get(handler::list_events))
        .route(
            "/api/security/blacklist",
            get(handler::list_blacklist).post(handler::add_to_blacklist),
        )
        .route("/api/security/blacklist/{id}", delete(handler::remove_from_blacklist))
}
