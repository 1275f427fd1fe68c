//! Security API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{BlacklistCreate, BlacklistEntry, SecurityEvent, SecurityEventQuery};

use crate::api::Operator;
use crate::core::ServerState;
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};
use crate::utils::{ApiResponse, AppError, AppResult};

/// GET /api/security/events - 安全事件 (新到旧)
pub async fn list_events(
    State(state): State<ServerState>,
    Query(query): Query<SecurityEventQuery>,
) -> AppResult<ApiResponse<Vec<SecurityEvent>>> {
    Ok(ApiResponse::success(state.events.list(&query)))
}

/// GET /api/security/blacklist - 黑名单列表 (新到旧)
pub async fn list_blacklist(
    State(state): State<ServerState>,
) -> AppResult<ApiResponse<Vec<BlacklistEntry>>> {
    Ok(ApiResponse::success(state.blacklist.list()))
}

/// POST /api/security/blacklist - 手动封禁
pub async fn add_to_blacklist(
    State(state): State<ServerState>,
    operator: Operator,
    Json(payload): Json<BlacklistCreate>,
) -> AppResult<ApiResponse<BlacklistEntry>> {
    validate_required_text(&payload.reason, "reason", MAX_NOTE_LEN)
        .map_err(|e| AppError::validation(e.0))?;

    let created_by = payload
        .created_by
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(&operator.actor().name);

    let entry = state
        .blacklist
        .add(payload.ip.trim(), payload.reason.trim(), created_by)?;
    Ok(ApiResponse::success(entry))
}

/// DELETE /api/security/blacklist/{id} - 解除封禁
pub async fn remove_from_blacklist(
    State(state): State<ServerState>,
    operator: Operator,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<BlacklistEntry>> {
    let entry = state.blacklist.remove(&id)?;
    tracing::debug!(operator = %operator.actor().id, ip = %entry.ip, "Unblock requested");
    Ok(ApiResponse::success(entry))
}
