//! Stock API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{StockLevel, StockMovement, StockMovementCreate};

use crate::api::Operator;
use crate::core::ServerState;
use crate::stock::NewMovement;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{ApiResponse, AppError, AppResult};

/// POST /api/stock/movements - 手动库存流水
pub async fn create_movement(
    State(state): State<ServerState>,
    operator: Operator,
    Json(payload): Json<StockMovementCreate>,
) -> AppResult<ApiResponse<StockMovement>> {
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)
        .map_err(|e| AppError::validation(e.0))?;

    let movement = state.ledger.post(NewMovement {
        product_id: payload.product_id,
        variant_id: payload.variant_id,
        quantity: payload.quantity,
        movement_type: payload.movement_type,
        note: payload.note.unwrap_or_default(),
        user_id: payload
            .user_id
            .unwrap_or_else(|| operator.actor().id.clone()),
        order_id: None,
    })?;
    Ok(ApiResponse::success(movement))
}

/// GET /api/stock/{variant_id} - 当前库存
pub async fn level(
    State(state): State<ServerState>,
    Path(variant_id): Path<String>,
) -> AppResult<ApiResponse<StockLevel>> {
    let quantity = state.ledger.stock(&variant_id);
    Ok(ApiResponse::success(StockLevel {
        variant_id,
        quantity,
    }))
}

/// GET /api/stock/{variant_id}/movements - 规格流水
pub async fn movements(
    State(state): State<ServerState>,
    Path(variant_id): Path<String>,
) -> AppResult<ApiResponse<Vec<StockMovement>>> {
    Ok(ApiResponse::success(state.ledger.movements(&variant_id)))
}
