//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{
    BulkStatusResult, BulkStatusUpdate, CallOutcomeRequest, CardDetails, Order, OrderLog,
    OrderNoteCreate, OrderStatus, ShipmentCreate, StatusUpdate,
};

use crate::api::Operator;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
}

/// GET /api/orders - 订单列表 (新到旧)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<ApiResponse<Vec<Order>>> {
    Ok(ApiResponse::success(state.lifecycle.list(query.status)))
}

/// GET /api/orders/{id} - 订单详情
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Order>> {
    let order = state.lifecycle.get(&id)?;
    Ok(ApiResponse::success(order))
}

/// GET /api/orders/{id}/logs - 订单日志 (旧到新)
pub async fn logs(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<OrderLog>>> {
    let logs = state.lifecycle.logs(&id)?;
    Ok(ApiResponse::success(logs))
}

/// PUT /api/orders/{id}/status - 修改状态
pub async fn update_status(
    State(state): State<ServerState>,
    operator: Operator,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<ApiResponse<Order>> {
    let order = state.lifecycle.update_status(
        &id,
        payload.status,
        operator.actor(),
        payload.note.as_deref(),
    )?;
    Ok(ApiResponse::success(order))
}

/// POST /api/orders/bulk-status - 批量修改状态
///
/// 单个订单失败不影响其他订单，结果逐条返回。
pub async fn bulk_update_status(
    State(state): State<ServerState>,
    operator: Operator,
    Json(payload): Json<BulkStatusUpdate>,
) -> AppResult<ApiResponse<BulkStatusResult>> {
    let result =
        state
            .lifecycle
            .bulk_update_status(&payload.order_ids, payload.status, operator.actor());
    Ok(ApiResponse::success(result))
}

/// POST /api/orders/{id}/call-outcome - 外呼结果
pub async fn call_outcome(
    State(state): State<ServerState>,
    operator: Operator,
    Path(id): Path<String>,
    Json(payload): Json<CallOutcomeRequest>,
) -> AppResult<ApiResponse<Order>> {
    let order = state.lifecycle.apply_call_outcome(
        &id,
        payload.outcome,
        operator.actor(),
        payload.note.as_deref(),
    )?;
    Ok(ApiResponse::success(order))
}

/// POST /api/orders/{id}/notes - 添加备注
pub async fn add_note(
    State(state): State<ServerState>,
    operator: Operator,
    Path(id): Path<String>,
    Json(payload): Json<OrderNoteCreate>,
) -> AppResult<ApiResponse<OrderLog>> {
    let log = state
        .lifecycle
        .add_note(&id, operator.actor(), &payload.message)?;
    Ok(ApiResponse::success(log))
}

/// POST /api/orders/{id}/shipment - 发货
pub async fn create_shipment(
    State(state): State<ServerState>,
    operator: Operator,
    Path(id): Path<String>,
    Json(payload): Json<ShipmentCreate>,
) -> AppResult<ApiResponse<Order>> {
    let order = state.lifecycle.create_shipment(
        &id,
        &payload.tracking_code,
        payload.carrier.as_deref(),
        operator.actor(),
    )?;
    Ok(ApiResponse::success(order))
}

/// POST /api/orders/{id}/payment - 信用卡订单重新支付
///
/// 支付被拒时订单保留，payment_status 为 FAILED。
pub async fn pay(
    State(state): State<ServerState>,
    operator: Operator,
    Path(id): Path<String>,
    Json(card): Json<CardDetails>,
) -> AppResult<ApiResponse<Order>> {
    let order = state.payments.pay(&id, &card, operator.actor()).await?;
    Ok(ApiResponse::success(order))
}
