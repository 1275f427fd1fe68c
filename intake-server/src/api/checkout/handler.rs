//! Checkout API Handlers

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{Order, OrderRequest, OrderStatus, PaymentStatus};

use crate::api::ClientInfo;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

/// What the landing page gets back for an accepted order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    pub id: String,
    pub order_number: String,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
}

impl From<Order> for CheckoutReceipt {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            total_amount: order.total_amount,
            status: order.status,
            payment_status: order.payment_status,
        }
    }
}

/// POST /api/checkout/orders - 提交订单
///
/// IP 与 User-Agent 只取自连接与请求头，忽略请求体中的同名字段。
pub async fn create(
    State(state): State<ServerState>,
    client: ClientInfo,
    Json(mut payload): Json<OrderRequest>,
) -> AppResult<ApiResponse<CheckoutReceipt>> {
    payload.ip_address = client.ip;
    payload.user_agent = client.user_agent;
    if payload.referrer.is_none() {
        payload.referrer = client.referrer;
    }

    let order = state.intake.checkout(payload).await?;
    Ok(ApiResponse::success(order.into()))
}
