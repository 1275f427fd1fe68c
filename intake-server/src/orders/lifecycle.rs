//! Order lifecycle
//!
//! ```text
//! NEW ─┬─> ARANACAK
//!      ├─> ULASILAMADI
//!      ├─> YANLIS_NUMARA
//!      ├─> ONAYLANDI ─┐
//!      └─> IPTAL      │
//!                     v
//!                  KARGODA ─┬─> TESLIM_EDILDI
//!                           └─> IADE
//! ```
//!
//! Operators may move an order to any state; leaving a terminal state is
//! logged as a warning, not refused. Every change writes exactly one order
//! log entry.
//!
//! Stock follows the status. Entering IPTAL gives stock back as CANCEL,
//! entering IADE as RETURN, and only once while it stays given back.
//! Confirming, shipping or delivering an order whose stock was given back
//! takes it out again as OUT.

use super::error::{OrderError, OrderResult};
use super::new_log;
use super::repository::OrderRepository;
use crate::stock::{NewMovement, StockLedger};
use crate::utils::validation::{MAX_NOTE_LEN, MAX_TRACKING_CODE_LEN};
use shared::models::{
    Actor, BulkItemResult, BulkStatusResult, CallOutcome, Order, OrderLog, OrderLogAction,
    OrderStatus, StockMovementType,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct OrderLifecycle {
    orders: Arc<dyn OrderRepository>,
    ledger: Arc<StockLedger>,
}

impl OrderLifecycle {
    pub fn new(orders: Arc<dyn OrderRepository>, ledger: Arc<StockLedger>) -> Self {
        Self { orders, ledger }
    }

    pub fn get(&self, id: &str) -> OrderResult<Order> {
        self.orders
            .get(id)
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    pub fn list(&self, status: Option<OrderStatus>) -> Vec<Order> {
        self.orders.list(status)
    }

    pub fn logs(&self, id: &str) -> OrderResult<Vec<OrderLog>> {
        self.orders.logs(id)
    }

    /// Manual status change
    ///
    /// Setting the status an order already has is a no-op and writes no log.
    pub fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
        actor: &Actor,
        note: Option<&str>,
    ) -> OrderResult<Order> {
        let suffix = note
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| format!(" ({})", n))
            .unwrap_or_default();
        self.transition(id, status, actor, OrderLogAction::StatusChanged, false, |old, new| {
            format!("Status changed: {} -> {}{}", old, new, suffix)
        })
    }

    /// Apply the same status to many orders
    ///
    /// Each order is handled on its own; a failure is reported in its result
    /// row and never stops the others.
    pub fn bulk_update_status(
        &self,
        ids: &[String],
        status: OrderStatus,
        actor: &Actor,
    ) -> BulkStatusResult {
        let results: Vec<BulkItemResult> = ids
            .iter()
            .map(|id| match self.update_status(id, status, actor, None) {
                Ok(_) => BulkItemResult {
                    order_id: id.clone(),
                    success: true,
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(order_id = %id, error = %e, "Bulk status update failed for order");
                    BulkItemResult {
                        order_id: id.clone(),
                        success: false,
                        error: Some(e.to_string()),
                    }
                }
            })
            .collect();

        let updated = results.iter().filter(|r| r.success).count();
        tracing::info!(
            status = %status,
            updated,
            failed = results.len() - updated,
            "Bulk status update"
        );
        BulkStatusResult {
            updated,
            failed: results.len() - updated,
            results,
        }
    }

    /// Record a call-center outcome and move the order accordingly
    ///
    /// Every call is logged, even when the status does not change.
    pub fn apply_call_outcome(
        &self,
        id: &str,
        outcome: CallOutcome,
        actor: &Actor,
        note: Option<&str>,
    ) -> OrderResult<Order> {
        let suffix = note
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| format!(": {}", n))
            .unwrap_or_default();
        let label = serde_json::to_value(outcome)
            .ok()
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_else(|| format!("{:?}", outcome));
        self.transition(
            id,
            outcome.target_status(),
            actor,
            OrderLogAction::CallOutcome,
            true,
            |old, new| format!("Call outcome {} ({} -> {}){}", label, old, new, suffix),
        )
    }

    /// Hand the order to a carrier
    ///
    /// Always ends in KARGODA, whatever the previous status.
    pub fn create_shipment(
        &self,
        id: &str,
        tracking_code: &str,
        carrier: Option<&str>,
        actor: &Actor,
    ) -> OrderResult<Order> {
        let tracking_code = tracking_code.trim();
        if tracking_code.is_empty() {
            return Err(OrderError::Validation("tracking_code must not be empty".into()));
        }
        if tracking_code.len() > MAX_TRACKING_CODE_LEN {
            return Err(OrderError::Validation(format!(
                "tracking_code is too long (max {MAX_TRACKING_CODE_LEN})"
            )));
        }
        let carrier = carrier
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| format!(" via {}", c))
            .unwrap_or_default();

        let mut previous = OrderStatus::Kargoda;
        let order = self.orders.update(id, &mut |order: &mut Order| {
            previous = order.status;
            order.status = OrderStatus::Kargoda;
            order.tracking_code = Some(tracking_code.to_string());
            Ok(Some(new_log(
                &order.id,
                actor,
                OrderLogAction::Shipment,
                format!(
                    "Shipment created{}: {} ({} -> {})",
                    carrier,
                    tracking_code,
                    previous,
                    OrderStatus::Kargoda
                ),
            )))
        })?;

        tracing::info!(
            order_id = %order.id,
            from = %previous,
            tracking_code = %tracking_code,
            "Order shipped"
        );
        sync_order_stock(&self.ledger, &order, actor)?;
        Ok(order)
    }

    /// Free-text note; status untouched
    pub fn add_note(&self, id: &str, actor: &Actor, message: &str) -> OrderResult<OrderLog> {
        let message = message.trim();
        if message.is_empty() {
            return Err(OrderError::Validation("message must not be empty".into()));
        }
        if message.chars().count() > MAX_NOTE_LEN {
            return Err(OrderError::Validation(format!(
                "message is too long (max {MAX_NOTE_LEN})"
            )));
        }

        let log = new_log(id, actor, OrderLogAction::Note, message);
        let stored = log.clone();
        let mut pending = Some(log);
        self.orders.update(id, &mut |_: &mut Order| Ok(pending.take()))?;
        Ok(stored)
    }

    fn transition(
        &self,
        id: &str,
        status: OrderStatus,
        actor: &Actor,
        action: OrderLogAction,
        log_unchanged: bool,
        describe: impl Fn(OrderStatus, OrderStatus) -> String,
    ) -> OrderResult<Order> {
        let mut previous = None;
        let order = self.orders.update(id, &mut |order: &mut Order| {
            let old = order.status;
            if old == status {
                return Ok(log_unchanged
                    .then(|| new_log(&order.id, actor, action, describe(old, status))));
            }
            if old.is_terminal() {
                tracing::warn!(order_id = %order.id, from = %old, to = %status, "Order leaving terminal state");
            }
            order.status = status;
            previous = Some(old);
            Ok(Some(new_log(&order.id, actor, action, describe(old, status))))
        })?;

        if let Some(old) = previous {
            tracing::info!(order_id = %order.id, from = %old, to = %status, actor = %actor.name, "Order status changed");
            sync_order_stock(&self.ledger, &order, actor)?;
        }
        Ok(order)
    }
}

/// Post whatever stock movements an order's current status calls for
pub(crate) fn sync_order_stock(
    ledger: &StockLedger,
    order: &Order,
    actor: &Actor,
) -> OrderResult<()> {
    let movement_type = match order.status {
        OrderStatus::Iptal => StockMovementType::Cancel,
        OrderStatus::Iade => StockMovementType::Return,
        OrderStatus::Onaylandi | OrderStatus::Kargoda | OrderStatus::TeslimEdildi => {
            StockMovementType::Out
        }
        _ => return Ok(()),
    };

    let movements = order
        .items
        .iter()
        .filter_map(|item| {
            item.variant_id.as_ref().map(|variant_id| NewMovement {
                product_id: item.product_id.clone(),
                variant_id: variant_id.clone(),
                quantity: item.quantity,
                movement_type,
                note: format!("Order {} {}", order.order_number, order.status),
                user_id: actor.id.clone(),
                order_id: Some(order.id.clone()),
            })
        })
        .collect();

    let posted = match movement_type {
        StockMovementType::Out => ledger.post_rededuction(&order.id, movements),
        _ => ledger.post_reversal_once(&order.id, movements),
    }
    .inspect_err(|e| {
        tracing::error!(order_id = %order.id, error = %e, "Failed to adjust order stock");
    })?;

    if !posted.is_empty() {
        tracing::info!(
            order_id = %order.id,
            status = %order.status,
            movements = posted.len(),
            "Order stock adjusted"
        );
    }
    Ok(())
}
