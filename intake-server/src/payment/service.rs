//! Online payment for credit-card orders
//!
//! One charge attempt writes exactly one order log entry, approved or not.
//! Approval marks the order PAID and confirms it if it is still NEW; a
//! decline marks it FAILED and leaves the status alone. Confirmation takes
//! the order's stock out again if it had been given back.

use super::provider::{ChargeResult, PaymentProvider};
use crate::orders::lifecycle::sync_order_stock;
use crate::orders::{OrderError, OrderRepository, OrderResult, new_log};
use crate::stock::StockLedger;
use crate::utils::validation::validate_card;
use shared::models::{
    Actor, CardDetails, Order, OrderLogAction, OrderStatus, PaymentMethod, PaymentStatus,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct PaymentService {
    provider: Arc<dyn PaymentProvider>,
    orders: Arc<dyn OrderRepository>,
    ledger: Arc<StockLedger>,
}

impl PaymentService {
    pub fn new(
        provider: Arc<dyn PaymentProvider>,
        orders: Arc<dyn OrderRepository>,
        ledger: Arc<StockLedger>,
    ) -> Self {
        Self {
            provider,
            orders,
            ledger,
        }
    }

    pub async fn pay(&self, order_id: &str, card: &CardDetails, actor: &Actor) -> OrderResult<Order> {
        let order = self
            .orders
            .get(order_id)
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;
        if order.payment_method != PaymentMethod::CreditCard {
            return Err(OrderError::PaymentNotApplicable(order.id));
        }
        if order.payment_status == PaymentStatus::Paid {
            return Err(OrderError::AlreadyPaid(order.id));
        }
        validate_card(card).map_err(|e| OrderError::Validation(e.to_string()))?;

        let result = match self
            .provider
            .charge(&order.id, order.total_amount, card)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(order_id = %order.id, error = %e, "Payment provider error");
                ChargeResult::declined(e.to_string())
            }
        };

        let mut confirmed = false;
        let updated = self.orders.update(&order.id, &mut |order: &mut Order| {
            if order.payment_status == PaymentStatus::Paid {
                return Err(OrderError::AlreadyPaid(order.id.clone()));
            }
            let message = if result.success {
                order.payment_status = PaymentStatus::Paid;
                order.transaction_id = result.transaction_id.clone();
                if order.status == OrderStatus::New {
                    order.status = OrderStatus::Onaylandi;
                    confirmed = true;
                }
                format!(
                    "Payment approved: {} {}",
                    order.total_amount,
                    result.transaction_id.as_deref().unwrap_or("-")
                )
            } else {
                order.payment_status = PaymentStatus::Failed;
                format!(
                    "Payment failed: {}",
                    result.error.as_deref().unwrap_or("unknown error")
                )
            };
            Ok(Some(new_log(&order.id, actor, OrderLogAction::Payment, message)))
        })?;

        if confirmed {
            sync_order_stock(&self.ledger, &updated, actor)?;
        }
        if result.success {
            tracing::info!(order_id = %updated.id, amount = %updated.total_amount, "Payment approved");
        } else {
            tracing::warn!(order_id = %updated.id, error = ?result.error, "Payment failed");
        }
        Ok(updated)
    }
}
