//! Order Intake - admission gate for public checkout submissions
//!
//! # Flow
//!
//! ```text
//! submit(request)
//!     ├─ 1. Rate limit          → RATE_LIMIT event (MEDIUM), reject
//!     ├─ 2. Blacklist           → BLACKLIST_BLOCK event (HIGH), reject
//!     ├─ 3. Fraud score         → FAKE_ORDER_ATTEMPT event (CRITICAL), reject
//!     │                           score > 90: blacklist the IP as well
//!     ├─ 4. Validate payload, resolve product / price tier / variant
//!     ├─ 5. Prepare OUT stock movement (validated, not posted)
//!     ├─ 6. Insert order (NEW, UNPAID) + "Order created via landing page"
//!     └─ 7. Commit OUT movement (cannot fail) inside the insert, so the
//!           order and its movement become visible together
//! ```
//!
//! Steps run in order and stop at the first rejection, so a blocked request
//! never creates an order or moves stock. The three security rejections look
//! identical to the caller.

use super::error::OrderError;
use super::new_log;
use super::number::OrderNumberGenerator;
use super::repository::OrderRepository;
use crate::catalog::{CatalogService, VariantLookupError, resolve_variant};
use crate::payment::PaymentService;
use crate::security::fraud::{self, FraudCandidate, VELOCITY_WINDOW_MS};
use crate::security::{BlacklistStore, RateLimiter, SecurityEventLog};
use crate::stock::{NewMovement, StockError, StockLedger};
use crate::utils::validation::{ValidationError, validate_order_request};
use serde_json::json;
use shared::models::{
    Actor, CustomerInfo, Order, OrderItem, OrderLogAction, OrderRequest, OrderStatus,
    PaymentMethod, PaymentStatus, RiskLevel, SecurityEventType, StockMovementType,
};
use shared::util::{new_id, now_millis};
use std::sync::Arc;
use thiserror::Error;

/// Reason recorded on automatic blacklist entries
pub const AUTO_BLOCK_REASON: &str = "Auto-blocked: Critical Fraud Detected";

/// Actor recorded on automatic blacklist entries
pub const AUTO_BLOCK_ACTOR: &str = "System AI";

pub const ORDER_CREATED_MESSAGE: &str = "Order created via landing page";

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("IP is blacklisted")]
    Blacklisted,

    #[error("Fraud check failed (score {score})")]
    FraudRejected { score: u32 },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Card details are required for CREDIT_CARD payments")]
    CardRequired,

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Price not found: {0}")]
    PriceNotFound(String),

    #[error("Variant not found: {0}")]
    VariantNotFound(String),

    #[error("Product {0} has several variants; one must be selected")]
    VariantRequired(String),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Stock(#[from] StockError),
}

impl IntakeError {
    /// Security rejections share one outward error
    pub fn is_security_rejection(&self) -> bool {
        matches!(
            self,
            IntakeError::RateLimited | IntakeError::Blacklisted | IntakeError::FraudRejected { .. }
        )
    }
}

pub type IntakeResult<T> = Result<T, IntakeError>;

/// Order intake orchestrator
///
/// Stores are injected behind their traits so a node-shared limiter or a
/// persistent repository can replace the in-memory ones.
#[derive(Clone)]
pub struct OrderIntake {
    rate_limiter: Arc<dyn RateLimiter>,
    blacklist: Arc<dyn BlacklistStore>,
    orders: Arc<dyn OrderRepository>,
    events: Arc<SecurityEventLog>,
    ledger: Arc<StockLedger>,
    catalog: Arc<CatalogService>,
    numbers: Arc<OrderNumberGenerator>,
    payments: PaymentService,
}

impl OrderIntake {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        rate_limiter: Arc<dyn RateLimiter>,
        blacklist: Arc<dyn BlacklistStore>,
        orders: Arc<dyn OrderRepository>,
        events: Arc<SecurityEventLog>,
        ledger: Arc<StockLedger>,
        catalog: Arc<CatalogService>,
        numbers: Arc<OrderNumberGenerator>,
        payments: PaymentService,
    ) -> Self {
        Self {
            rate_limiter,
            blacklist,
            orders,
            events,
            ledger,
            catalog,
            numbers,
            payments,
        }
    }

    /// Run the admission gate and create the order
    pub fn submit(&self, req: &OrderRequest) -> IntakeResult<Order> {
        let ip = req.ip_address.as_str();

        // 1. Rate limit
        if !self.rate_limiter.allow(ip) {
            self.events.record(
                SecurityEventType::RateLimit,
                ip,
                "Rate limit exceeded on checkout",
                RiskLevel::Medium,
                None,
            );
            tracing::warn!(ip, "Checkout rejected: rate limited");
            return Err(IntakeError::RateLimited);
        }

        // 2. Blacklist
        if self.blacklist.is_blocked(ip) {
            self.events.record(
                SecurityEventType::BlacklistBlock,
                ip,
                "Checkout attempt from blacklisted IP",
                RiskLevel::High,
                None,
            );
            tracing::warn!(ip, "Checkout rejected: blacklisted");
            return Err(IntakeError::Blacklisted);
        }

        // 3. Fraud score
        let now = now_millis();
        let recent = self.orders.recent_since(now - VELOCITY_WINDOW_MS);
        let signal = fraud::score(
            FraudCandidate {
                name: &req.name,
                phone: &req.phone,
                ip,
            },
            &recent,
            now,
        );
        if signal.is_fake() {
            self.events.record(
                SecurityEventType::FakeOrderAttempt,
                ip,
                format!("Fake order attempt (score {})", signal.score),
                RiskLevel::Critical,
                Some(json!({
                    "reasons": signal.reasons,
                    "score": signal.score,
                    "form_data": {
                        "name": req.name,
                        "phone": req.phone,
                        "address": req.address,
                        "city": req.city,
                        "district": req.district,
                        "product_id": req.product_id,
                        "price_id": req.price_id,
                    },
                })),
            );
            if signal.is_critical() {
                self.auto_block(ip, signal.score);
            }
            tracing::warn!(ip, score = signal.score, reasons = ?signal.reasons, "Checkout rejected: fraud");
            return Err(IntakeError::FraudRejected {
                score: signal.score,
            });
        }

        // 4. Payload and catalog
        validate_order_request(req)?;
        if req.payment_method == PaymentMethod::CreditCard && req.card.is_none() {
            return Err(IntakeError::CardRequired);
        }
        let product = self
            .catalog
            .product(&req.product_id)
            .ok_or_else(|| IntakeError::ProductNotFound(req.product_id.clone()))?;
        let tier = product
            .price_tier(&req.price_id)
            .ok_or_else(|| IntakeError::PriceNotFound(req.price_id.clone()))?;
        let variant =
            resolve_variant(product, req.variant_selection.as_deref()).map_err(|e| match e {
                VariantLookupError::NotFound(sel) => IntakeError::VariantNotFound(sel),
                VariantLookupError::Required => IntakeError::VariantRequired(product.id.clone()),
            })?;

        let order_id = new_id();
        let order_number = self.numbers.next_number();

        // 5. Stock movement is validated before anything is stored
        let movement = self.ledger.prepare(NewMovement {
            product_id: product.id.clone(),
            variant_id: variant.variant_id.clone(),
            quantity: tier.quantity,
            movement_type: StockMovementType::Out,
            note: format!("Order {}", order_number),
            user_id: Actor::system().id,
            order_id: Some(order_id.clone()),
        })?;

        // 6. Order
        let order = Order {
            id: order_id,
            order_number,
            customer: CustomerInfo {
                name: req.name.trim().to_string(),
                phone: req.phone.trim().to_string(),
                address: req.address.trim().to_string(),
                city: req.city.trim().to_string(),
                district: req.district.trim().to_string(),
            },
            items: vec![OrderItem {
                product_id: product.id.clone(),
                variant_id: Some(variant.variant_id),
                quantity: tier.quantity,
                unit_price: tier.unit_price(),
                total_price: tier.price,
                variant_selection: variant.selection,
            }],
            status: OrderStatus::New,
            total_amount: tier.price,
            payment_method: req.payment_method,
            payment_status: PaymentStatus::Unpaid,
            ip_address: ip.to_string(),
            user_agent: req.user_agent.clone(),
            referrer: req.referrer.clone(),
            created_at: now,
            dealer_id: req.dealer_id.clone(),
            tracking_code: None,
            transaction_id: None,
        };
        let log = new_log(
            &order.id,
            &Actor::system(),
            OrderLogAction::Created,
            ORDER_CREATED_MESSAGE,
        );
        // 7. Stock, committed before the order becomes readable
        let mut pending = Some(movement);
        let order = self.orders.insert_with(order, log, &mut |_: &Order| {
            if let Some(movement) = pending.take() {
                self.ledger.commit(movement);
            }
        })?;

        tracing::info!(
            order_id = %order.id,
            order_number = %order.order_number,
            total = %order.total_amount,
            ip,
            "Order created"
        );
        Ok(order)
    }

    /// Full checkout: gate, create, then charge credit-card orders
    ///
    /// A declined card does not undo the order; it comes back with
    /// payment status FAILED.
    pub async fn checkout(&self, req: OrderRequest) -> IntakeResult<Order> {
        let order = self.submit(&req)?;
        match (order.payment_method, req.card.as_ref()) {
            (PaymentMethod::CreditCard, Some(card)) => Ok(self
                .payments
                .pay(&order.id, card, &Actor::system())
                .await?),
            _ => Ok(order),
        }
    }

    fn auto_block(&self, ip: &str, score: u32) {
        match self.blacklist.add(ip, AUTO_BLOCK_REASON, AUTO_BLOCK_ACTOR) {
            Ok(entry) => {
                self.events.record(
                    SecurityEventType::AutoBlacklist,
                    ip,
                    format!("IP auto-blacklisted (score {})", score),
                    RiskLevel::Critical,
                    Some(json!({ "blacklist_entry_id": entry.id, "score": score })),
                );
            }
            Err(e) => {
                tracing::error!(ip, error = %e, "Failed to auto-blacklist IP");
            }
        }
    }
}
