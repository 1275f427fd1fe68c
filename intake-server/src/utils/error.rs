//! 统一错误处理
//!
//! 领域错误 (`IntakeError`, `OrderError`, `StockError`, `BlacklistError`,
//! `PaymentError`)
//! 到 [`AppError`] 的转换。所有安全拒绝 (限流、黑名单、欺诈) 对调用方
//! 完全相同：同一错误码、同一消息、同一 HTTP 状态。

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::catalog::CatalogError;
use crate::orders::{IntakeError, OrderError};
use crate::payment::PaymentError;
use crate::security::BlacklistError;
use crate::stock::StockError;

impl From<IntakeError> for AppError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::RateLimited
            | IntakeError::Blacklisted
            | IntakeError::FraudRejected { .. } => AppError::verification_failed(),
            IntakeError::Validation(e) => AppError::validation(e.0),
            IntakeError::CardRequired => AppError::new(ErrorCode::PaymentCardRequired),
            IntakeError::ProductNotFound(id) => {
                AppError::with_message(ErrorCode::ProductNotFound, format!("Product {} not found", id))
            }
            IntakeError::PriceNotFound(id) => AppError::with_message(
                ErrorCode::PriceTierNotFound,
                format!("Price {} not found", id),
            ),
            IntakeError::VariantNotFound(sel) => AppError::with_message(
                ErrorCode::VariantNotFound,
                format!("Variant {} not found", sel),
            )
            .with_detail("variant_selection", sel),
            IntakeError::VariantRequired(product_id) => {
                AppError::new(ErrorCode::VariantRequired).with_detail("product_id", product_id)
            }
            IntakeError::Order(e) => e.into(),
            IntakeError::Stock(e) => e.into(),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
                    .with_detail("id", id)
            }
            OrderError::AlreadyExists(id) => AppError::already_exists(format!("Order {}", id)),
            OrderError::AlreadyPaid(id) => AppError::new(ErrorCode::OrderAlreadyPaid).with_detail("id", id),
            OrderError::PaymentNotApplicable(id) => {
                AppError::new(ErrorCode::PaymentInvalidMethod).with_detail("id", id)
            }
            OrderError::Validation(msg) => AppError::validation(msg),
            OrderError::Stock(e) => e.into(),
        }
    }
}

impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        AppError::with_message(ErrorCode::StockMovementInvalid, err.to_string())
    }
}

impl From<BlacklistError> for AppError {
    fn from(err: BlacklistError) -> Self {
        match err {
            BlacklistError::NotFound(id) => AppError::with_message(
                ErrorCode::BlacklistEntryNotFound,
                format!("Blacklist entry {} not found", id),
            ),
            BlacklistError::Invalid(msg) => AppError::validation(msg),
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        AppError::with_message(ErrorCode::PaymentFailed, err.to_string())
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::with_message(ErrorCode::ConfigError, err.to_string())
    }
}
