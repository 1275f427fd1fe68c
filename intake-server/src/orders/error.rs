//! Order errors

use crate::stock::StockError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Order already exists: {0}")]
    AlreadyExists(String),

    #[error("Order already paid: {0}")]
    AlreadyPaid(String),

    #[error("Order {0} is not a credit card order")]
    PaymentNotApplicable(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Stock error: {0}")]
    Stock(#[from] StockError),
}

pub type OrderResult<T> = Result<T, OrderError>;
