//! Input validation helpers
//!
//! Centralized text length constants and validation functions for checkout
//! submissions and operator actions.

use chrono::Datelike;
use shared::models::{CardDetails, OrderRequest, PaymentMethod};
use thiserror::Error;

// ── Text length limits ──────────────────────────────────────────────

/// Customer names
pub const MAX_NAME_LEN: usize = 200;

/// Phone numbers as typed (spaces, dashes, country prefix)
pub const MAX_PHONE_LEN: usize = 32;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// City, district, ids
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Notes, block reasons
pub const MAX_NOTE_LEN: usize = 500;

/// Carrier tracking codes
pub const MAX_TRACKING_CODE_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

pub type ValidationResult = Result<(), ValidationError>;

/// Validate that a required string is non-blank and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError(format!("{field} must not be empty")));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(ValidationError(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: &Option<String>, field: &str, max_len: usize) -> ValidationResult {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(ValidationError(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        )));
    }
    Ok(())
}

/// Checkout submission: required customer fields, lengths, card shape
///
/// A missing card on a CREDIT_CARD order is not checked here; intake reports
/// it with its own payment error code.
pub fn validate_order_request(req: &OrderRequest) -> ValidationResult {
    validate_required_text(&req.product_id, "product_id", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.price_id, "price_id", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&req.phone, "phone", MAX_PHONE_LEN)?;
    validate_required_text(&req.address, "address", MAX_ADDRESS_LEN)?;
    validate_required_text(&req.city, "city", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.district, "district", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&req.variant_selection, "variant_selection", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&req.dealer_id, "dealer_id", MAX_SHORT_TEXT_LEN)?;

    match (&req.payment_method, &req.card) {
        (PaymentMethod::CreditCard, Some(card)) => validate_card(card),
        _ => Ok(()),
    }
}

/// Card payload shape; whether the card is good is the provider's call
pub fn validate_card(card: &CardDetails) -> ValidationResult {
    validate_required_text(&card.holder_name, "card holder name", MAX_NAME_LEN)?;

    let number: String = card.number.chars().filter(|c| !c.is_whitespace()).collect();
    if !(12..=19).contains(&number.len()) || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError("card number is invalid".into()));
    }
    if !(3..=4).contains(&card.cvc.len()) || !card.cvc.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError("card cvc is invalid".into()));
    }
    if !(1..=12).contains(&card.expiry_month) {
        return Err(ValidationError("card expiry month is invalid".into()));
    }

    let today = chrono::Local::now().date_naive();
    let expiry = (i32::from(card.expiry_year), u32::from(card.expiry_month));
    if expiry < (today.year(), today.month()) {
        return Err(ValidationError("card is expired".into()));
    }
    Ok(())
}
