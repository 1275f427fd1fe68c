//! Payment provider seam
//!
//! The gateway itself is external; only `charge` is modelled.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::CardDetails;
use thiserror::Error;

/// Provider answer to a charge attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargeResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChargeResult {
    pub fn approved(transaction_id: impl Into<String>) -> Self {
        Self {
            success: true,
            transaction_id: Some(transaction_id.into()),
            error: None,
        }
    }

    pub fn declined(error: impl Into<String>) -> Self {
        Self {
            success: false,
            transaction_id: None,
            error: Some(error.into()),
        }
    }
}

/// Transport-level failure talking to the provider
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment provider unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn charge(
        &self,
        order_id: &str,
        amount: Decimal,
        card: &CardDetails,
    ) -> Result<ChargeResult, PaymentError>;
}

/// Card number that the mock provider always declines
pub const MOCK_DECLINED_CARD: &str = "4000000000000002";

/// Offline provider for development and tests
///
/// Approves any Luhn-valid card except [`MOCK_DECLINED_CARD`].
#[derive(Debug, Default)]
pub struct MockPaymentProvider;

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn charge(
        &self,
        order_id: &str,
        amount: Decimal,
        card: &CardDetails,
    ) -> Result<ChargeResult, PaymentError> {
        let number: String = card.number.chars().filter(|c| !c.is_whitespace()).collect();
        let result = if number == MOCK_DECLINED_CARD {
            ChargeResult::declined("Card declined")
        } else if !luhn_valid(&number) {
            ChargeResult::declined("Invalid card number")
        } else if amount <= Decimal::ZERO {
            ChargeResult::declined("Invalid amount")
        } else {
            ChargeResult::approved(format!("MOCK-{}", uuid::Uuid::new_v4().simple()))
        };
        tracing::debug!(order_id, success = result.success, "Mock charge");
        Ok(result)
    }
}

fn luhn_valid(number: &str) -> bool {
    if number.len() < 12 || !number.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let sum: u32 = number
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(number: &str) -> CardDetails {
        CardDetails {
            holder_name: "Ayşe Yılmaz".to_string(),
            number: number.to_string(),
            expiry_month: 12,
            expiry_year: 2030,
            cvc: "123".to_string(),
        }
    }

    #[test]
    fn test_luhn() {
        assert!(luhn_valid("4111111111111111"));
        assert!(luhn_valid("5555555555554444"));
        assert!(!luhn_valid("4111111111111112"));
        assert!(!luhn_valid("41111"));
    }

    #[tokio::test]
    async fn test_mock_approves_valid_card() {
        let result = MockPaymentProvider
            .charge("o-1", Decimal::new(49900, 2), &card("4111 1111 1111 1111"))
            .await
            .unwrap();
        assert!(result.success);
        assert!(result.transaction_id.unwrap().starts_with("MOCK-"));
    }

    #[tokio::test]
    async fn test_mock_declines() {
        let result = MockPaymentProvider
            .charge("o-1", Decimal::new(49900, 2), &card(MOCK_DECLINED_CARD))
            .await
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Card declined"));

        let result = MockPaymentProvider
            .charge("o-1", Decimal::new(49900, 2), &card("1234"))
            .await
            .unwrap();
        assert!(!result.success);
    }
}
