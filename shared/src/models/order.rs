//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// ```text
/// NEW ─┬─ ARANACAK (to call)
///      ├─ ULASILAMADI (unreachable)
///      ├─ YANLIS_NUMARA (wrong number)
///      ├─ ONAYLANDI (confirmed) ── KARGODA (shipped) ─┬─ TESLIM_EDILDI (delivered)
///      └─ IPTAL (cancelled)                           └─ IADE (returned)
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    New,
    Aranacak,
    Ulasilamadi,
    YanlisNumara,
    Onaylandi,
    Iptal,
    Kargoda,
    TeslimEdildi,
    Iade,
}

impl OrderStatus {
    /// Wire name, identical to the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::Aranacak => "ARANACAK",
            OrderStatus::Ulasilamadi => "ULASILAMADI",
            OrderStatus::YanlisNumara => "YANLIS_NUMARA",
            OrderStatus::Onaylandi => "ONAYLANDI",
            OrderStatus::Iptal => "IPTAL",
            OrderStatus::Kargoda => "KARGODA",
            OrderStatus::TeslimEdildi => "TESLIM_EDILDI",
            OrderStatus::Iade => "IADE",
        }
    }

    /// No automated transition leaves these states.
    ///
    /// Operators may still force a change; this is advisory only.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::TeslimEdildi
                | OrderStatus::Iade
                | OrderStatus::Iptal
                | OrderStatus::YanlisNumara
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment method chosen at checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Cash to the courier
    #[default]
    CashOnDelivery,
    /// Card terminal at the door
    CardOnDelivery,
    /// Online card payment through the payment provider
    CreditCard,
}

/// Payment state of an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
    Failed,
}

/// Call-center call result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallOutcome {
    ReachedConfirmed,
    ReachedCancelled,
    Unreachable,
    WrongNumber,
    Busy,
}

impl CallOutcome {
    /// Status an order moves to after this call outcome
    pub fn target_status(&self) -> OrderStatus {
        match self {
            CallOutcome::ReachedConfirmed => OrderStatus::Onaylandi,
            CallOutcome::ReachedCancelled => OrderStatus::Iptal,
            CallOutcome::Unreachable => OrderStatus::Ulasilamadi,
            CallOutcome::WrongNumber => OrderStatus::YanlisNumara,
            CallOutcome::Busy => OrderStatus::Aranacak,
        }
    }
}

/// Customer snapshot captured at checkout (immutable after creation)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub district: String,
}

/// Order line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub product_id: String,
    /// Resolved variant (None only for products without variants)
    pub variant_id: Option<String>,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    /// Free-text variant selection as submitted (e.g. "Kırmızı / XL")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_selection: Option<String>,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    /// Human-legible unique number, e.g. `ORD2026101910001`
    pub order_number: String,
    pub customer: CustomerInfo,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub ip_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    /// Unix millis
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dealer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

/// What an order log entry records
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderLogAction {
    Created,
    StatusChanged,
    CallOutcome,
    Shipment,
    Payment,
    Note,
}

/// Append-only per-order audit entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLog {
    pub id: String,
    pub order_id: String,
    pub user_id: String,
    pub user_name: String,
    pub action: OrderLogAction,
    pub message: String,
    /// Unix millis
    pub created_at: i64,
}

/// Who performed an order action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub name: String,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The automated actor used for gate-created orders and auto blocks
    pub fn system() -> Self {
        Self::new("system", "System")
    }
}

/// Card payload for online payment (never stored on the order)
#[derive(Clone, Serialize, Deserialize)]
pub struct CardDetails {
    pub holder_name: String,
    pub number: String,
    pub expiry_month: u8,
    pub expiry_year: u16,
    pub cvc: String,
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let last4: String = self
            .number
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        f.debug_struct("CardDetails")
            .field("holder_name", &self.holder_name)
            .field("number", &format_args!("****{}", last4))
            .finish_non_exhaustive()
    }
}

/// Public checkout submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub product_id: String,
    pub price_id: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub district: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Variant ID chosen on the landing page
    #[serde(default)]
    pub variant_selection: Option<String>,
    /// Filled in by the HTTP layer from the connection, never trusted from the body
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub referrer: Option<String>,
    #[serde(default)]
    pub dealer_id: Option<String>,
    #[serde(default, skip_serializing)]
    pub card: Option<CardDetails>,
}

/// Manual status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
    #[serde(default)]
    pub note: Option<String>,
}

/// Bulk status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkStatusUpdate {
    pub order_ids: Vec<String>,
    pub status: OrderStatus,
}

/// Per-order outcome of a bulk operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkItemResult {
    pub order_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Bulk operation summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkStatusResult {
    pub updated: usize,
    pub failed: usize,
    pub results: Vec<BulkItemResult>,
}

/// Call-center outcome payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallOutcomeRequest {
    pub outcome: CallOutcome,
    #[serde(default)]
    pub note: Option<String>,
}

/// Shipment creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentCreate {
    pub tracking_code: String,
    #[serde(default)]
    pub carrier: Option<String>,
}

/// Manual note payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderNoteCreate {
    pub message: String,
}
