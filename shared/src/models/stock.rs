//! Stock Movement Model

use serde::{Deserialize, Serialize};

/// Stock movement type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockMovementType {
    /// Goods received
    In,
    /// Goods leaving for an order
    Out,
    /// Goods coming back after delivery
    Return,
    /// Reservation released by a cancelled order
    Cancel,
}

impl StockMovementType {
    /// Sign applied to the movement quantity (+1 or -1)
    pub fn sign(&self) -> i64 {
        match self {
            StockMovementType::Out => -1,
            StockMovementType::In | StockMovementType::Return | StockMovementType::Cancel => 1,
        }
    }
}

/// Append-only stock ledger entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockMovement {
    pub id: String,
    pub product_id: String,
    pub variant_id: String,
    /// Always positive; direction comes from `movement_type`
    pub quantity: i64,
    pub movement_type: StockMovementType,
    pub note: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Unix millis
    pub created_at: i64,
}

impl StockMovement {
    pub fn signed_quantity(&self) -> i64 {
        self.movement_type.sign() * self.quantity
    }
}

/// Manual movement payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovementCreate {
    pub product_id: String,
    pub variant_id: String,
    pub quantity: i64,
    pub movement_type: StockMovementType,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Current stock of a variant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockLevel {
    pub variant_id: String,
    /// May be negative (oversell)
    pub quantity: i64,
}
