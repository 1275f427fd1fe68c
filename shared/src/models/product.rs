//! Product Model
//!
//! Read-only catalog view used by the intake gate to resolve a checkout
//! submission into a priced order line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub prices: Vec<PriceTier>,
}

impl Product {
    pub fn variant(&self, variant_id: &str) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    pub fn price_tier(&self, price_id: &str) -> Option<&PriceTier> {
        self.prices.iter().find(|p| p.id == price_id)
    }
}

/// Sellable variant (colour, size, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductVariant {
    pub id: String,
    pub name: String,
    /// Opening stock, seeded as an IN movement at startup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_stock: Option<i64>,
}

/// Quantity bundle offered on the landing page, e.g. "2 Adet 499 TL"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceTier {
    pub id: String,
    pub label: String,
    /// Units shipped for this tier
    pub quantity: i64,
    /// Bundle price (the whole tier, not per unit)
    pub price: Decimal,
}

impl PriceTier {
    /// Per-unit price, rounded to 2 decimal places
    pub fn unit_price(&self) -> Decimal {
        if self.quantity <= 0 {
            return self.price;
        }
        (self.price / Decimal::from(self.quantity)).round_dp(2)
    }
}

/// Catalog file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub products: Vec<Product>,
}
