//! Catalog Service
//!
//! Read-only product lookup used by order intake. Loaded once at startup from
//! a JSON file; catalog editing happens elsewhere.

use crate::stock::{NewMovement, StockLedger, StockResult};
use shared::models::{CatalogFile, Product, ProductVariant, StockMovementType};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

/// Variant chosen for an order line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVariant {
    /// Ledger key. Products without variants are tracked under their own id.
    pub variant_id: String,
    /// Display name as stored on the order
    pub selection: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantLookupError {
    /// Selection matches no variant of the product
    NotFound(String),
    /// Several variants exist and none was selected
    Required,
}

#[derive(Debug, Default)]
pub struct CatalogService {
    products: HashMap<String, Product>,
}

impl CatalogService {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut map = HashMap::with_capacity(products.len());
        for product in products {
            validate_product(&product)?;
            if map.contains_key(&product.id) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
            map.insert(product.id.clone(), product);
        }
        Ok(Self { products: map })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let file: CatalogFile = serde_json::from_str(&raw)?;
        let catalog = Self::new(file.products)?;
        tracing::info!(
            path = %path.as_ref().display(),
            products = catalog.products.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Post opening stock as IN movements; returns how many were posted
    pub fn seed_stock(&self, ledger: &StockLedger) -> StockResult<usize> {
        let mut posted = 0;
        for product in self.products.values() {
            for variant in &product.variants {
                let Some(quantity) = variant.initial_stock.filter(|q| *q > 0) else {
                    continue;
                };
                ledger.post(NewMovement {
                    product_id: product.id.clone(),
                    variant_id: variant.id.clone(),
                    quantity,
                    movement_type: StockMovementType::In,
                    note: "Opening stock".to_string(),
                    user_id: "system".to_string(),
                    order_id: None,
                })?;
                posted += 1;
            }
        }
        Ok(posted)
    }
}

/// Resolve the variant an order line ships from
///
/// The selection may be a variant id or a variant name (case-insensitive).
/// Without a selection the sole variant is used; a product with no variants
/// is its own stock unit.
pub fn resolve_variant(
    product: &Product,
    selection: Option<&str>,
) -> Result<ResolvedVariant, VariantLookupError> {
    let selection = selection.map(str::trim).filter(|s| !s.is_empty());

    let resolved = |v: &ProductVariant| ResolvedVariant {
        variant_id: v.id.clone(),
        selection: Some(v.name.clone()),
    };

    match (selection, product.variants.as_slice()) {
        (Some(sel), variants) => variants
            .iter()
            .find(|v| v.id == sel)
            .or_else(|| {
                let lowered = sel.to_lowercase();
                variants.iter().find(|v| v.name.to_lowercase() == lowered)
            })
            .map(resolved)
            .ok_or_else(|| VariantLookupError::NotFound(sel.to_string())),
        (None, []) => Ok(ResolvedVariant {
            variant_id: product.id.clone(),
            selection: None,
        }),
        (None, [only]) => Ok(resolved(only)),
        (None, _) => Err(VariantLookupError::Required),
    }
}

fn validate_product(product: &Product) -> Result<(), CatalogError> {
    if product.id.trim().is_empty() {
        return Err(CatalogError::Invalid("product id must not be empty".into()));
    }
    let mut variant_ids = HashSet::new();
    for variant in &product.variants {
        if !variant_ids.insert(variant.id.as_str()) {
            return Err(CatalogError::Invalid(format!(
                "duplicate variant id {} in product {}",
                variant.id, product.id
            )));
        }
    }
    let mut tier_ids = HashSet::new();
    for tier in &product.prices {
        if !tier_ids.insert(tier.id.as_str()) {
            return Err(CatalogError::Invalid(format!(
                "duplicate price id {} in product {}",
                tier.id, product.id
            )));
        }
        if tier.quantity <= 0 {
            return Err(CatalogError::Invalid(format!(
                "price {} of product {} must have a positive quantity",
                tier.id, product.id
            )));
        }
        if tier.price.is_sign_negative() {
            return Err(CatalogError::Invalid(format!(
                "price {} of product {} must not be negative",
                tier.id, product.id
            )));
        }
    }
    Ok(())
}
