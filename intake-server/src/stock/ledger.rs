//! Stock Ledger
//!
//! Append-only movement log per variant. Current stock is the signed sum of a
//! variant's movements (IN/RETURN/CANCEL add, OUT subtracts); the `levels`
//! map is only a projection updated in the same critical section as the
//! append.
//!
//! Negative stock is never rejected: an oversell shows up as a negative
//! level.
//!
//! # Two-phase posting
//!
//! ```text
//! prepare(new)  -> validates, may fail, touches nothing
//! commit(prep)  -> appends + projects, cannot fail
//! ```
//!
//! Order intake prepares the OUT movement before inserting the order and
//! commits it from inside the insert, so a failed intake leaves neither
//! behind and no reader sees one without the other.

use dashmap::DashMap;
use parking_lot::RwLock;
use shared::models::{StockMovement, StockMovementType};
use shared::util::{new_id, now_millis};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StockError {
    #[error("Movement quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    #[error("Movement requires a variant id")]
    MissingVariant,
}

pub type StockResult<T> = Result<T, StockError>;

/// Movement to be posted
#[derive(Debug, Clone)]
pub struct NewMovement {
    pub product_id: String,
    pub variant_id: String,
    pub quantity: i64,
    pub movement_type: StockMovementType,
    pub note: String,
    pub user_id: String,
    pub order_id: Option<String>,
}

/// A validated movement waiting to be committed
#[derive(Debug)]
#[must_use = "a prepared movement does nothing until committed"]
pub struct PreparedMovement(StockMovement);

impl PreparedMovement {
    pub fn movement(&self) -> &StockMovement {
        &self.0
    }
}

#[derive(Debug, Default)]
struct Inner {
    movements: Vec<StockMovement>,
    /// Orders whose stock is currently given back (CANCEL or RETURN)
    reversed_orders: HashSet<String>,
}

#[derive(Debug, Default)]
pub struct StockLedger {
    inner: RwLock<Inner>,
    /// variant_id -> current level
    levels: DashMap<String, i64>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a movement without posting it
    pub fn prepare(&self, new: NewMovement) -> StockResult<PreparedMovement> {
        if new.quantity <= 0 {
            return Err(StockError::InvalidQuantity(new.quantity));
        }
        if new.variant_id.trim().is_empty() {
            return Err(StockError::MissingVariant);
        }
        Ok(PreparedMovement(StockMovement {
            id: new_id(),
            product_id: new.product_id,
            variant_id: new.variant_id,
            quantity: new.quantity,
            movement_type: new.movement_type,
            note: new.note,
            user_id: new.user_id,
            order_id: new.order_id,
            created_at: now_millis(),
        }))
    }

    /// Append a prepared movement
    pub fn commit(&self, prepared: PreparedMovement) -> StockMovement {
        let mut inner = self.inner.write();
        self.append_locked(&mut inner, prepared.0)
    }

    pub fn post(&self, new: NewMovement) -> StockResult<StockMovement> {
        let prepared = self.prepare(new)?;
        Ok(self.commit(prepared))
    }

    /// Post the stock give-back for an order at most once
    ///
    /// Returns the posted movements, or an empty list if the order was
    /// already reversed. All movements are validated before any is appended.
    pub fn post_reversal_once(
        &self,
        order_id: &str,
        movements: Vec<NewMovement>,
    ) -> StockResult<Vec<StockMovement>> {
        self.post_for_order(movements, |reversed| {
            reversed.insert(order_id.to_string())
        })
    }

    /// Take an order's stock out again after it was given back
    ///
    /// Posts only while the order is marked reversed and clears the mark, so
    /// give-back and re-deduction alternate. Returns an empty list when the
    /// order still holds its stock.
    pub fn post_rededuction(
        &self,
        order_id: &str,
        movements: Vec<NewMovement>,
    ) -> StockResult<Vec<StockMovement>> {
        self.post_for_order(movements, |reversed| reversed.remove(order_id))
    }

    /// Validate everything, then append under one lock if `flip` says so
    fn post_for_order(
        &self,
        movements: Vec<NewMovement>,
        flip: impl FnOnce(&mut HashSet<String>) -> bool,
    ) -> StockResult<Vec<StockMovement>> {
        let prepared = movements
            .into_iter()
            .map(|m| self.prepare(m))
            .collect::<StockResult<Vec<_>>>()?;

        let mut inner = self.inner.write();
        if !flip(&mut inner.reversed_orders) {
            return Ok(Vec::new());
        }
        Ok(prepared
            .into_iter()
            .map(|p| self.append_locked(&mut inner, p.0))
            .collect())
    }

    fn append_locked(&self, inner: &mut Inner, movement: StockMovement) -> StockMovement {
        let level = {
            let mut level = self.levels.entry(movement.variant_id.clone()).or_insert(0);
            *level += movement.signed_quantity();
            *level
        };
        inner.movements.push(movement.clone());

        tracing::info!(
            variant_id = %movement.variant_id,
            movement_type = ?movement.movement_type,
            quantity = movement.quantity,
            level,
            order_id = movement.order_id.as_deref().unwrap_or("-"),
            "Stock movement posted"
        );
        movement
    }

    /// Current level (0 for an unknown variant)
    pub fn stock(&self, variant_id: &str) -> i64 {
        self.levels.get(variant_id).map(|v| *v).unwrap_or(0)
    }

    /// Variant movements, oldest first
    pub fn movements(&self, variant_id: &str) -> Vec<StockMovement> {
        self.inner
            .read()
            .movements
            .iter()
            .filter(|m| m.variant_id == variant_id)
            .cloned()
            .collect()
    }

    pub fn movements_for_order(&self, order_id: &str) -> Vec<StockMovement> {
        self.inner
            .read()
            .movements
            .iter()
            .filter(|m| m.order_id.as_deref() == Some(order_id))
            .cloned()
            .collect()
    }

    /// Level recomputed from the movement log
    pub fn replay(&self, variant_id: &str) -> i64 {
        self.inner
            .read()
            .movements
            .iter()
            .filter(|m| m.variant_id == variant_id)
            .map(StockMovement::signed_quantity)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movement(variant: &str, quantity: i64, movement_type: StockMovementType) -> NewMovement {
        NewMovement {
            product_id: "p-1".to_string(),
            variant_id: variant.to_string(),
            quantity,
            movement_type,
            note: String::new(),
            user_id: "admin".to_string(),
            order_id: None,
        }
    }

    #[test]
    fn test_signed_levels() {
        let ledger = StockLedger::new();
        ledger.post(movement("v-1", 10, StockMovementType::In)).unwrap();
        ledger.post(movement("v-1", 3, StockMovementType::Out)).unwrap();
        ledger.post(movement("v-1", 1, StockMovementType::Return)).unwrap();
        ledger.post(movement("v-1", 2, StockMovementType::Cancel)).unwrap();
        assert_eq!(ledger.stock("v-1"), 10);
        assert_eq!(ledger.stock("v-2"), 0);
    }

    #[test]
    fn test_oversell_goes_negative() {
        let ledger = StockLedger::new();
        ledger.post(movement("v-1", 2, StockMovementType::In)).unwrap();
        ledger.post(movement("v-1", 5, StockMovementType::Out)).unwrap();
        assert_eq!(ledger.stock("v-1"), -3);
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let ledger = StockLedger::new();
        assert_eq!(
            ledger.post(movement("v-1", 0, StockMovementType::In)).unwrap_err(),
            StockError::InvalidQuantity(0)
        );
        assert_eq!(
            ledger.post(movement("v-1", -4, StockMovementType::Out)).unwrap_err(),
            StockError::InvalidQuantity(-4)
        );
        assert!(ledger.movements("v-1").is_empty());
    }

    #[test]
    fn test_prepare_touches_nothing() {
        let ledger = StockLedger::new();
        let prepared = ledger.prepare(movement("v-1", 4, StockMovementType::Out)).unwrap();
        assert_eq!(prepared.movement().quantity, 4);
        assert_eq!(ledger.stock("v-1"), 0);
        assert!(ledger.movements("v-1").is_empty());

        ledger.commit(prepared);
        assert_eq!(ledger.stock("v-1"), -4);
    }

    #[test]
    fn test_replay_matches_projection() {
        let ledger = StockLedger::new();
        let script = [
            (7, StockMovementType::In),
            (2, StockMovementType::Out),
            (9, StockMovementType::Out),
            (1, StockMovementType::Cancel),
            (3, StockMovementType::Return),
            (5, StockMovementType::In),
        ];
        for (qty, kind) in script {
            ledger.post(movement("v-1", qty, kind)).unwrap();
            assert_eq!(ledger.replay("v-1"), ledger.stock("v-1"));
        }
        assert_eq!(ledger.stock("v-1"), 5);
        assert_eq!(ledger.movements("v-1").len(), 6);
    }

    #[test]
    fn test_reversal_posts_once_per_order() {
        let ledger = StockLedger::new();
        let mut cancel = movement("v-1", 2, StockMovementType::Cancel);
        cancel.order_id = Some("o-1".to_string());

        let first = ledger.post_reversal_once("o-1", vec![cancel.clone()]).unwrap();
        assert_eq!(first.len(), 1);
        let second = ledger.post_reversal_once("o-1", vec![cancel]).unwrap();
        assert!(second.is_empty());

        assert_eq!(ledger.stock("v-1"), 2);
        assert_eq!(ledger.movements_for_order("o-1").len(), 1);
    }

    #[test]
    fn test_rededuction_alternates_with_reversal() {
        let ledger = StockLedger::new();
        let for_order = |kind| {
            let mut m = movement("v-1", 2, kind);
            m.order_id = Some("o-1".to_string());
            vec![m]
        };
        ledger.post(movement("v-1", 10, StockMovementType::In)).unwrap();
        ledger.post(for_order(StockMovementType::Out).remove(0)).unwrap();

        // Nothing given back yet
        assert!(
            ledger
                .post_rededuction("o-1", for_order(StockMovementType::Out))
                .unwrap()
                .is_empty()
        );
        assert_eq!(ledger.stock("v-1"), 8);

        ledger
            .post_reversal_once("o-1", for_order(StockMovementType::Cancel))
            .unwrap();
        assert_eq!(ledger.stock("v-1"), 10);

        let posted = ledger
            .post_rededuction("o-1", for_order(StockMovementType::Out))
            .unwrap();
        assert_eq!(posted.len(), 1);
        assert_eq!(ledger.stock("v-1"), 8);
        assert!(
            ledger
                .post_rededuction("o-1", for_order(StockMovementType::Out))
                .unwrap()
                .is_empty()
        );

        // The mark is clear, so a later return posts again
        ledger
            .post_reversal_once("o-1", for_order(StockMovementType::Return))
            .unwrap();
        assert_eq!(ledger.stock("v-1"), 10);
        assert_eq!(ledger.replay("v-1"), 10);
    }
}
