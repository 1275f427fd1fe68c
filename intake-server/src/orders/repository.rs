//! Order storage
//!
//! Orders and their audit logs live together so a mutation and its log entry
//! are stored under one lock. A new order's side effects (its OUT stock
//! movement) run inside that lock as well, so no reader sees the order
//! without them.

use super::error::{OrderError, OrderResult};
use parking_lot::RwLock;
use shared::models::{Order, OrderLog, OrderStatus};
use std::collections::{HashMap, HashSet};

/// Mutation applied by [`OrderRepository::update`]
///
/// Runs against a working copy. `Ok(Some(log))` stores the copy and appends
/// the log entry, `Ok(None)` stores the copy without a log entry, and `Err`
/// discards the copy.
pub type OrderMutation<'a> = dyn FnMut(&mut Order) -> OrderResult<Option<OrderLog>> + 'a;

/// Hook run by [`OrderRepository::insert_with`] while the new order is being
/// stored. It must not fail.
pub type OrderCommit<'a> = dyn FnMut(&Order) + 'a;

pub trait OrderRepository: Send + Sync {
    /// Store a new order together with its creation log entry
    ///
    /// `on_stored` runs once the order is accepted and before any other
    /// caller can read it. It is not called when the insert is rejected.
    fn insert_with(
        &self,
        order: Order,
        log: OrderLog,
        on_stored: &mut OrderCommit<'_>,
    ) -> OrderResult<Order>;

    fn insert(&self, order: Order, log: OrderLog) -> OrderResult<Order> {
        self.insert_with(order, log, &mut |_: &Order| {})
    }

    fn get(&self, id: &str) -> Option<Order>;

    /// Newest first, optionally filtered by status
    fn list(&self, status: Option<OrderStatus>) -> Vec<Order>;

    /// Orders with `created_at >= cutoff_ms`
    fn recent_since(&self, cutoff_ms: i64) -> Vec<Order>;

    fn update(&self, id: &str, mutation: &mut OrderMutation<'_>) -> OrderResult<Order>;

    /// Log entries of an order, oldest first
    fn logs(&self, order_id: &str) -> OrderResult<Vec<OrderLog>>;
}

#[derive(Debug, Default)]
struct Inner {
    orders: HashMap<String, Order>,
    /// Insertion order
    ids: Vec<String>,
    numbers: HashSet<String>,
    logs: HashMap<String, Vec<OrderLog>>,
}

#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    inner: RwLock<Inner>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn insert_with(
        &self,
        order: Order,
        log: OrderLog,
        on_stored: &mut OrderCommit<'_>,
    ) -> OrderResult<Order> {
        let mut inner = self.inner.write();
        if inner.orders.contains_key(&order.id) {
            return Err(OrderError::AlreadyExists(order.id));
        }
        if inner.numbers.contains(&order.order_number) {
            return Err(OrderError::AlreadyExists(order.order_number));
        }

        inner.numbers.insert(order.order_number.clone());
        inner.ids.push(order.id.clone());
        inner.logs.insert(order.id.clone(), vec![log]);
        inner.orders.insert(order.id.clone(), order.clone());
        on_stored(&order);
        Ok(order)
    }

    fn get(&self, id: &str) -> Option<Order> {
        self.inner.read().orders.get(id).cloned()
    }

    fn list(&self, status: Option<OrderStatus>) -> Vec<Order> {
        let inner = self.inner.read();
        inner
            .ids
            .iter()
            .rev()
            .filter_map(|id| inner.orders.get(id))
            .filter(|o| status.is_none_or(|s| o.status == s))
            .cloned()
            .collect()
    }

    fn recent_since(&self, cutoff_ms: i64) -> Vec<Order> {
        self.inner
            .read()
            .orders
            .values()
            .filter(|o| o.created_at >= cutoff_ms)
            .cloned()
            .collect()
    }

    fn update(&self, id: &str, mutation: &mut OrderMutation<'_>) -> OrderResult<Order> {
        let mut inner = self.inner.write();
        let mut working = inner
            .orders
            .get(id)
            .cloned()
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;

        let log = mutation(&mut working)?;

        if let Some(log) = log {
            inner.logs.entry(id.to_string()).or_default().push(log);
        }
        inner.orders.insert(id.to_string(), working.clone());
        Ok(working)
    }

    fn logs(&self, order_id: &str) -> OrderResult<Vec<OrderLog>> {
        let inner = self.inner.read();
        if !inner.orders.contains_key(order_id) {
            return Err(OrderError::NotFound(order_id.to_string()));
        }
        Ok(inner.logs.get(order_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::testing::{sample_log, sample_order};
    use shared::models::OrderLogAction;

    #[test]
    fn test_insert_and_get() {
        let repo = InMemoryOrderRepository::new();
        let order = sample_order("o-1", "ORD2026101910001");
        repo.insert(order.clone(), sample_log("o-1", OrderLogAction::Created))
            .unwrap();

        assert_eq!(repo.get("o-1"), Some(order));
        assert!(repo.get("o-2").is_none());
        assert_eq!(repo.logs("o-1").unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_id_or_number_rejected() {
        let repo = InMemoryOrderRepository::new();
        repo.insert(
            sample_order("o-1", "ORD2026101910001"),
            sample_log("o-1", OrderLogAction::Created),
        )
        .unwrap();

        let err = repo
            .insert(
                sample_order("o-1", "ORD2026101910002"),
                sample_log("o-1", OrderLogAction::Created),
            )
            .unwrap_err();
        assert!(matches!(err, OrderError::AlreadyExists(_)));

        let err = repo
            .insert(
                sample_order("o-2", "ORD2026101910001"),
                sample_log("o-2", OrderLogAction::Created),
            )
            .unwrap_err();
        assert!(matches!(err, OrderError::AlreadyExists(_)));
        assert_eq!(repo.list(None).len(), 1);
    }

    #[test]
    fn test_on_stored_runs_under_the_lock() {
        let repo = InMemoryOrderRepository::new();
        let mut calls = 0;
        repo.insert_with(
            sample_order("o-1", "ORD2026101910001"),
            sample_log("o-1", OrderLogAction::Created),
            &mut |order: &Order| {
                calls += 1;
                assert_eq!(order.id, "o-1");
                // Readers wait until the hook is done
                assert!(repo.inner.try_read().is_none());
            },
        )
        .unwrap();
        assert_eq!(calls, 1);
        assert!(repo.get("o-1").is_some());

        // Rejected insert never runs the hook
        let result = repo.insert_with(
            sample_order("o-1", "ORD2026101910002"),
            sample_log("o-1", OrderLogAction::Created),
            &mut |_: &Order| calls += 1,
        );
        assert!(matches!(result, Err(OrderError::AlreadyExists(_))));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_list_newest_first_with_status_filter() {
        let repo = InMemoryOrderRepository::new();
        for i in 1..=3 {
            let id = format!("o-{}", i);
            let mut order = sample_order(&id, &format!("ORD2026101910{:03}", i));
            if i == 2 {
                order.status = OrderStatus::Iptal;
            }
            repo.insert(order, sample_log(&id, OrderLogAction::Created))
                .unwrap();
        }

        let ids: Vec<_> = repo.list(None).into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["o-3", "o-2", "o-1"]);

        let cancelled = repo.list(Some(OrderStatus::Iptal));
        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0].id, "o-2");
    }

    #[test]
    fn test_failed_update_leaves_order_untouched() {
        let repo = InMemoryOrderRepository::new();
        repo.insert(
            sample_order("o-1", "ORD2026101910001"),
            sample_log("o-1", OrderLogAction::Created),
        )
        .unwrap();

        let result = repo.update("o-1", &mut |order: &mut Order| {
            order.status = OrderStatus::Kargoda;
            Err(OrderError::Validation("nope".into()))
        });
        assert!(result.is_err());
        assert_eq!(repo.get("o-1").unwrap().status, OrderStatus::New);
        assert_eq!(repo.logs("o-1").unwrap().len(), 1);
    }

    #[test]
    fn test_update_appends_log() {
        let repo = InMemoryOrderRepository::new();
        repo.insert(
            sample_order("o-1", "ORD2026101910001"),
            sample_log("o-1", OrderLogAction::Created),
        )
        .unwrap();

        let updated = repo
            .update("o-1", &mut |order: &mut Order| {
                order.status = OrderStatus::Onaylandi;
                Ok(Some(sample_log("o-1", OrderLogAction::StatusChanged)))
            })
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Onaylandi);
        assert_eq!(repo.logs("o-1").unwrap().len(), 2);
    }

    #[test]
    fn test_missing_order() {
        let repo = InMemoryOrderRepository::new();
        assert!(matches!(
            repo.update("nope", &mut |_: &mut Order| Ok(None)),
            Err(OrderError::NotFound(_))
        ));
        assert!(matches!(repo.logs("nope"), Err(OrderError::NotFound(_))));
    }

    #[test]
    fn test_recent_since() {
        let repo = InMemoryOrderRepository::new();
        let mut old = sample_order("o-1", "ORD2026101910001");
        old.created_at = 1_000;
        let mut fresh = sample_order("o-2", "ORD2026101910002");
        fresh.created_at = 5_000;
        repo.insert(old, sample_log("o-1", OrderLogAction::Created))
            .unwrap();
        repo.insert(fresh, sample_log("o-2", OrderLogAction::Created))
            .unwrap();

        assert_eq!(repo.recent_since(5_000).len(), 1);
        assert_eq!(repo.recent_since(1_000).len(), 2);
    }
}
