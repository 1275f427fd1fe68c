//! IP blacklist
//!
//! Entries are never deduplicated: an operator block and an automated block
//! for the same IP stay separately auditable. An IP is blocked while at least
//! one entry for it exists.

use parking_lot::RwLock;
use shared::models::BlacklistEntry;
use shared::util::{new_id, now_millis};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlacklistError {
    #[error("Blacklist entry not found: {0}")]
    NotFound(String),

    #[error("Invalid blacklist entry: {0}")]
    Invalid(String),
}

pub type BlacklistResult<T> = Result<T, BlacklistError>;

/// Blocked-IP store
pub trait BlacklistStore: Send + Sync {
    fn is_blocked(&self, ip: &str) -> bool;

    fn add(&self, ip: &str, reason: &str, created_by: &str) -> BlacklistResult<BlacklistEntry>;

    fn remove(&self, id: &str) -> BlacklistResult<BlacklistEntry>;

    /// All entries, newest first
    fn list(&self) -> Vec<BlacklistEntry>;
}

#[derive(Debug, Default)]
struct Inner {
    entries: Vec<BlacklistEntry>,
    /// ip -> number of live entries
    counts: HashMap<String, usize>,
}

/// In-memory blacklist
#[derive(Debug, Default)]
pub struct InMemoryBlacklist {
    inner: RwLock<Inner>,
}

impl InMemoryBlacklist {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlacklistStore for InMemoryBlacklist {
    fn is_blocked(&self, ip: &str) -> bool {
        self.inner.read().counts.get(ip).is_some_and(|c| *c > 0)
    }

    fn add(&self, ip: &str, reason: &str, created_by: &str) -> BlacklistResult<BlacklistEntry> {
        let ip = ip.trim();
        if ip.is_empty() {
            return Err(BlacklistError::Invalid("ip must not be empty".into()));
        }
        let entry = BlacklistEntry {
            id: new_id(),
            ip: ip.to_string(),
            reason: reason.to_string(),
            created_at: now_millis(),
            created_by: created_by.to_string(),
        };

        let mut inner = self.inner.write();
        *inner.counts.entry(entry.ip.clone()).or_insert(0) += 1;
        inner.entries.push(entry.clone());
        drop(inner);

        tracing::info!(ip = %entry.ip, created_by = %entry.created_by, reason = %entry.reason, "IP blacklisted");
        Ok(entry)
    }

    fn remove(&self, id: &str) -> BlacklistResult<BlacklistEntry> {
        let mut inner = self.inner.write();
        let pos = inner
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| BlacklistError::NotFound(id.to_string()))?;
        let entry = inner.entries.remove(pos);

        if let Some(count) = inner.counts.get_mut(&entry.ip) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                inner.counts.remove(&entry.ip);
            }
        }
        drop(inner);

        tracing::info!(ip = %entry.ip, id = %entry.id, "Blacklist entry removed");
        Ok(entry)
    }

    fn list(&self) -> Vec<BlacklistEntry> {
        self.inner.read().entries.iter().rev().cloned().collect()
    }
}
