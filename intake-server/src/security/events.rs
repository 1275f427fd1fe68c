//! Security event log
//!
//! Append-only. Recording is synchronous: the caller's operation does not
//! complete until the event is stored.

use parking_lot::RwLock;
use serde_json::Value;
use shared::models::{RiskLevel, SecurityEvent, SecurityEventQuery, SecurityEventType};
use shared::util::{new_id, now_millis};

/// Default page size for event listings
pub const DEFAULT_EVENT_LIMIT: usize = 100;

#[derive(Debug, Default)]
pub struct SecurityEventLog {
    events: RwLock<Vec<SecurityEvent>>,
}

impl SecurityEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &self,
        event_type: SecurityEventType,
        ip: &str,
        description: impl Into<String>,
        risk_level: RiskLevel,
        details: Option<Value>,
    ) -> SecurityEvent {
        let event = SecurityEvent {
            id: new_id(),
            event_type,
            ip: ip.to_string(),
            description: description.into(),
            risk_level,
            details,
            created_at: now_millis(),
        };
        self.events.write().push(event.clone());

        crate::security_log!(
            risk_level.as_str(),
            event_type.as_str(),
            ip = %event.ip,
            description = %event.description
        );
        event
    }

    /// Newest first, optionally filtered by type
    pub fn list(&self, query: &SecurityEventQuery) -> Vec<SecurityEvent> {
        let limit = query.limit.unwrap_or(DEFAULT_EVENT_LIMIT);
        self.events
            .read()
            .iter()
            .rev()
            .filter(|e| query.event_type.is_none_or(|t| e.event_type == t))
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn count(&self, event_type: SecurityEventType) -> usize {
        self.events
            .read()
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}
