//! Security Models
//!
//! Security events and IP blacklist entries recorded by the intake gate.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Security event type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityEventType {
    /// Request denied by the rate limiter
    RateLimit,
    /// Request from a blacklisted IP
    BlacklistBlock,
    /// Submission scored as fake by the fraud scorer
    FakeOrderAttempt,
    /// IP automatically added to the blacklist
    AutoBlacklist,
}

impl SecurityEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityEventType::RateLimit => "RATE_LIMIT",
            SecurityEventType::BlacklistBlock => "BLACKLIST_BLOCK",
            SecurityEventType::FakeOrderAttempt => "FAKE_ORDER_ATTEMPT",
            SecurityEventType::AutoBlacklist => "AUTO_BLACKLIST",
        }
    }
}

impl std::fmt::Display for SecurityEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

/// Append-only security event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecurityEvent {
    pub id: String,
    pub event_type: SecurityEventType,
    pub ip: String,
    pub description: String,
    pub risk_level: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Unix millis
    pub created_at: i64,
}

/// Security event list query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityEventQuery {
    #[serde(default)]
    pub event_type: Option<SecurityEventType>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Blacklist entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlacklistEntry {
    pub id: String,
    pub ip: String,
    pub reason: String,
    /// Unix millis
    pub created_at: i64,
    /// Operator name or "System AI"
    pub created_by: String,
}

/// Manual blacklist payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlacklistCreate {
    pub ip: String,
    pub reason: String,
    #[serde(default)]
    pub created_by: Option<String>,
}
