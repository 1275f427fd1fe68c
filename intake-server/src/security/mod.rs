//! 安全模块 - 限流、黑名单、欺诈评分、安全事件
//!
//! # 模块结构
//!
//! - [`rate_limit`] - 按 IP 的固定窗口限流
//! - [`blacklist`] - IP 黑名单
//! - [`fraud`] - 启发式欺诈评分 (纯函数)
//! - [`events`] - 只追加的安全事件日志

pub mod blacklist;
pub mod events;
pub mod fraud;
pub mod rate_limit;

pub use blacklist::{BlacklistError, BlacklistResult, BlacklistStore, InMemoryBlacklist};
pub use events::SecurityEventLog;
pub use fraud::{FraudCandidate, FraudSignal};
pub use rate_limit::{FixedWindowRateLimiter, RateLimiter};
