//! Per-IP rate limiting for the public checkout
//!
//! Fixed window: the first request from an IP opens a window of `window`
//! length; up to `max_requests` are allowed inside it, the rest are denied.
//! The first request after the window ends opens a fresh one with count 1.
//!
//! A fixed window lets a client squeeze up to `2 * max_requests` through
//! around a window boundary. That burst is accepted.

use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Admission check keyed by client IP
///
/// Swapping the implementation (e.g. a shared store for several nodes)
/// must not change `allow`.
pub trait RateLimiter: Send + Sync {
    /// Returns `true` if the request is allowed, `false` if rate-limited.
    fn allow(&self, ip: &str) -> bool;

    /// Drop records whose window has ended
    fn cleanup(&self) {}
}

#[derive(Debug)]
struct IpEntry {
    count: u32,
    window_reset_at: Instant,
}

/// In-process fixed-window limiter
///
/// The DashMap entry guard serialises updates per IP, so two requests from
/// the same address never race on the counter.
#[derive(Debug)]
pub struct FixedWindowRateLimiter {
    entries: DashMap<String, IpEntry>,
    max_requests: u32,
    window: Duration,
}

impl FixedWindowRateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            max_requests,
            window,
        }
    }

    /// Number of IPs currently tracked
    pub fn tracked(&self) -> usize {
        self.entries.len()
    }
}

impl Default for FixedWindowRateLimiter {
    /// 10 requests per 60 seconds
    fn default() -> Self {
        Self::new(10, Duration::from_secs(60))
    }
}

impl RateLimiter for FixedWindowRateLimiter {
    fn allow(&self, ip: &str) -> bool {
        let now = Instant::now();
        let mut entry = self.entries.entry(ip.to_owned()).or_insert_with(|| IpEntry {
            count: 0,
            window_reset_at: now + self.window,
        });

        // Reset window if expired
        if now >= entry.window_reset_at {
            entry.count = 0;
            entry.window_reset_at = now + self.window;
        }

        entry.count = entry.count.saturating_add(1);
        entry.count <= self.max_requests
    }

    fn cleanup(&self) {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| now < entry.window_reset_at);
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            tracing::debug!(removed, "Rate limiter cleanup");
        }
    }
}
