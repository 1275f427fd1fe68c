//! Heuristic fraud scoring
//!
//! Pure and deterministic: the same candidate, history and clock always give
//! the same signal. Each matching rule adds its points; nothing subtracts.
//!
//! | Rule | Points |
//! |------|--------|
//! | Placeholder token in name | 50 |
//! | Name shorter than 3 chars | 30 |
//! | 4+ identical chars in a row in name | 40 |
//! | Fake phone pattern | 80 |
//! | Fewer than 10 phone digits | 100 |
//! | More than 3 orders from the IP in the last hour | 40 |
//! | More than 2 orders for the phone in the last hour | 60 |

use serde::Serialize;
use shared::models::Order;
use shared::util::{normalize_phone, phone_digits};

/// Score at which a submission is treated as fake
pub const FAKE_THRESHOLD: u32 = 50;

/// Scores strictly above this blacklist the IP
pub const AUTO_BLOCK_THRESHOLD: u32 = 90;

/// Trailing window for velocity rules (inclusive)
pub const VELOCITY_WINDOW_MS: i64 = 60 * 60 * 1000;

const MAX_ORDERS_PER_IP: usize = 3;
const MAX_ORDERS_PER_PHONE: usize = 2;
const MIN_NAME_CHARS: usize = 3;
const MIN_PHONE_DIGITS: usize = 10;

/// Matched as case-insensitive substrings
const PLACEHOLDER_TOKENS: &[&str] = &[
    "test", "deneme", "admin", "asdf", "qwerty", "fake", "sahte", "xxx",
];

const SEQUENTIAL_RUNS: &[&str] = &["1234567", "9876543"];

/// The fields of a submission the scorer looks at
#[derive(Debug, Clone, Copy)]
pub struct FraudCandidate<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub ip: &'a str,
}

/// Scoring result, computed fresh per request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FraudSignal {
    pub score: u32,
    pub reasons: Vec<String>,
}

impl FraudSignal {
    pub fn is_fake(&self) -> bool {
        self.score >= FAKE_THRESHOLD
    }

    pub fn is_critical(&self) -> bool {
        self.score > AUTO_BLOCK_THRESHOLD
    }

    fn hit(&mut self, points: u32, reason: &str) {
        self.score += points;
        self.reasons.push(reason.to_string());
    }
}

/// Score a candidate against static heuristics and recent order history
pub fn score(candidate: FraudCandidate<'_>, recent_orders: &[Order], now_ms: i64) -> FraudSignal {
    let mut signal = FraudSignal::default();
    let name = candidate.name.trim();

    // Name rules
    let lowered = name.to_lowercase();
    if PLACEHOLDER_TOKENS.iter().any(|t| lowered.contains(t)) {
        signal.hit(50, "Suspicious name (placeholder text)");
    }
    if name.chars().count() < MIN_NAME_CHARS {
        signal.hit(30, "Name too short");
    }
    if has_repeated_run(name, 4) {
        signal.hit(40, "Repeated characters in name");
    }

    // Phone rules
    let digits = phone_digits(candidate.phone);
    if is_fake_phone(&digits) {
        signal.hit(80, "Fake phone number pattern");
    }
    if digits.len() < MIN_PHONE_DIGITS {
        signal.hit(100, "Invalid phone number length");
    }

    // Velocity rules
    let cutoff = now_ms - VELOCITY_WINDOW_MS;
    let recent = || recent_orders.iter().filter(|o| o.created_at >= cutoff);

    let same_ip = recent().filter(|o| o.ip_address == candidate.ip).count();
    if same_ip > MAX_ORDERS_PER_IP {
        signal.hit(40, "Too many orders from same IP");
    }

    let phone_key = normalize_phone(candidate.phone);
    if !phone_key.is_empty() {
        let same_phone = recent()
            .filter(|o| normalize_phone(&o.customer.phone) == phone_key)
            .count();
        if same_phone > MAX_ORDERS_PER_PHONE {
            signal.hit(60, "Duplicate phone orders");
        }
    }

    signal
}

/// `min` or more identical non-whitespace characters in a row (case-insensitive)
fn has_repeated_run(text: &str, min: usize) -> bool {
    let mut prev: Option<char> = None;
    let mut run = 0;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            prev = None;
            run = 0;
            continue;
        }
        if prev == Some(c) {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run >= min {
            return true;
        }
    }
    false
}

/// Fake-number patterns over the digit string
///
/// - one digit repeated 7+ times in a row
/// - an ascending or descending run ("1234567", "9876543")
/// - the subscriber number is one short block repeated 3+ times ("1212121212")
fn is_fake_phone(digits: &str) -> bool {
    if has_repeated_run(digits, 7) || SEQUENTIAL_RUNS.iter().any(|r| digits.contains(r)) {
        return true;
    }

    let key = normalize_phone(digits);
    let len = key.len();
    if len < MIN_PHONE_DIGITS {
        return false;
    }
    (1..=len / 3)
        .filter(|block| len % block == 0)
        .any(|block| key.as_bytes().chunks(block).all(|c| c == &key.as_bytes()[..block]))
}
