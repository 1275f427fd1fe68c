//! Order number generation

use chrono::Local;
use std::sync::atomic::{AtomicU64, Ordering};

/// Human-legible order numbers
///
/// Format: ORD{YYYYMMDD}{sequence}
/// Example: ORD2026101910001
///
/// The sequence never resets within a process, so numbers stay unique
/// across midnight.
#[derive(Debug, Default)]
pub struct OrderNumberGenerator {
    count: AtomicU64,
}

impl OrderNumberGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_number(&self) -> String {
        let count = self.count.fetch_add(1, Ordering::Relaxed) + 1;
        let date_str = Local::now().format("%Y%m%d").to_string();
        // Sequence starts at 10001
        format!("ORD{}{}", date_str, 10000 + count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_format() {
        let generator = OrderNumberGenerator::new();
        let number = generator.next_number();
        assert!(number.starts_with("ORD"));
        assert_eq!(number.len(), 3 + 8 + 5);
        assert!(number.ends_with("10001"));
        assert!(generator.next_number().ends_with("10002"));
    }

    #[test]
    fn test_unique_across_threads() {
        let generator = std::sync::Arc::new(OrderNumberGenerator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let generator = generator.clone();
                std::thread::spawn(move || {
                    (0..250).map(|_| generator.next_number()).collect::<Vec<_>>()
                })
            })
            .collect();
        let mut seen = HashSet::new();
        for handle in handles {
            for number in handle.join().unwrap() {
                assert!(seen.insert(number));
            }
        }
        assert_eq!(seen.len(), 1000);
    }
}
