/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a random resource ID (UUID v4, hyphenated).
///
/// Used for orders, order logs, stock movements, blacklist entries and
/// security events alike.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Strip everything but ASCII digits from a phone number.
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalized phone key: the last 10 digits.
///
/// `+90 555 123 45 67`, `0555 123 4567` and `5551234567` all map to the same
/// key, which is what duplicate-order detection compares on.
pub fn normalize_phone(phone: &str) -> String {
    let digits = phone_digits(phone);
    let skip = digits.len().saturating_sub(10);
    digits[skip..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_digits_strips_formatting() {
        assert_eq!(phone_digits("+90 (555) 123-45-67"), "905551234567");
        assert_eq!(phone_digits("abc"), "");
    }

    #[test]
    fn test_normalize_phone_keeps_last_ten() {
        assert_eq!(normalize_phone("+90 555 123 45 67"), "5551234567");
        assert_eq!(normalize_phone("0555 123 4567"), "5551234567");
        assert_eq!(normalize_phone("5551234567"), "5551234567");
        assert_eq!(normalize_phone("12345"), "12345");
    }

    #[test]
    fn test_new_id_is_unique() {
        assert_ne!(new_id(), new_id());
    }
}
