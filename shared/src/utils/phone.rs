//! Phone number utilities
//!
//! All account and verification state is keyed by a normalized Japanese
//! mobile number: digits only, national format (`090...`, `080...`,
//! `070...`, 11 digits). Numbers are converted to E.164 only at the SMS
//! provider boundary.

use once_cell::sync::Lazy;
use regex::Regex;

// Japanese mobile phone number, national format
static JP_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0[789]0\d{8}$").unwrap());

/// Normalize a phone number to national digits-only form.
///
/// Strips formatting characters and rewrites an `+81` international prefix
/// back to the national leading zero.
pub fn normalize_phone_number(phone: &str) -> String {
    let significant: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    match significant.strip_prefix("+81") {
        Some(rest) => format!("0{}", rest),
        None => significant.chars().filter(|c| c.is_ascii_digit()).collect(),
    }
}

/// Check whether a normalized number is a valid Japanese mobile number
pub fn is_valid_mobile(phone: &str) -> bool {
    JP_MOBILE_REGEX.is_match(phone)
}

/// Convert a normalized national number to E.164 (`+81...`).
///
/// Returns `None` when the input is not a valid mobile number.
pub fn to_e164(phone: &str) -> Option<String> {
    if is_valid_mobile(phone) {
        Some(format!("+81{}", &phone[1..]))
    } else {
        None
    }
}

/// Mask a phone number for logs (e.g. 090****5678)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("090-1234-5678"), "09012345678");
        assert_eq!(normalize_phone_number("090 1234 5678"), "09012345678");
        assert_eq!(normalize_phone_number("+81 90 1234 5678"), "09012345678");
        assert_eq!(normalize_phone_number("(090) 1234-5678"), "09012345678");
    }

    #[test]
    fn test_is_valid_mobile() {
        assert!(is_valid_mobile("09012345678"));
        assert!(is_valid_mobile("08011112222"));
        assert!(is_valid_mobile("07099998888"));
        assert!(!is_valid_mobile("06012345678")); // landline-range prefix
        assert!(!is_valid_mobile("0901234567")); // too short
        assert!(!is_valid_mobile("090123456789")); // too long
        assert!(!is_valid_mobile("+819012345678")); // not normalized
    }

    #[test]
    fn test_to_e164() {
        assert_eq!(to_e164("09012345678"), Some("+819012345678".to_string()));
        assert_eq!(to_e164("08011112222"), Some("+818011112222".to_string()));
        assert_eq!(to_e164("12345"), None);
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("09012345678"), "090****5678");
        assert_eq!(mask_phone_number("+819012345678"), "090****5678");
        assert_eq!(mask_phone_number("12345"), "****");
    }
}
