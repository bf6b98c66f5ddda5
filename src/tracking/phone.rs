//! Phone number formatting and validation

/// Country code assumed when the caller does not supply one
pub const DEFAULT_COUNTRY_CODE: &str = "+55";

/// Keep only ASCII digits
fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format a raw phone number for display.
///
/// Brazilian numbers (country code `+55`) are grouped as `(DD) DDDDD-DDDD`
/// for 11 digits or `(DD) DDDD-DDDD` for 10. Anything else is returned
/// unchanged; formatting is best-effort and never fails. Re-formatting an
/// already formatted number yields the same string.
pub fn format_phone_number(raw: &str, country_code: &str) -> String {
    let digits = strip_non_digits(raw);

    if country_code == DEFAULT_COUNTRY_CODE {
        if digits.len() == 11 {
            return format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]);
        }
        if digits.len() == 10 {
            return format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]);
        }
    }

    raw.to_string()
}

/// Validate a raw phone number against a country code's digit-count rules.
///
/// Brazilian numbers need 10 or 11 digits; any other country code falls back
/// to the 8–15 digit international range. Pure, no panics.
pub fn validate_phone_number(raw: &str, country_code: &str) -> bool {
    let digits = strip_non_digits(raw);

    if country_code == DEFAULT_COUNTRY_CODE {
        return digits.len() == 10 || digits.len() == 11;
    }

    (8..=15).contains(&digits.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brazilian_mobile() {
        assert_eq!(format_phone_number("11999998888", "+55"), "(11) 99999-8888");
    }

    #[test]
    fn test_format_brazilian_landline() {
        assert_eq!(format_phone_number("1139998888", "+55"), "(11) 3999-8888");
    }

    #[test]
    fn test_format_is_idempotent() {
        let once = format_phone_number("11999998888", "+55");
        assert_eq!(format_phone_number(&once, "+55"), once);

        let once = format_phone_number("1139998888", "+55");
        assert_eq!(format_phone_number(&once, "+55"), once);
    }

    #[test]
    fn test_format_leaves_other_inputs_alone() {
        // Wrong digit count
        assert_eq!(format_phone_number("119999", "+55"), "119999");
        // Non-Brazilian country code
        assert_eq!(format_phone_number("2025550123", "+1"), "2025550123");
    }

    #[test]
    fn test_validate_brazilian() {
        assert!(validate_phone_number("11999998888", "+55"));
        assert!(validate_phone_number("1139998888", "+55"));
        assert!(validate_phone_number("(11) 99999-8888", "+55"));
        assert!(!validate_phone_number("119999", "+55"));
        assert!(!validate_phone_number("", "+55"));
        assert!(!validate_phone_number("119999988881", "+55"));
    }

    #[test]
    fn test_validate_international() {
        assert!(validate_phone_number("12345678", "+1"));
        assert!(validate_phone_number("123456789012345", "+44"));
        assert!(!validate_phone_number("1234567", "+1"));
        assert!(!validate_phone_number("1234567890123456", "+1"));
    }
}
