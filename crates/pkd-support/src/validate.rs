//! Field validators shared by the account forms.
//!
//! Pragmatic shape checks, not RFC parsers: the service performs its own
//! authoritative validation; these only catch obvious typos before a call
//! goes out.

/// `local@domain.tld` shape: exactly one `@`, non-empty local part, a dot
/// inside the domain, no whitespace.
pub fn is_email(value: &str) -> bool {
    let v = value.trim();
    if v.is_empty() || v.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = v.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

/// Mobile number: optional leading `+`, 8–15 digits; spaces, dashes, and
/// parentheses are ignored.
pub fn is_mobile(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    (8..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_plus_addressed_emails() {
        assert!(is_email("driver@example.com"));
        assert!(is_email("a.b+tag@mail.example.mx"));
        assert!(is_email("  padded@example.com  "));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_email(""));
        assert!(!is_email("no-at-sign.example.com"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("two@@example.com"));
        assert!(!is_email("dot@nodomain"));
        assert!(!is_email("x@.example.com"));
        assert!(!is_email("spaced name@example.com"));
    }

    #[test]
    fn accepts_common_mobile_formats() {
        assert!(is_mobile("+52 155 1234 5678"));
        assert!(is_mobile("5512345678"));
        assert!(is_mobile("(55) 1234-5678"));
    }

    #[test]
    fn rejects_short_long_and_lettered_mobiles() {
        assert!(!is_mobile("12345"));
        assert!(!is_mobile("+1234567890123456"));
        assert!(!is_mobile("55-CALL-ME"));
        assert!(!is_mobile(""));
    }
}
