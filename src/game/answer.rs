// Answer-field normalisation.

/// Keep only ASCII digits, the same filter the answer field applies on every change.
pub fn sanitize_answer(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Parse a sanitised answer. Empty or overflowing input yields `None`, which can never
/// equal a sum of two positive operands.
pub fn parse_answer(candidate: &str) -> Option<u32> {
    let digits = sanitize_answer(candidate);
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_everything_but_digits() {
        assert_eq!(sanitize_answer("1a2 b3"), "123");
        assert_eq!(sanitize_answer("-7"), "7");
        assert_eq!(sanitize_answer("٣"), "");
        assert_eq!(sanitize_answer(""), "");
    }

    #[test]
    fn parse_handles_empty_and_overflow() {
        assert_eq!(parse_answer(""), None);
        assert_eq!(parse_answer("abc"), None);
        assert_eq!(parse_answer("99999999999999999999"), None);
        assert_eq!(parse_answer("007"), Some(7));
        assert_eq!(parse_answer("42"), Some(42));
    }
}
