//! Cost formatting helpers for the suggestion table.
//!
//! `estimated_cost` is stored as free text, so these functions degrade
//! gracefully: values that do not look like money pass through unchanged
//! instead of raising errors.

const CURRENCY_SYMBOL: char = '£';

/// A cost value as the dashboard receives it: either a number or a
/// string that may or may not already carry the currency symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum CostValue {
    Amount(f64),
    Text(String),
}

impl From<f64> for CostValue {
    fn from(value: f64) -> Self {
        Self::Amount(value)
    }
}

impl From<u32> for CostValue {
    fn from(value: u32) -> Self {
        Self::Amount(f64::from(value))
    }
}

impl From<&str> for CostValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CostValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Format a cost for display. Strings already starting with the currency
/// symbol pass through; numbers and strings with a leading numeric
/// prefix are rendered with two decimals; anything else is returned
/// unchanged.
pub fn format_currency(value: impl Into<CostValue>) -> String {
    match value.into() {
        CostValue::Amount(amount) => format!("{CURRENCY_SYMBOL}{amount:.2}"),
        CostValue::Text(text) => {
            if text.starts_with(CURRENCY_SYMBOL) {
                return text;
            }
            match parse_float_prefix(&text) {
                Some(amount) => format!("{CURRENCY_SYMBOL}{amount:.2}"),
                None => text,
            }
        }
    }
}

/// Strip the currency symbol and parse the remainder. `None` signals an
/// unparseable value, not an error condition.
pub fn parse_currency(value: &str) -> Option<f64> {
    let cleaned: String = value.chars().filter(|c| *c != CURRENCY_SYMBOL).collect();
    parse_float_prefix(&cleaned)
}

/// Parse the leading numeric prefix of `value`, so historical entries
/// like "85 approx" still render as money. Trailing text is discarded.
fn parse_float_prefix(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (idx, c) in trimmed.char_indices() {
        match c {
            '+' | '-' if idx == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            '0'..='9' => seen_digit = true,
            _ => break,
        }
        end = idx + c.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    trimmed[..end].parse::<f64>().ok()
}

/// Check for an optional symbol, digits, and an optional two-decimal
/// fraction (e.g. "£85.00", "£85", "85").
pub fn is_valid_currency(value: &str) -> bool {
    let rest = value.strip_prefix(CURRENCY_SYMBOL).unwrap_or(value);

    let (whole, fraction) = match rest.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (rest, None),
    };

    if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    match fraction {
        None => true,
        Some(fraction) => fraction.len() == 2 && fraction.chars().all(|c| c.is_ascii_digit()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_numeric_values_with_two_decimals() {
        assert_eq!(format_currency(85.0), "£85.00");
        assert_eq!(format_currency(12.5), "£12.50");
    }

    #[test]
    fn formatted_strings_pass_through_unchanged() {
        assert_eq!(format_currency("£85.00"), "£85.00");
        assert_eq!(format_currency("£85"), "£85");
    }

    #[test]
    fn numeric_strings_are_formatted() {
        assert_eq!(format_currency("85"), "£85.00");
        assert_eq!(format_currency("85.5"), "£85.50");
    }

    #[test]
    fn numeric_prefixes_are_formatted_with_the_trailing_text_dropped() {
        assert_eq!(format_currency("85 approx"), "£85.00");
        assert_eq!(format_currency("12.5/month"), "£12.50");
        assert_eq!(format_currency("-20 credit"), "£-20.00");
    }

    #[test]
    fn unparseable_strings_are_returned_unchanged() {
        assert_eq!(format_currency("abc"), "abc");
        assert_eq!(format_currency("ask facilities"), "ask facilities");
    }

    #[test]
    fn parse_strips_the_symbol() {
        assert_eq!(parse_currency("£85.00"), Some(85.0));
        assert_eq!(parse_currency(" £12.50 "), Some(12.5));
        assert_eq!(parse_currency("42"), Some(42.0));
        assert_eq!(parse_currency("£85.50 per desk"), Some(85.5));
    }

    #[test]
    fn parse_returns_none_for_free_text() {
        assert_eq!(parse_currency("abc"), None);
        assert_eq!(parse_currency(""), None);
    }

    #[test]
    fn validation_accepts_expected_shapes() {
        assert!(is_valid_currency("£85.00"));
        assert!(is_valid_currency("£85"));
        assert!(is_valid_currency("85"));
        assert!(is_valid_currency("85.25"));
    }

    #[test]
    fn validation_rejects_malformed_values() {
        assert!(!is_valid_currency("£85.0"));
        assert!(!is_valid_currency("£85.123"));
        assert!(!is_valid_currency("£"));
        assert!(!is_valid_currency("eighty"));
        assert!(!is_valid_currency("£85,00"));
    }
}
