//! Numeric normalization for extracted bill quantities.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::Diagnostic;

/// Normalize a raw numeric capture.
///
/// A missing capture, an empty string, or a lone `-` (the layout's marker
/// for "no value") is absent with no diagnostic. Anything else has its
/// thousands-separator commas stripped and is parsed as a decimal; if that
/// fails the value is absent and exactly one diagnostic is returned.
///
/// Absence is preserved here; the zero-default the export applies lives in
/// [`or_zero`].
pub fn normalize_amount(
    field: &'static str,
    raw: Option<&str>,
) -> (Option<Decimal>, Option<Diagnostic>) {
    let raw = match raw {
        Some(r) => r.trim(),
        None => return (None, None),
    };

    if raw.is_empty() || raw == "-" {
        return (None, None);
    }

    let cleaned = raw.replace(',', "");
    match Decimal::from_str(&cleaned) {
        Ok(value) => (Some(value), None),
        Err(_) => (None, Some(Diagnostic::new(field, raw))),
    }
}

/// Export-boundary accessor: an absent quantity renders as zero.
pub fn or_zero(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_empty_and_dash_default_to_zero() {
        for raw in [None, Some(""), Some("-"), Some("  ")] {
            let (value, diag) = normalize_amount("consumption", raw);
            assert_eq!(value, None, "raw: {:?}", raw);
            assert_eq!(diag, None, "raw: {:?}", raw);
            assert_eq!(or_zero(value), Decimal::ZERO);
        }
    }

    #[test]
    fn test_thousands_separators_stripped_losslessly() {
        let (value, diag) = normalize_amount("total_due", Some("1,234.56"));
        assert_eq!(value, Some(Decimal::from_str("1234.56").unwrap()));
        assert_eq!(diag, None);

        let (value, _) = normalize_amount("total_due", Some("12,345,678.90"));
        assert_eq!(value, Some(Decimal::from_str("12345678.90").unwrap()));
    }

    #[test]
    fn test_plain_value() {
        let (value, diag) = normalize_amount("consumption", Some("856.40"));
        assert_eq!(value, Some(Decimal::from_str("856.40").unwrap()));
        assert_eq!(diag, None);
    }

    #[test]
    fn test_unparseable_yields_one_diagnostic() {
        let (value, diag) = normalize_amount("consumption", Some("N/A"));
        assert_eq!(value, None);
        assert_eq!(diag, Some(Diagnostic::new("consumption", "N/A")));
        assert_eq!(or_zero(value), Decimal::ZERO);
    }

    #[test]
    fn test_trailing_credit_sign_is_unparseable() {
        // "1,234.56-" shows up on credit bills; it is not a number
        let (value, diag) = normalize_amount("total_due", Some("1,234.56-"));
        assert_eq!(value, None);
        assert!(diag.is_some());
    }
}
