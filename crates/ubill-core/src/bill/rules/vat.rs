//! VAT computation from total charges.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Compute the VAT amount on a raw total-charges capture.
///
/// Returns the rate's share of the total, rounded to two decimal places.
/// An input that cannot be read as a number yields `None` — this path
/// signals absence rather than defaulting to zero, unlike
/// [`super::normalize_amount`].
pub fn vat_amount(raw: &str, rate: Decimal) -> Option<Decimal> {
    let cleaned = raw.trim().replace(',', "");
    let total = Decimal::from_str(&cleaned).ok()?;
    Some((total * rate).round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate() -> Decimal {
        Decimal::new(15, 2)
    }

    #[test]
    fn test_vat_on_round_total() {
        assert_eq!(
            vat_amount("1000", rate()),
            Some(Decimal::from_str("150.00").unwrap())
        );
    }

    #[test]
    fn test_vat_strips_thousands_separators() {
        assert_eq!(
            vat_amount("1,219.23", rate()),
            Some(Decimal::from_str("182.88").unwrap())
        );
    }

    #[test]
    fn test_vat_rounds_to_two_decimals() {
        // 123.45 * 0.15 = 18.5175
        assert_eq!(
            vat_amount("123.45", rate()),
            Some(Decimal::from_str("18.52").unwrap())
        );
    }

    #[test]
    fn test_unparseable_is_none_not_zero() {
        assert_eq!(vat_amount("abc", rate()), None);
        assert_eq!(vat_amount("", rate()), None);
    }
}
