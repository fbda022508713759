//! Date normalization for extracted bill fields.

use chrono::NaiveDate;

use super::Diagnostic;

/// Normalize a raw ISO `YYYY-MM-DD` capture.
///
/// The patterns only capture ISO-shaped text, so the remaining failure is
/// a calendar-invalid date; that yields absent plus one diagnostic.
pub fn normalize_date(
    field: &'static str,
    raw: Option<&str>,
) -> (Option<NaiveDate>, Option<Diagnostic>) {
    let raw = match raw {
        Some(r) => r.trim(),
        None => return (None, None),
    };

    if raw.is_empty() {
        return (None, None);
    }

    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => (Some(date), None),
        Err(_) => (None, Some(Diagnostic::new(field, raw))),
    }
}
