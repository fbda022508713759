//! Rule-based field extraction for utility bills.

pub mod dates;
pub mod numbers;
pub mod patterns;
pub mod vat;

pub use dates::normalize_date;
pub use numbers::{normalize_amount, or_zero};
pub use vat::vat_amount;

use std::fmt;

use regex::Regex;

/// Apply a labeled pattern: first capture group of the first match, trimmed.
pub fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

/// A field-parse warning.
///
/// Returned to the caller alongside the normalized value instead of being
/// printed, so the warning path is testable. The CLI surfaces collected
/// diagnostics as log warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the field that failed to normalize.
    pub field: &'static str,
    /// The raw captured text that could not be converted.
    pub raw: String,
}

impl Diagnostic {
    pub fn new(field: &'static str, raw: impl Into<String>) -> Self {
        Self {
            field,
            raw: raw.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not convert '{}' for {}, using default",
            self.raw, self.field
        )
    }
}
