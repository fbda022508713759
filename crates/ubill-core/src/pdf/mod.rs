//! PDF text extraction.

mod extractor;

pub use extractor::PdfExtractor;

use std::path::Path;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// A source of plain text for bill documents.
///
/// Implementations return the concatenated text of all pages, in page
/// order, joined with newlines. The batch processor only depends on this
/// seam, so tests can substitute a stub for real PDF decoding.
pub trait TextSource {
    /// Extract the full text of the document at `path`.
    fn extract_text(&self, path: &Path) -> Result<String>;
}

/// Production text source backed by [`PdfExtractor`].
#[derive(Debug, Default)]
pub struct PdfTextSource;

impl PdfTextSource {
    pub fn new() -> Self {
        Self
    }
}

impl TextSource for PdfTextSource {
    fn extract_text(&self, path: &Path) -> Result<String> {
        let data = std::fs::read(path).map_err(|e| PdfError::Parse(e.to_string()))?;
        let mut extractor = PdfExtractor::new();
        extractor.load(&data)?;
        extractor.extract_text()
    }
}
