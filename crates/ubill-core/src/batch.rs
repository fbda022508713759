//! Directory batch processing.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::bill::rules::Diagnostic;
use crate::bill::{BillParser, ExtractionResult};
use crate::error::{PdfError, Result, UbillError};
use crate::models::bill::BillRecord;
use crate::pdf::{PdfTextSource, TextSource};

/// Final state of one document in a batch.
#[derive(Debug)]
pub enum DocumentStatus {
    /// Text and field extraction completed.
    Processed {
        /// Field-parse warnings collected for this document.
        warnings: Vec<Diagnostic>,
    },
    /// Document handling failed; the batch continued without it.
    Failed {
        /// Human-readable cause.
        error: String,
    },
}

/// Per-document success/failure report.
#[derive(Debug)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub status: DocumentStatus,
}

impl DocumentReport {
    pub fn is_processed(&self) -> bool {
        matches!(self.status, DocumentStatus::Processed { .. })
    }
}

/// Accumulated result of one batch run.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Records for successfully processed documents, in input order.
    pub records: Vec<BillRecord>,
    /// One report per attempted document.
    pub reports: Vec<DocumentReport>,
}

impl BatchOutcome {
    /// Number of successfully processed documents.
    pub fn success_count(&self) -> usize {
        self.records.len()
    }
}

/// Processes every bill in a directory, one document at a time.
///
/// Generic over [`TextSource`] so tests can drive the batch with a stub
/// instead of real PDF decoding.
pub struct BatchProcessor<S = PdfTextSource> {
    source: S,
    parser: BillParser,
    min_text_length: usize,
}

impl BatchProcessor<PdfTextSource> {
    /// Create a processor backed by real PDF text extraction.
    pub fn new() -> Self {
        Self::with_source(PdfTextSource::new(), BillParser::new())
    }
}

impl Default for BatchProcessor<PdfTextSource> {
    fn default() -> Self {
        Self::new()
    }
}

/// List the `.pdf` files directly inside `dir`, sorted by path.
///
/// A nonexistent directory is fatal before any document is touched.
pub fn pdf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(UbillError::InvalidInput(dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    files.sort();
    Ok(files)
}

impl<S: TextSource> BatchProcessor<S> {
    /// Create a processor with an explicit text source and parser.
    pub fn with_source(source: S, parser: BillParser) -> Self {
        Self {
            source,
            parser,
            min_text_length: 1,
        }
    }

    /// Set the minimum extracted text length below which a document counts
    /// as unreadable.
    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }

    /// Extract one document: text first, then fields.
    pub fn process_document(&self, path: &Path) -> Result<ExtractionResult> {
        let text = self.source.extract_text(path)?;
        if text.trim().len() < self.min_text_length {
            return Err(PdfError::TextExtraction("document contains no text".to_string()).into());
        }
        Ok(self.parser.parse(&text))
    }

    /// Process every bill in `dir`.
    ///
    /// Per-document failures are caught, logged, and recorded; the batch
    /// always continues with the next document.
    pub fn process_directory(&self, dir: &Path) -> Result<BatchOutcome> {
        let files = pdf_files(dir)?;
        let mut outcome = BatchOutcome::default();

        for path in files {
            match self.process_document(&path) {
                Ok(result) => {
                    info!("Successfully processed: {}", path.display());
                    for diag in &result.diagnostics {
                        warn!("{}: {}", path.display(), diag);
                    }
                    outcome.records.push(result.record);
                    outcome.reports.push(DocumentReport {
                        path,
                        status: DocumentStatus::Processed {
                            warnings: result.diagnostics,
                        },
                    });
                }
                Err(e) => {
                    warn!("Error processing {}: {}", path.display(), e);
                    outcome.reports.push(DocumentReport {
                        path,
                        status: DocumentStatus::Failed {
                            error: e.to_string(),
                        },
                    });
                }
            }
        }

        if outcome.success_count() == 0 {
            warn!("No PDF files were successfully processed");
        } else {
            info!("Successfully processed {} PDF files", outcome.success_count());
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf;

    /// Text source keyed on file names: `corrupt*` fails, everything else
    /// yields a minimal bill.
    struct StubSource;

    impl TextSource for StubSource {
        fn extract_text(&self, path: &Path) -> pdf::Result<String> {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if name.starts_with("corrupt") {
                Err(PdfError::Parse("broken xref table".to_string()))
            } else if name.starts_with("blank") {
                Ok("   \n".to_string())
            } else {
                Ok(format!(
                    "YOUR ACCOUNT NO 1000\nTOTAL AMOUNT DUE R 250.00\nsource {}",
                    name
                ))
            }
        }
    }

    fn stub_processor() -> BatchProcessor<StubSource> {
        BatchProcessor::with_source(StubSource, BillParser::new())
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"%PDF-stub").unwrap();
    }

    #[test]
    fn test_batch_continues_past_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "bill_a.pdf");
        touch(dir.path(), "bill_b.pdf");
        touch(dir.path(), "bill_c.pdf");
        touch(dir.path(), "corrupt.pdf");

        let outcome = stub_processor().process_directory(dir.path()).unwrap();

        assert_eq!(outcome.success_count(), 3);
        assert_eq!(outcome.reports.len(), 4);

        let failed: Vec<_> = outcome
            .reports
            .iter()
            .filter(|r| !r.is_processed())
            .collect();
        assert_eq!(failed.len(), 1);
        assert!(failed[0].path.ends_with("corrupt.pdf"));
    }

    #[test]
    fn test_non_pdf_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "bill.pdf");
        touch(dir.path(), "bill.PDF");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "bill.pdf.bak");

        let files = pdf_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_invalid_directory_is_fatal() {
        let result = stub_processor().process_directory(Path::new("/no/such/dir"));
        assert!(matches!(result, Err(UbillError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_text_counts_as_failure() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "blank.pdf");

        let outcome = stub_processor().process_directory(dir.path()).unwrap();
        assert_eq!(outcome.success_count(), 0);
        assert!(!outcome.reports[0].is_processed());
    }

    #[test]
    fn test_empty_directory_yields_empty_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = stub_processor().process_directory(dir.path()).unwrap();
        assert_eq!(outcome.success_count(), 0);
        assert!(outcome.reports.is_empty());
    }

    #[test]
    fn test_records_follow_sorted_input_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "z.pdf");
        touch(dir.path(), "a.pdf");

        let outcome = stub_processor().process_directory(dir.path()).unwrap();
        assert!(outcome.reports[0].path.ends_with("a.pdf"));
        assert!(outcome.reports[1].path.ends_with("z.pdf"));
    }
}
