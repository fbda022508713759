//! Core library for utility bill processing.
//!
//! This crate provides:
//! - PDF text extraction (lopdf + pdf-extract) behind a `TextSource` seam
//! - Labeled-pattern field extraction for utility bills
//! - Value normalization with structured diagnostics
//! - Directory batch processing and timestamped CSV export

pub mod error;
pub mod models;
pub mod pdf;
pub mod bill;
pub mod batch;
pub mod export;

pub use error::{UbillError, Result};
pub use models::bill::BillRecord;
pub use models::config::UbillConfig;
pub use pdf::{PdfExtractor, PdfTextSource, TextSource};
pub use bill::{BillParser, ExtractionResult};
pub use bill::rules::Diagnostic;
pub use batch::{BatchOutcome, BatchProcessor, DocumentReport, DocumentStatus};
pub use export::CsvExporter;
