//! CSV export with collision-free output naming.

use std::path::{Path, PathBuf};

use chrono::Local;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::bill::rules::or_zero;
use crate::error::ExportError;
use crate::models::bill::BillRecord;

/// Writes bill records to a CSV file next to a base path.
///
/// Each run gets its own output: a `YYYYMMDD_HHMMSS` timestamp is inserted
/// before the extension, so a previous run's file (even one held open
/// elsewhere) is never overwritten.
pub struct CsvExporter {
    base_path: PathBuf,
}

impl CsvExporter {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Export `records`, returning the path written.
    ///
    /// An empty batch produces no file: a warning is logged and `Ok(None)`
    /// is returned. A write failure is reported as [`ExportError`]; the
    /// extracted data is still in memory, so the caller decides what to do.
    pub fn export(&self, records: &[BillRecord]) -> Result<Option<PathBuf>, ExportError> {
        if records.is_empty() {
            warn!("No data to export");
            return Ok(None);
        }

        let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let path = timestamped_path(&self.base_path, &stamp);

        self.write(&path, records)
            .map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;

        info!("Data exported to: {}", path.display());
        Ok(Some(path))
    }

    fn write(&self, path: &Path, records: &[BillRecord]) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_path(path)?;
        write_rows(&mut wtr, records)?;
        wtr.flush()?;
        Ok(())
    }
}

/// Render records as CSV text (header plus rows), for stdout-style output.
pub fn to_csv_string(records: &[BillRecord]) -> Result<String, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    write_rows(&mut wtr, records)?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_rows<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    records: &[BillRecord],
) -> Result<(), csv::Error> {
    wtr.write_record(BillRecord::COLUMNS)?;

    for record in records {
        wtr.write_record([
            text(&record.account_number),
            text(&record.invoice_number),
            date(&record.billing_date),
            date(&record.due_date),
            text(&record.account_month),
            text(&record.customer_name),
            text(&record.reading_type),
            amount(record.opening_reading),
            amount(record.closing_reading),
            amount(record.consumption),
            amount(record.network_rate),
            amount(record.network_charge),
            amount(record.energy_charge),
            amount(record.total_charges),
            amount(record.vat_amount),
            amount(record.total_due),
        ])?;
    }

    Ok(())
}

/// Derive the run's output path: `<base>_<stamp>.<ext>`.
pub fn timestamped_path(base: &Path, stamp: &str) -> PathBuf {
    match base.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            let stem = base
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("export");
            base.with_file_name(format!("{}_{}.{}", stem, stamp, ext))
        }
        None => {
            let name = base
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("export");
            base.with_file_name(format!("{}_{}", name, stamp))
        }
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn date(value: &Option<chrono::NaiveDate>) -> String {
    value.map(|d| d.to_string()).unwrap_or_default()
}

/// Numeric cells are fixed-point with two decimals; absent values render
/// as 0.00.
fn amount(value: Option<Decimal>) -> String {
    format!("{:.2}", or_zero(value))
}
