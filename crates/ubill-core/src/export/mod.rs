//! Tabular export of extracted bill records.

mod csv;

pub use self::csv::{timestamped_path, to_csv_string, CsvExporter};
