//! Batch processing command for a directory of bill PDFs.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use ubill_core::batch::{pdf_files, BatchOutcome, BatchProcessor, DocumentReport, DocumentStatus};
use ubill_core::bill::BillParser;
use ubill_core::export::CsvExporter;
use ubill_core::models::config::UbillConfig;
use ubill_core::pdf::PdfTextSource;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Directory containing bill PDFs
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Base path for the CSV export; a run timestamp is inserted before
    /// the extension (default: <directory>/bills_processed.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        UbillConfig::from_file(Path::new(path))?
    } else {
        UbillConfig::default()
    };

    let files = pdf_files(&args.directory)?;

    println!(
        "{} Found {} bill PDFs in {}",
        style("ℹ").blue(),
        files.len(),
        args.directory.display()
    );

    // Set up progress bar
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let parser = BillParser::new().with_vat_rate(config.extraction.vat_rate);
    let processor = BatchProcessor::with_source(PdfTextSource::new(), parser)
        .with_min_text_length(config.pdf.min_text_length);

    let mut outcome = BatchOutcome::default();
    for path in files {
        match processor.process_document(&path) {
            Ok(result) => {
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

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let failed: Vec<&DocumentReport> = outcome
        .reports
        .iter()
        .filter(|r| !r.is_processed())
        .collect();

    // Print summary
    println!();
    println!(
        "{} Attempted {} files in {:?}",
        style("✓").green(),
        outcome.reports.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(outcome.success_count()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for report in &failed {
            if let DocumentStatus::Failed { error } = &report.status {
                println!("  - {}: {}", report.path.display(), error);
            }
        }
    }

    // Export whatever was collected; empty input no-ops with a notice
    let base = args
        .output
        .unwrap_or_else(|| args.directory.join(&config.export.base_name));

    match CsvExporter::new(base).export(&outcome.records) {
        Ok(Some(path)) => println!(
            "{} Data exported to {}",
            style("✓").green(),
            path.display()
        ),
        Ok(None) => println!("{} No data to export", style("!").yellow()),
        Err(e) => eprintln!("{} Export failed: {}", style("✗").red(), e),
    }

    Ok(())
}
