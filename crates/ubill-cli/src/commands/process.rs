//! Process command - extract data from a single bill file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;

use ubill_core::bill::BillParser;
use ubill_core::export::to_csv_string;
use ubill_core::models::bill::BillRecord;
use ubill_core::models::config::UbillConfig;
use ubill_core::pdf::{PdfTextSource, TextSource};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input bill PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// List field-parse warnings on stderr
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    // Load configuration
    let config = if let Some(path) = config_path {
        UbillConfig::from_file(Path::new(path))?
    } else {
        UbillConfig::default()
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let text = PdfTextSource::new().extract_text(&args.input)?;
    if text.trim().len() < config.pdf.min_text_length {
        anyhow::bail!("No text could be extracted from the PDF");
    }

    let parser = BillParser::new().with_vat_rate(config.extraction.vat_rate);
    let result = parser.parse(&text);

    // Format output
    let output = format_record(&result.record, args.format)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_warnings && !result.diagnostics.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for diag in &result.diagnostics {
            eprintln!("  - {}", diag);
        }
    }

    Ok(())
}

fn format_record(record: &BillRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => Ok(to_csv_string(std::slice::from_ref(record))?),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_text(record: &BillRecord) -> String {
    let mut output = String::new();

    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    output.push_str(&format!("Account:      {}\n", field(&record.account_number)));
    output.push_str(&format!("Invoice:      {}\n", field(&record.invoice_number)));
    output.push_str(&format!("Customer:     {}\n", field(&record.customer_name)));
    output.push_str(&format!("Month:        {}\n", field(&record.account_month)));

    if let Some(date) = record.billing_date {
        output.push_str(&format!("Billed:       {}\n", date));
    }
    if let Some(date) = record.due_date {
        output.push_str(&format!("Due:          {}\n", date));
    }

    output.push('\n');
    output.push_str(&format!("Reading type: {}\n", field(&record.reading_type)));
    if let Some(opening) = record.opening_reading {
        output.push_str(&format!("Opening:      {}\n", opening));
    }
    if let Some(closing) = record.closing_reading {
        output.push_str(&format!("Closing:      {}\n", closing));
    }
    if let Some(consumption) = record.consumption {
        output.push_str(&format!("Consumed:     {} kWh\n", consumption));
    }

    output.push('\n');
    if let Some(charges) = record.total_charges {
        output.push_str(&format!("Charges:      R {:.2}\n", charges));
    }
    if let Some(vat) = record.vat_amount {
        output.push_str(&format!("VAT:          R {:.2}\n", vat));
    }
    if let Some(due) = record.total_due {
        output.push_str(&format!("Total due:    R {:.2}\n", due));
    }

    output
}
