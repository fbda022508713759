//! Labeled regex patterns for utility bill extraction.
//!
//! Each pattern is anchored to known label text in the bill layout and
//! captures the field value as group 1. First match wins; the patterns are
//! the de-facto schema of the documents, so each one has its own test
//! below and layout drift can be diagnosed field-by-field.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Identifiers
    pub static ref ACCOUNT_NUMBER: Regex = Regex::new(
        r"(?i)YOUR ACCOUNT NO\s+(\d+)"
    ).unwrap();

    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)TAX INVOICE NO\s+(\d+)"
    ).unwrap();

    // Dates (bills print ISO dates)
    pub static ref BILLING_DATE: Regex = Regex::new(
        r"(?i)BILLING DATE\s+(\d{4}-\d{2}-\d{2})"
    ).unwrap();

    pub static ref DUE_DATE: Regex = Regex::new(
        r"(?i)(?:CURRENT )?DUE DATE\s+(\d{4}-\d{2}-\d{2})"
    ).unwrap();

    pub static ref ACCOUNT_MONTH: Regex = Regex::new(
        r"(?i)ACCOUNT MONTH\s+([A-Z]+ \d{4})"
    ).unwrap();

    // The NAME label is followed by unrelated contact fields; the value
    // ends at a FAX marker or at the end of the line.
    pub static ref CUSTOMER_NAME: Regex = Regex::new(
        r"(?im)NAME\s+([\w,\s&]+?)(?:\s*FAX|\s*$)"
    ).unwrap();

    // Meter readings and consumption; a lone "-" marks an absent value
    pub static ref OPENING_READING: Regex = Regex::new(
        r"(?i)Opening Reading[^\d]+([\d,.]+|-)"
    ).unwrap();

    pub static ref CLOSING_READING: Regex = Regex::new(
        r"(?i)Closing Reading[^\d]+([\d,.]+|-)"
    ).unwrap();

    pub static ref CONSUMPTION: Regex = Regex::new(
        r"(?i)TOTAL ENERGY CONSUMED[^\d]+([\d,.]+|-)"
    ).unwrap();

    // Charges
    pub static ref NETWORK_RATE: Regex = Regex::new(
        r"(?i)Network Capacity Charge @ R([\d.]+) per day"
    ).unwrap();

    pub static ref NETWORK_CHARGE: Regex = Regex::new(
        r"(?i)Network Capacity Charge[^\d]+([\d,.]+|-)"
    ).unwrap();

    pub static ref ENERGY_CHARGE: Regex = Regex::new(
        r"(?i)Energy Charge[^\d]+([\d,.]+|-)"
    ).unwrap();

    pub static ref TOTAL_CHARGES: Regex = Regex::new(
        r"(?i)TOTAL CHARGES FOR BILLING PERIOD\s+R\s+([\d,.-]+)"
    ).unwrap();

    pub static ref TOTAL_DUE: Regex = Regex::new(
        r"(?i)TOTAL AMOUNT DUE\s+R\s+([\d,.-]+)(?:CR)?"
    ).unwrap();

    pub static ref READING_TYPE: Regex = Regex::new(
        r"(?i)READING TYPE:\s+(\w+)"
    ).unwrap();
}
