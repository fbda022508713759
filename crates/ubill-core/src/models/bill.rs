//! Bill record data model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One extracted bill, one entry per declared field.
///
/// Every field is optional: a field the document did not yield stays `None`
/// in memory, so consumers can tell a missing charge from a zero charge.
/// The zero-default for numeric fields is applied only when rendering the
/// CSV export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillRecord {
    /// Account identifier printed on the bill.
    pub account_number: Option<String>,

    /// Tax invoice number.
    pub invoice_number: Option<String>,

    /// Date the bill was issued.
    pub billing_date: Option<NaiveDate>,

    /// Payment due date.
    pub due_date: Option<NaiveDate>,

    /// Month-year label for the account period (e.g. "MARCH 2024").
    pub account_month: Option<String>,

    /// Customer name, truncated before any trailing FAX contact field.
    pub customer_name: Option<String>,

    /// How the meter was read (e.g. "ACTUAL", "ESTIMATED").
    pub reading_type: Option<String>,

    /// Meter reading at the start of the period.
    pub opening_reading: Option<Decimal>,

    /// Meter reading at the end of the period.
    pub closing_reading: Option<Decimal>,

    /// Total energy consumed (kWh).
    pub consumption: Option<Decimal>,

    /// Network capacity charge rate (currency per day).
    pub network_rate: Option<Decimal>,

    /// Network capacity charge for the period.
    pub network_charge: Option<Decimal>,

    /// Energy charge for the period.
    pub energy_charge: Option<Decimal>,

    /// Total charges for the billing period, before VAT.
    pub total_charges: Option<Decimal>,

    /// VAT amount computed from total charges.
    pub vat_amount: Option<Decimal>,

    /// Total amount due.
    pub total_due: Option<Decimal>,
}

impl BillRecord {
    /// Column order for tabular export, matching the field declarations.
    pub const COLUMNS: [&'static str; 16] = [
        "account_number",
        "invoice_number",
        "billing_date",
        "due_date",
        "account_month",
        "customer_name",
        "reading_type",
        "opening_reading",
        "closing_reading",
        "consumption",
        "network_rate",
        "network_charge",
        "energy_charge",
        "total_charges",
        "vat_amount",
        "total_due",
    ];

    /// True when no field was extracted at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
