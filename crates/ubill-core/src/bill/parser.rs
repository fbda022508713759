//! Canonical bill field extraction.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::bill::BillRecord;

use super::rules::{
    first_capture, normalize_amount, normalize_date, patterns::*, vat_amount, Diagnostic,
};

/// Result of extracting one bill.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// The extracted record.
    pub record: BillRecord,
    /// Field-parse warnings collected while normalizing.
    pub diagnostics: Vec<Diagnostic>,
}

/// Rule-based bill parser.
///
/// One extraction path covers every field. Fields are pulled independently:
/// a label the document lacks leaves that field absent and never blocks the
/// others. The only ordering is VAT, computed from the total-charges capture.
pub struct BillParser {
    vat_rate: Decimal,
}

impl BillParser {
    /// Create a parser with the default 15% VAT rate.
    pub fn new() -> Self {
        Self {
            vat_rate: Decimal::new(15, 2),
        }
    }

    /// Set the VAT rate applied to total charges.
    pub fn with_vat_rate(mut self, rate: Decimal) -> Self {
        self.vat_rate = rate;
        self
    }

    /// Extract a [`BillRecord`] from bill text. Never fails: missing or
    /// malformed fields stay absent and surface as diagnostics.
    pub fn parse(&self, text: &str) -> ExtractionResult {
        let mut diagnostics = Vec::new();

        let account_number = first_capture(&ACCOUNT_NUMBER, text);
        let invoice_number = first_capture(&INVOICE_NUMBER, text);
        let account_month = first_capture(&ACCOUNT_MONTH, text);
        let customer_name = first_capture(&CUSTOMER_NAME, text);
        let reading_type = first_capture(&READING_TYPE, text);

        let billing_date = self.date(&mut diagnostics, "billing_date", &BILLING_DATE, text);
        let due_date = self.date(&mut diagnostics, "due_date", &DUE_DATE, text);

        let opening_reading =
            self.amount(&mut diagnostics, "opening_reading", &OPENING_READING, text);
        let closing_reading =
            self.amount(&mut diagnostics, "closing_reading", &CLOSING_READING, text);
        let consumption = self.amount(&mut diagnostics, "consumption", &CONSUMPTION, text);
        let network_rate = self.amount(&mut diagnostics, "network_rate", &NETWORK_RATE, text);
        let network_charge = self.amount(&mut diagnostics, "network_charge", &NETWORK_CHARGE, text);
        let energy_charge = self.amount(&mut diagnostics, "energy_charge", &ENERGY_CHARGE, text);
        let total_due = self.amount(&mut diagnostics, "total_due", &TOTAL_DUE, text);

        // VAT works from the raw capture: its no-value path is distinct
        // from the zero-defaulting of the other quantities.
        let total_charges_raw = first_capture(&TOTAL_CHARGES, text);
        let (total_charges, diag) =
            normalize_amount("total_charges", total_charges_raw.as_deref());
        diagnostics.extend(diag);
        let vat = total_charges_raw
            .as_deref()
            .and_then(|raw| vat_amount(raw, self.vat_rate));

        let record = BillRecord {
            account_number,
            invoice_number,
            billing_date,
            due_date,
            account_month,
            customer_name,
            reading_type,
            opening_reading,
            closing_reading,
            consumption,
            network_rate,
            network_charge,
            energy_charge,
            total_charges,
            vat_amount: vat,
            total_due,
        };

        debug!(
            account = record.account_number.as_deref().unwrap_or("-"),
            warnings = diagnostics.len(),
            "extracted bill record"
        );

        ExtractionResult {
            record,
            diagnostics,
        }
    }

    fn amount(
        &self,
        diagnostics: &mut Vec<Diagnostic>,
        field: &'static str,
        pattern: &regex::Regex,
        text: &str,
    ) -> Option<Decimal> {
        let raw = first_capture(pattern, text);
        let (value, diag) = normalize_amount(field, raw.as_deref());
        diagnostics.extend(diag);
        value
    }

    fn date(
        &self,
        diagnostics: &mut Vec<Diagnostic>,
        field: &'static str,
        pattern: &regex::Regex,
        text: &str,
    ) -> Option<chrono::NaiveDate> {
        let raw = first_capture(pattern, text);
        let (value, diag) = normalize_date(field, raw.as_deref());
        diagnostics.extend(diag);
        value
    }
}

impl Default for BillParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    const SAMPLE_BILL: &str = "\
ESKOM HOLDINGS SOC LTD
TAX INVOICE NO 334455667
YOUR ACCOUNT NO 1234567890
ACCOUNT MONTH MARCH 2024
BILLING DATE 2024-03-15
CURRENT DUE DATE 2024-04-05
NAME JOHN SMITH & CO FAX 011-1234567
READING TYPE: ACTUAL
Opening Reading kWh 11,438.6
Closing Reading kWh 12,295.0
TOTAL ENERGY CONSUMED (kWh) 856.40
Energy Charge 856.40 kWh x 1.2345
Network Capacity Charge @ R5.40 per day
TOTAL CHARGES FOR BILLING PERIOD R 1,219.23
TOTAL AMOUNT DUE R 1,402.11
";

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_full_bill() {
        let result = BillParser::new().parse(SAMPLE_BILL);
        let record = &result.record;

        assert_eq!(record.account_number.as_deref(), Some("1234567890"));
        assert_eq!(record.invoice_number.as_deref(), Some("334455667"));
        assert_eq!(record.account_month.as_deref(), Some("MARCH 2024"));
        assert_eq!(record.customer_name.as_deref(), Some("JOHN SMITH & CO"));
        assert_eq!(record.reading_type.as_deref(), Some("ACTUAL"));
        assert_eq!(record.billing_date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(record.due_date, NaiveDate::from_ymd_opt(2024, 4, 5));
        assert_eq!(record.opening_reading, Some(dec("11438.6")));
        assert_eq!(record.closing_reading, Some(dec("12295.0")));
        assert_eq!(record.consumption, Some(dec("856.40")));
        assert_eq!(record.network_rate, Some(dec("5.40")));
        assert_eq!(record.energy_charge, Some(dec("856.40")));
        assert_eq!(record.total_charges, Some(dec("1219.23")));
        // 15% of 1219.23, rounded
        assert_eq!(record.vat_amount, Some(dec("182.88")));
        assert_eq!(record.total_due, Some(dec("1402.11")));
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_fields_are_independent() {
        let result = BillParser::new().parse("YOUR ACCOUNT NO 42");
        let record = &result.record;

        assert_eq!(record.account_number.as_deref(), Some("42"));
        assert_eq!(record.invoice_number, None);
        assert_eq!(record.billing_date, None);
        assert_eq!(record.consumption, None);
        assert_eq!(record.vat_amount, None);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_dash_readings_stay_absent_without_warning() {
        let text = "Opening Reading kWh -\nClosing Reading kWh -";
        let result = BillParser::new().parse(text);

        assert_eq!(result.record.opening_reading, None);
        assert_eq!(result.record.closing_reading, None);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_no_vat_without_total_charges() {
        let result = BillParser::new().parse("TOTAL AMOUNT DUE R 500.00");
        assert_eq!(result.record.total_due, Some(dec("500.00")));
        assert_eq!(result.record.vat_amount, None);
    }

    #[test]
    fn test_custom_vat_rate() {
        let parser = BillParser::new().with_vat_rate(Decimal::new(20, 2));
        let result = parser.parse("TOTAL CHARGES FOR BILLING PERIOD R 1000");
        assert_eq!(result.record.vat_amount, Some(dec("200.00")));
    }

    #[test]
    fn test_empty_text_yields_empty_record() {
        let result = BillParser::new().parse("");
        assert!(result.record.is_empty());
        assert!(result.diagnostics.is_empty());
    }
}
