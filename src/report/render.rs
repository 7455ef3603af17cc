//! JSON contexts and CSV spreadsheets for the reports.
//!
//! CSV output uses the Argentine spreadsheet locale: separator `;` by
//! default, comma decimal separator, `dd/mm/yyyy` dates, quoted text and CRLF
//! line endings.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::row::{InvoiceRow, ReportTotals};
use crate::core::SubdiarioError;

/// Serialize a report into a template-engine context.
pub fn to_json<T: Serialize>(report: &T) -> Result<String, SubdiarioError> {
    serde_json::to_string_pretty(report).map_err(|e| SubdiarioError::Render(e.to_string()))
}

/// Amount with two decimals and a decimal comma (`1234,50`).
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2)).replace('.', ",")
}

/// Rate fraction as a percentage label (`0.105` → `10,5%`).
pub fn format_rate(rate: Decimal) -> String {
    let percent = (rate * Decimal::ONE_HUNDRED).normalize();
    format!("{}%", percent.to_string().replace('.', ","))
}

pub(crate) struct CsvWriter {
    out: String,
    separator: char,
    at_line_start: bool,
}

impl CsvWriter {
    pub(crate) fn new(separator: char) -> Self {
        Self {
            out: String::new(),
            separator,
            at_line_start: true,
        }
    }

    fn begin_field(&mut self) {
        if !self.at_line_start {
            self.out.push(self.separator);
        }
        self.at_line_start = false;
    }

    pub(crate) fn text(&mut self, value: &str) {
        self.begin_field();
        self.out.push('"');
        for ch in value.chars() {
            if ch == '"' {
                self.out.push_str("\"\"");
            } else {
                self.out.push(ch);
            }
        }
        self.out.push('"');
    }

    pub(crate) fn amount(&mut self, value: Decimal) {
        self.begin_field();
        self.out.push_str(&format_amount(value));
    }

    pub(crate) fn number(&mut self, value: impl std::fmt::Display) {
        self.begin_field();
        self.out.push_str(&value.to_string());
    }

    pub(crate) fn date(&mut self, value: NaiveDate) {
        self.begin_field();
        self.out.push_str(&value.format("%d/%m/%Y").to_string());
    }

    pub(crate) fn empty(&mut self) {
        self.begin_field();
    }

    pub(crate) fn end_line(&mut self) {
        self.out.push_str("\r\n");
        self.at_line_start = true;
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    /// Header row of the sub-ledger table.
    pub(crate) fn ledger_header(&mut self, vat_rates: &[Decimal]) {
        for title in [
            "Fecha",
            "Tipo",
            "PV",
            "Número",
            "Razón social",
            "CUIT",
            "Cond. IVA",
            "Provincia",
            "Neto gravado",
            "No gravado",
            "Exento",
        ] {
            self.text(title);
        }
        for rate in vat_rates {
            self.text(&format!("IVA {}", format_rate(*rate)));
        }
        for title in ["Perc. IIBB", "Perc. nacionales", "Otros", "Jurisdicción", "Total"] {
            self.text(title);
        }
        self.end_line();
    }

    pub(crate) fn ledger_row(&mut self, row: &InvoiceRow) {
        self.date(row.date);
        self.text(&row.voucher_type);
        self.number(row.pos);
        self.text(&row.number);
        self.text(&row.party);
        self.text(&row.tax_identifier);
        self.text(&row.iva_condition);
        self.text(&row.subdivision);
        self.amount(row.taxed_base);
        self.amount(row.untaxed_base);
        self.amount(row.exempt_base);
        for cell in &row.vat {
            self.amount(cell.amount);
        }
        self.amount(row.provincial);
        self.amount(row.national);
        self.amount(row.other);
        self.text(&row.jurisdiction);
        self.amount(row.total_amount);
        self.end_line();
    }

    /// Totals line aligned under the amount columns.
    pub(crate) fn ledger_totals(&mut self, label: &str, totals: &ReportTotals) {
        self.text(label);
        for _ in 0..7 {
            self.empty();
        }
        self.amount(totals.taxed_base);
        self.amount(totals.untaxed_base);
        self.amount(totals.exempt_base);
        for cell in &totals.vat {
            self.amount(cell.amount);
        }
        self.amount(totals.provincial);
        self.amount(totals.national);
        self.amount(totals.other);
        self.empty();
        self.amount(totals.total_amount);
        self.end_line();
    }

    /// Two-column summary block (`title;neto;importe`).
    pub(crate) fn summary(
        &mut self,
        title: &str,
        entries: impl IntoIterator<Item = (String, Decimal, Decimal)>,
    ) {
        self.end_line();
        self.text(title);
        self.text("Neto");
        self.text("Importe");
        self.end_line();
        for (label, base, amount) in entries {
            self.text(&label);
            self.amount(base);
            self.amount(amount);
            self.end_line();
        }
    }
}
