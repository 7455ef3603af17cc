//! Subdiario IVA reports (ventas, compras, por tipo, por provincia).
//!
//! Each report takes the request a wizard would collect (period, company,
//! points of sale), selects invoices from an in-memory snapshot, and builds
//! a serializable context for a template engine, or a CSV spreadsheet.
//!
//! # Example
//!
//! ```ignore
//! use subdiario::report::*;
//!
//! let request = ReportRequest::year_to_date(company.id, today, default_points_of_sale(&points, company.id));
//! let report = SaleReport::build(&company, &request, &invoices, &catalog, &ReportConfig::default())?;
//! std::fs::write("subdiario_ventas.csv", report.to_csv())?;
//! ```

mod catalog;
mod purchase;
mod query;
mod render;
mod row;
mod sale;
mod summary;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::core::{Company, SubdiarioError, identifier::format_cuit};

pub use catalog::TaxCatalog;
pub use purchase::PurchaseReport;
pub use query::{InvoiceQuery, default_points_of_sale};
pub use render::{format_amount, format_rate, to_json};
pub use row::{InvoiceRow, RateAmount, ReportTotals, build_rows};
pub use sale::{
    SaleReport, SaleSubdivisionReport, SaleTypeReport, SubdivisionSection, VoucherSection,
};
pub use summary::{
    ConditionSummary, TaxConditionSummary, TaxSubdivisionSummary, TaxSummary,
    condition_summaries, tax_condition_summaries, tax_subdivision_summaries, tax_summaries,
};

/// Parameters collected by the report wizards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub company_id: u32,
    /// Point of sale ids (sales reports only).
    pub pos: Vec<u32>,
}

impl ReportRequest {
    /// Wizard defaults: January 1st of `today`'s year up to `today`.
    pub fn year_to_date(company_id: u32, today: NaiveDate, pos: Vec<u32>) -> Self {
        let from_date = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
        Self {
            from_date,
            to_date: today,
            company_id,
            pos,
        }
    }

    /// Check the period and that the request targets `company`.
    pub fn validate(&self, company: &Company) -> Result<(), SubdiarioError> {
        if self.from_date > self.to_date {
            return Err(SubdiarioError::InvalidRequest(format!(
                "from date {} is after to date {}",
                self.from_date, self.to_date
            )));
        }
        if self.company_id != company.id {
            return Err(SubdiarioError::InvalidRequest(format!(
                "request is for company {}, got company {}",
                self.company_id, company.id
            )));
        }
        Ok(())
    }

    pub(crate) fn validate_pos(&self) -> Result<(), SubdiarioError> {
        if self.pos.is_empty() {
            return Err(SubdiarioError::InvalidRequest(
                "at least one point of sale is required".into(),
            ));
        }
        Ok(())
    }
}

/// Company and period printed at the top of every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportHeader {
    pub company: String,
    /// Company CUIT as `XX-XXXXXXXX-X`, verbatim when it does not validate.
    pub company_cuit: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl ReportHeader {
    pub fn new(company: &Company, request: &ReportRequest) -> Self {
        let raw = company.cuit.clone().unwrap_or_default();
        Self {
            company: company.name.clone(),
            company_cuit: format_cuit(&raw).unwrap_or(raw),
            from_date: request.from_date,
            to_date: request.to_date,
        }
    }
}

/// Report layout options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// IVA rates broken out into their own column, as fractions.
    pub vat_rates: Vec<Decimal>,
    /// Keep cancelled vouchers that already received a number.
    pub include_cancelled_with_number: bool,
    /// CSV field separator.
    pub csv_separator: char,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            vat_rates: vec![dec!(0.105), dec!(0.21), dec!(0.27)],
            include_cancelled_with_number: true,
            csv_separator: ';',
        }
    }
}

/// Builder for [`ReportConfig`].
///
/// ```
/// use subdiario::report::ReportConfigBuilder;
/// use rust_decimal_macros::dec;
///
/// let config = ReportConfigBuilder::new()
///     .vat_rates(vec![dec!(0.21)])
///     .csv_separator(',')
///     .build();
/// assert_eq!(config.vat_rates.len(), 1);
/// ```
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ReportConfig::default(),
        }
    }

    pub fn vat_rates(mut self, rates: Vec<Decimal>) -> Self {
        self.config.vat_rates = rates;
        self
    }

    pub fn include_cancelled_with_number(mut self, include: bool) -> Self {
        self.config.include_cancelled_with_number = include;
        self
    }

    pub fn csv_separator(mut self, separator: char) -> Self {
        self.config.csv_separator = separator;
        self
    }

    pub fn build(self) -> ReportConfig {
        self.config
    }
}

impl Default for ReportConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Currency;

    fn company() -> Company {
        Company {
            id: 1,
            name: "ACME SA".into(),
            cuit: Some("30500010912".into()),
            currency: Currency::ars(),
        }
    }

    #[test]
    fn year_to_date_defaults() {
        let today = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();
        let request = ReportRequest::year_to_date(1, today, vec![3]);
        assert_eq!(request.from_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(request.to_date, today);
        assert!(request.validate(&company()).is_ok());
    }

    #[test]
    fn inverted_period_rejected() {
        let request = ReportRequest {
            from_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            company_id: 1,
            pos: vec![],
        };
        assert!(matches!(
            request.validate(&company()),
            Err(SubdiarioError::InvalidRequest(_))
        ));
    }

    #[test]
    fn other_company_rejected() {
        let today = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();
        let request = ReportRequest::year_to_date(2, today, vec![]);
        assert!(request.validate(&company()).is_err());
    }

    #[test]
    fn sales_need_points_of_sale() {
        let today = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();
        assert!(ReportRequest::year_to_date(1, today, vec![]).validate_pos().is_err());
        assert!(ReportRequest::year_to_date(1, today, vec![4]).validate_pos().is_ok());
    }

    #[test]
    fn header_formats_company_cuit() {
        let today = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();
        let header = ReportHeader::new(&company(), &ReportRequest::year_to_date(1, today, vec![]));
        assert_eq!(header.company_cuit, "30-50001091-2");
    }

    #[test]
    fn default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.vat_rates, vec![dec!(0.105), dec!(0.21), dec!(0.27)]);
        assert!(config.include_cancelled_with_number);
    }
}
