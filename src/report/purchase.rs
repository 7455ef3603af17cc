//! Subdiario IVA compras.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::TaxCatalog;
use super::query::InvoiceQuery;
use super::render::{CsvWriter, to_json};
use super::row::{InvoiceRow, ReportTotals, build_rows};
use super::summary::{
    ConditionSummary, TaxConditionSummary, TaxSubdivisionSummary, TaxSummary,
    condition_summaries, tax_condition_summaries, tax_subdivision_summaries, tax_summaries,
};
use super::{ReportConfig, ReportHeader, ReportRequest};
use crate::aggregate::ConversionContext;
use crate::core::{Company, Invoice, SubdiarioError, TaxKind, argentine_subdivisions};

/// Purchase sub-ledger with tax, condition and provincial summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseReport {
    pub header: ReportHeader,
    pub rows: Vec<InvoiceRow>,
    pub totals: ReportTotals,
    pub taxes: Vec<TaxSummary>,
    pub alicuotas: Vec<TaxSummary>,
    pub conditions: Vec<ConditionSummary>,
    pub tax_conditions: Vec<TaxConditionSummary>,
    /// Provincial perceptions per province, without empty combinations.
    pub provincial: Vec<TaxSubdivisionSummary>,
    #[serde(skip)]
    vat_rates: Vec<Decimal>,
    #[serde(skip)]
    separator: char,
}

impl PurchaseReport {
    /// Points of sale in `request` are ignored for purchases.
    pub fn build(
        company: &Company,
        request: &ReportRequest,
        invoices: &[Invoice],
        catalog: &TaxCatalog,
        config: &ReportConfig,
    ) -> Result<Self, SubdiarioError> {
        request.validate(company)?;
        let selected = InvoiceQuery::purchases(request, config).select(invoices);
        let ctx = ConversionContext::from(company);

        let rows = build_rows(&selected, config, &ctx)?;
        let totals = ReportTotals::from_rows(&rows, &config.vat_rates);
        let report_taxes = catalog.report_taxes(TaxKind::Purchase);
        let provincial_taxes = catalog.provincial_taxes(TaxKind::Purchase);

        Ok(Self {
            header: ReportHeader::new(company, request),
            taxes: tax_summaries(&report_taxes, &selected, &ctx)?,
            alicuotas: tax_summaries(&catalog.alicuotas(TaxKind::Purchase), &selected, &ctx)?,
            conditions: condition_summaries(&selected, &ctx)?,
            tax_conditions: tax_condition_summaries(&report_taxes, &selected, &ctx)?,
            provincial: tax_subdivision_summaries(
                &provincial_taxes,
                &argentine_subdivisions(),
                &selected,
                &ctx,
            )?,
            rows,
            totals,
            vat_rates: config.vat_rates.clone(),
            separator: config.csv_separator,
        })
    }

    pub fn to_json(&self) -> Result<String, SubdiarioError> {
        to_json(self)
    }

    pub fn to_csv(&self) -> String {
        let mut csv = CsvWriter::new(self.separator);
        csv.ledger_header(&self.vat_rates);
        for row in &self.rows {
            csv.ledger_row(row);
        }
        csv.ledger_totals("TOTAL", &self.totals);
        csv.summary(
            "Alícuotas",
            self.alicuotas.iter().map(|s| (s.tax.clone(), s.base, s.amount)),
        );
        csv.summary(
            "Impuestos",
            self.taxes.iter().map(|s| (s.tax.clone(), s.base, s.amount)),
        );
        csv.summary(
            "Condición IVA",
            self.conditions.iter().map(|s| (s.label.clone(), s.base, s.amount)),
        );
        csv.summary(
            "Impuestos por condición IVA",
            self.tax_conditions
                .iter()
                .map(|s| (format!("{} - {}", s.tax, s.condition.label()), s.base, s.amount)),
        );
        csv.summary(
            "Percepciones por provincia",
            self.provincial
                .iter()
                .map(|s| (format!("{} - {}", s.tax, s.subdivision), s.base, s.amount)),
        );
        csv.finish()
    }
}
