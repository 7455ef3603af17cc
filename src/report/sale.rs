//! Sales sub-ledgers: the plain subdiario and its per-voucher-type and
//! per-province variants.

use serde::{Deserialize, Serialize};

use super::catalog::TaxCatalog;
use super::query::InvoiceQuery;
use super::render::{CsvWriter, to_json};
use super::row::{InvoiceRow, ReportTotals, build_rows};
use super::summary::{
    ConditionSummary, TaxConditionSummary, TaxSummary, condition_summaries,
    tax_condition_summaries, tax_summaries,
};
use super::{ReportConfig, ReportHeader, ReportRequest};
use crate::aggregate::ConversionContext;
use crate::core::{
    Company, Invoice, Subdivision, SubdiarioError, TaxKind, argentine_subdivisions,
    format_voucher_type,
};

fn select_sales<'a>(
    company: &Company,
    request: &ReportRequest,
    invoices: &'a [Invoice],
    config: &ReportConfig,
) -> Result<Vec<&'a Invoice>, SubdiarioError> {
    request.validate(company)?;
    request.validate_pos()?;
    Ok(InvoiceQuery::sales(request, config).select(invoices))
}

/// Subdiario IVA ventas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleReport {
    pub header: ReportHeader,
    pub rows: Vec<InvoiceRow>,
    pub totals: ReportTotals,
    /// Every sales tax, active or not.
    pub taxes: Vec<TaxSummary>,
    /// Active IVA rates.
    pub alicuotas: Vec<TaxSummary>,
    pub conditions: Vec<ConditionSummary>,
    pub tax_conditions: Vec<TaxConditionSummary>,
    #[serde(skip)]
    vat_rates: Vec<rust_decimal::Decimal>,
    #[serde(skip)]
    separator: char,
}

impl SaleReport {
    pub fn build(
        company: &Company,
        request: &ReportRequest,
        invoices: &[Invoice],
        catalog: &TaxCatalog,
        config: &ReportConfig,
    ) -> Result<Self, SubdiarioError> {
        let selected = select_sales(company, request, invoices, config)?;
        let ctx = ConversionContext::from(company);
        let rows = build_rows(&selected, config, &ctx)?;
        let totals = ReportTotals::from_rows(&rows, &config.vat_rates);
        let report_taxes = catalog.report_taxes(TaxKind::Sale);

        Ok(Self {
            header: ReportHeader::new(company, request),
            taxes: tax_summaries(&report_taxes, &selected, &ctx)?,
            alicuotas: tax_summaries(&catalog.alicuotas(TaxKind::Sale), &selected, &ctx)?,
            conditions: condition_summaries(&selected, &ctx)?,
            tax_conditions: tax_condition_summaries(&report_taxes, &selected, &ctx)?,
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
        csv.finish()
    }
}

/// Sales of one point of sale and voucher type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherSection {
    pub pos: u32,
    /// Raw voucher type code ("" when unset).
    pub voucher_code: String,
    /// Formatted voucher type (`"001 - FACTURAS A"`).
    pub voucher_type: String,
    pub rows: Vec<InvoiceRow>,
    pub totals: ReportTotals,
}

/// Sales grouped by point of sale and voucher type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleTypeReport {
    pub header: ReportHeader,
    pub sections: Vec<VoucherSection>,
    pub totals: ReportTotals,
    #[serde(skip)]
    vat_rates: Vec<rust_decimal::Decimal>,
    #[serde(skip)]
    separator: char,
}

impl SaleTypeReport {
    /// Sections follow the sale order, so each (point of sale, voucher type)
    /// pair shows up once, sorted by point of sale.
    pub fn build(
        company: &Company,
        request: &ReportRequest,
        invoices: &[Invoice],
        config: &ReportConfig,
    ) -> Result<Self, SubdiarioError> {
        let selected = select_sales(company, request, invoices, config)?;
        let ctx = ConversionContext::from(company);

        let mut keys: Vec<(u32, String)> = selected
            .iter()
            .map(|i| (i.pos_number(), i.voucher_type.clone().unwrap_or_default()))
            .collect();
        keys.sort();
        keys.dedup();

        let mut sections = Vec::with_capacity(keys.len());
        for (pos, code) in keys {
            let members: Vec<&Invoice> = selected
                .iter()
                .copied()
                .filter(|i| {
                    i.pos_number() == pos && i.voucher_type.as_deref().unwrap_or_default() == code
                })
                .collect();
            let rows = build_rows(&members, config, &ctx)?;
            sections.push(VoucherSection {
                pos,
                voucher_type: format_voucher_type(&code),
                voucher_code: code,
                totals: ReportTotals::from_rows(&rows, &config.vat_rates),
                rows,
            });
        }

        let totals = ReportTotals::from_rows(
            sections.iter().flat_map(|s| s.rows.iter()),
            &config.vat_rates,
        );
        tracing::debug!(sections = sections.len(), "grouped sales by voucher type");
        Ok(Self {
            header: ReportHeader::new(company, request),
            sections,
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
        for section in &self.sections {
            csv.text(&format!("PV {:05} - {}", section.pos, section.voucher_type));
            csv.end_line();
            for row in &section.rows {
                csv.ledger_row(row);
            }
            csv.ledger_totals("Subtotal", &section.totals);
        }
        csv.ledger_totals("TOTAL", &self.totals);
        csv.finish()
    }
}

/// Sales addressed to one province; `subdivision` is `None` for invoices
/// without a known province.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubdivisionSection {
    pub subdivision: Option<Subdivision>,
    pub rows: Vec<InvoiceRow>,
    pub totals: ReportTotals,
}

/// Sales grouped by the province of the invoice address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleSubdivisionReport {
    pub header: ReportHeader,
    pub sections: Vec<SubdivisionSection>,
    pub totals: ReportTotals,
    #[serde(skip)]
    vat_rates: Vec<rust_decimal::Decimal>,
    #[serde(skip)]
    separator: char,
}

impl SaleSubdivisionReport {
    /// Provinces appear in name order and only when they have sales.
    pub fn build(
        company: &Company,
        request: &ReportRequest,
        invoices: &[Invoice],
        config: &ReportConfig,
    ) -> Result<Self, SubdiarioError> {
        let selected = select_sales(company, request, invoices, config)?;
        let ctx = ConversionContext::from(company);

        let in_subdivision = |invoice: &Invoice, subdivision: &Subdivision| {
            invoice
                .invoice_address
                .as_ref()
                .and_then(|a| a.subdivision.as_ref())
                .is_some_and(|s| s.same_as(subdivision))
        };

        let mut sections = Vec::new();
        let mut placed = 0usize;
        for subdivision in argentine_subdivisions() {
            let members: Vec<&Invoice> = selected
                .iter()
                .copied()
                .filter(|i| in_subdivision(i, &subdivision))
                .collect();
            if members.is_empty() {
                continue;
            }
            placed += members.len();
            let rows = build_rows(&members, config, &ctx)?;
            sections.push(SubdivisionSection {
                subdivision: Some(subdivision),
                totals: ReportTotals::from_rows(&rows, &config.vat_rates),
                rows,
            });
        }

        if placed < selected.len() {
            let known = argentine_subdivisions();
            let members: Vec<&Invoice> = selected
                .iter()
                .copied()
                .filter(|i| !known.iter().any(|s| in_subdivision(i, s)))
                .collect();
            tracing::warn!(
                count = members.len(),
                "sales without an Argentine province on the invoice address"
            );
            let rows = build_rows(&members, config, &ctx)?;
            sections.push(SubdivisionSection {
                subdivision: None,
                totals: ReportTotals::from_rows(&rows, &config.vat_rates),
                rows,
            });
        }

        let totals = ReportTotals::from_rows(
            sections.iter().flat_map(|s| s.rows.iter()),
            &config.vat_rates,
        );
        Ok(Self {
            header: ReportHeader::new(company, request),
            sections,
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
        for section in &self.sections {
            let title = section
                .subdivision
                .as_ref()
                .map(|s| s.name.as_str())
                .unwrap_or("Sin provincia");
            csv.text(title);
            csv.end_line();
            for row in &section.rows {
                csv.ledger_row(row);
            }
            csv.ledger_totals("Subtotal", &section.totals);
        }
        csv.ledger_totals("TOTAL", &self.totals);
        csv.finish()
    }
}
