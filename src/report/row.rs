//! One sub-ledger line per invoice, and column totals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ReportConfig;
use crate::aggregate::{
    ConversionContext, invoice_amount, invoice_base, main_account, main_concept,
    resolve_provincial_jurisdiction, sum_matching_tax_by_rate, sum_national_withholding,
    sum_other_taxes, sum_provincial_tax,
};
use crate::core::{
    AfipKind, AmountField, Invoice, InvoiceState, SubdiarioError, format_tax_identifier,
    format_voucher_type,
};

/// IVA amount for one rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateAmount {
    /// Rate as a fraction (0.21).
    pub rate: Decimal,
    pub amount: Decimal,
}

/// Sub-ledger row for one invoice; amounts in company currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRow {
    pub invoice_id: u32,
    pub date: NaiveDate,
    pub pos: u32,
    pub number: String,
    /// Formatted voucher type (`"001 - FACTURAS A"`).
    pub voucher_type: String,
    pub credit_note: bool,
    pub cancelled: bool,
    pub party: String,
    pub tax_identifier: String,
    /// Two-letter IVA condition code ("" when unknown).
    pub iva_condition: String,
    pub subdivision: String,
    pub address: String,
    pub concept: String,
    pub account: String,
    pub taxed_base: Decimal,
    pub untaxed_base: Decimal,
    pub exempt_base: Decimal,
    pub vat: Vec<RateAmount>,
    pub provincial: Decimal,
    pub national: Decimal,
    pub other: Decimal,
    pub jurisdiction: String,
    pub untaxed_amount: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

impl InvoiceRow {
    pub fn build(
        invoice: &Invoice,
        config: &ReportConfig,
        ctx: &ConversionContext,
    ) -> Result<Self, SubdiarioError> {
        let mut vat = Vec::with_capacity(config.vat_rates.len());
        for rate in &config.vat_rates {
            vat.push(RateAmount {
                rate: *rate,
                amount: sum_matching_tax_by_rate(invoice, *rate, AfipKind::Gravado, ctx)?,
            });
        }

        Ok(Self {
            invoice_id: invoice.id,
            date: invoice.invoice_date,
            pos: invoice.pos_number(),
            number: invoice.number.clone().unwrap_or_default(),
            voucher_type: invoice
                .voucher_type
                .as_deref()
                .map(format_voucher_type)
                .unwrap_or_default(),
            credit_note: invoice.is_credit_note(),
            cancelled: invoice.state == InvoiceState::Cancelled,
            party: invoice.party.name.clone(),
            tax_identifier: format_tax_identifier(&invoice.party),
            iva_condition: invoice
                .party
                .iva_condition
                .map(|c| c.code())
                .unwrap_or_default(),
            subdivision: invoice.subdivision_name(),
            address: invoice.address_line(),
            concept: main_concept(&invoice.lines),
            account: main_account(&invoice.lines),
            taxed_base: invoice_base(invoice, AfipKind::Gravado, ctx)?,
            untaxed_base: invoice_base(invoice, AfipKind::NoGravado, ctx)?,
            exempt_base: invoice_base(invoice, AfipKind::Exento, ctx)?,
            vat,
            provincial: sum_provincial_tax(invoice, ctx)?,
            national: sum_national_withholding(invoice, ctx)?,
            other: sum_other_taxes(invoice, ctx)?,
            jurisdiction: resolve_provincial_jurisdiction(invoice)?,
            untaxed_amount: invoice_amount(invoice, AmountField::Untaxed, ctx)?,
            tax_amount: invoice_amount(invoice, AmountField::Tax, ctx)?,
            total_amount: invoice_amount(invoice, AmountField::Total, ctx)?,
        })
    }
}

/// Build rows for a selection, stopping at the first configuration error.
pub fn build_rows(
    invoices: &[&Invoice],
    config: &ReportConfig,
    ctx: &ConversionContext,
) -> Result<Vec<InvoiceRow>, SubdiarioError> {
    invoices
        .iter()
        .map(|invoice| InvoiceRow::build(invoice, config, ctx))
        .collect()
}

/// Column totals of a set of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub count: usize,
    pub taxed_base: Decimal,
    pub untaxed_base: Decimal,
    pub exempt_base: Decimal,
    pub vat: Vec<RateAmount>,
    pub provincial: Decimal,
    pub national: Decimal,
    pub other: Decimal,
    pub untaxed_amount: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

impl ReportTotals {
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a InvoiceRow>, vat_rates: &[Decimal]) -> Self {
        let mut totals = Self {
            count: 0,
            taxed_base: Decimal::ZERO,
            untaxed_base: Decimal::ZERO,
            exempt_base: Decimal::ZERO,
            vat: vat_rates
                .iter()
                .map(|rate| RateAmount {
                    rate: *rate,
                    amount: Decimal::ZERO,
                })
                .collect(),
            provincial: Decimal::ZERO,
            national: Decimal::ZERO,
            other: Decimal::ZERO,
            untaxed_amount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            total_amount: Decimal::ZERO,
        };
        for row in rows {
            totals.count += 1;
            totals.taxed_base += row.taxed_base;
            totals.untaxed_base += row.untaxed_base;
            totals.exempt_base += row.exempt_base;
            for (total, cell) in totals.vat.iter_mut().zip(&row.vat) {
                total.amount += cell.amount;
            }
            totals.provincial += row.provincial;
            totals.national += row.national;
            totals.other += row.other;
            totals.untaxed_amount += row.untaxed_amount;
            totals.tax_amount += row.tax_amount;
            totals.total_amount += row.total_amount;
        }
        totals
    }

    /// IVA total for `rate`, zero when the rate is not broken out.
    pub fn vat_for(&self, rate: Decimal) -> Decimal {
        self.vat
            .iter()
            .find(|v| v.rate == rate)
            .map(|v| v.amount)
            .unwrap_or(Decimal::ZERO)
    }
}
