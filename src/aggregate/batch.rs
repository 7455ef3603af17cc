//! Sums across a set of invoices, keyed by tax, VAT condition, or province.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::conversion::{ConversionContext, to_company};
use crate::core::{Invoice, IvaCondition, Subdivision, SubdiarioError, Tax};

/// Which side of a tax to sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Taxable base (neto).
    Base,
    /// Tax amount (percibido).
    Amount,
}

fn tax_on_invoice(
    tax: &Tax,
    invoice: &Invoice,
    measure: Measure,
    ctx: &ConversionContext,
) -> Result<Decimal, SubdiarioError> {
    let amount: Decimal = invoice
        .taxes
        .iter()
        .filter(|it| it.tax.id == tax.id)
        .map(|it| match measure {
            Measure::Base => it.base,
            Measure::Amount => it.amount,
        })
        .sum();
    to_company(invoice, amount, ctx)
}

fn has_condition(invoice: &Invoice, condition: IvaCondition) -> bool {
    invoice.party.iva_condition == Some(condition)
}

fn in_subdivision(invoice: &Invoice, subdivision: &Subdivision) -> bool {
    invoice
        .invoice_address
        .as_ref()
        .and_then(|a| a.subdivision.as_ref())
        .is_some_and(|s| s.same_as(subdivision))
}

/// Base or amount of `tax` over all invoices, in company currency.
pub fn sum_by_tax<'a>(
    tax: &Tax,
    invoices: impl IntoIterator<Item = &'a Invoice>,
    measure: Measure,
    ctx: &ConversionContext,
) -> Result<Decimal, SubdiarioError> {
    let mut total = Decimal::ZERO;
    for invoice in invoices {
        total += tax_on_invoice(tax, invoice, measure, ctx)?;
    }
    Ok(total)
}

/// Untaxed (`Base`) or tax (`Amount`) total of invoices whose party has `condition`.
pub fn sum_by_iva_condition<'a>(
    condition: IvaCondition,
    invoices: impl IntoIterator<Item = &'a Invoice>,
    measure: Measure,
    ctx: &ConversionContext,
) -> Result<Decimal, SubdiarioError> {
    let mut total = Decimal::ZERO;
    for invoice in invoices.into_iter().filter(|i| has_condition(i, condition)) {
        let amount = match measure {
            Measure::Base => invoice.untaxed_amount,
            Measure::Amount => invoice.tax_amount,
        };
        total += to_company(invoice, amount, ctx)?;
    }
    Ok(total)
}

/// [`sum_by_tax`] restricted to parties with `condition`.
pub fn sum_by_tax_and_iva_condition<'a>(
    tax: &Tax,
    condition: IvaCondition,
    invoices: impl IntoIterator<Item = &'a Invoice>,
    measure: Measure,
    ctx: &ConversionContext,
) -> Result<Decimal, SubdiarioError> {
    sum_by_tax(
        tax,
        invoices.into_iter().filter(|i| has_condition(i, condition)),
        measure,
        ctx,
    )
}

/// [`sum_by_tax`] restricted to invoices addressed in `subdivision`.
pub fn sum_by_tax_and_subdivision<'a>(
    tax: &Tax,
    subdivision: &Subdivision,
    invoices: impl IntoIterator<Item = &'a Invoice>,
    measure: Measure,
    ctx: &ConversionContext,
) -> Result<Decimal, SubdiarioError> {
    sum_by_tax(
        tax,
        invoices
            .into_iter()
            .filter(|i| in_subdivision(i, subdivision)),
        measure,
        ctx,
    )
}
