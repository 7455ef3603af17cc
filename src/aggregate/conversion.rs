//! Conversion of invoice amounts into company currency.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::afip::latest_quotation;
use crate::core::{Company, Currency, Invoice, SubdiarioError};

/// Explicit context for every aggregation: the currency reports are kept in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionContext {
    pub company_currency: Currency,
}

impl ConversionContext {
    pub fn new(company_currency: Currency) -> Self {
        Self { company_currency }
    }
}

impl From<&Company> for ConversionContext {
    fn from(company: &Company) -> Self {
        Self::new(company.currency.clone())
    }
}

impl Default for ConversionContext {
    fn default() -> Self {
        Self::new(Currency::ars())
    }
}

/// Historical rate of `invoice` (company currency per invoice unit).
///
/// Same currency gives 1. Otherwise the invoice's own rate is used, then the
/// quotation of its latest approved AFIP transaction. Without either the
/// invoice cannot be reported.
pub fn exchange_rate(invoice: &Invoice, ctx: &ConversionContext) -> Result<Decimal, SubdiarioError> {
    if invoice.currency.same_as(&ctx.company_currency) {
        return Ok(Decimal::ONE);
    }
    if let Some(rate) = invoice.currency_rate {
        return Ok(rate);
    }
    latest_quotation(&invoice.afip_transactions)?.ok_or_else(|| {
        SubdiarioError::MissingExchangeRate {
            invoice: invoice.reference(),
            currency: invoice.currency.code.clone(),
        }
    })
}

/// Round an invoice-currency amount into company currency.
///
/// In the same currency this is the invoice currency rounding. Otherwise the
/// amount is converted first and rounded with the company currency.
pub fn to_company(
    invoice: &Invoice,
    amount: Decimal,
    ctx: &ConversionContext,
) -> Result<Decimal, SubdiarioError> {
    if amount.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let overflow =
        || SubdiarioError::Overflow(format!("{amount} on invoice {}", invoice.reference()));
    if invoice.currency.same_as(&ctx.company_currency) {
        return invoice.currency.round(amount).ok_or_else(overflow);
    }
    let rate = exchange_rate(invoice, ctx)?;
    amount
        .checked_mul(rate)
        .and_then(|converted| ctx.company_currency.round(converted))
        .ok_or_else(overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InvoiceBuilder, InvoiceType, PartyBuilder};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn usd_invoice() -> InvoiceBuilder {
        InvoiceBuilder::new(7, InvoiceType::Out, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap())
            .number("00002-00000010")
            .company(1)
            .currency(Currency::usd())
            .party(PartyBuilder::new("Export SA").build())
    }

    #[test]
    fn same_currency_only_rounds() {
        let invoice = usd_invoice().currency(Currency::ars()).build().unwrap();
        let ctx = ConversionContext::default();
        assert_eq!(exchange_rate(&invoice, &ctx).unwrap(), Decimal::ONE);
        assert_eq!(to_company(&invoice, dec!(10.005), &ctx).unwrap(), dec!(10.00));
    }

    #[test]
    fn invoice_rate_preferred() {
        let invoice = usd_invoice()
            .currency_rate(dec!(850))
            .add_afip_transaction("A", "<R><MonCotiz>900</MonCotiz></R>")
            .build()
            .unwrap();
        let ctx = ConversionContext::default();
        assert_eq!(to_company(&invoice, dec!(2.5), &ctx).unwrap(), dec!(2125.00));
    }

    #[test]
    fn conversion_before_rounding() {
        let invoice = usd_invoice().currency_rate(dec!(3)).build().unwrap();
        let ctx = ConversionContext::default();
        // 0.333 * 3 = 0.999, rounding first would give 0.99
        assert_eq!(to_company(&invoice, dec!(0.333), &ctx).unwrap(), dec!(1.00));
    }

    #[test]
    fn quotation_from_transaction() {
        let invoice = usd_invoice()
            .add_afip_transaction("A", "<R><MonCotiz>900</MonCotiz></R>")
            .build()
            .unwrap();
        let ctx = ConversionContext::default();
        assert_eq!(exchange_rate(&invoice, &ctx).unwrap(), dec!(900));
    }

    #[test]
    fn missing_rate_fails() {
        let invoice = usd_invoice().build().unwrap();
        let ctx = ConversionContext::default();
        let err = to_company(&invoice, dec!(1), &ctx).unwrap_err();
        assert!(matches!(err, SubdiarioError::MissingExchangeRate { .. }));
        assert!(err.to_string().contains("00002-00000010"));
    }

    #[test]
    fn huge_amounts_fail_instead_of_panicking() {
        let ars = usd_invoice().currency(Currency::ars()).build().unwrap();
        let usd = usd_invoice().currency_rate(dec!(900)).build().unwrap();
        let ctx = ConversionContext::default();
        let err = to_company(&ars, Decimal::MAX, &ctx).unwrap_err();
        assert!(matches!(err, SubdiarioError::Overflow(_)));
        let err = to_company(&usd, Decimal::MAX, &ctx).unwrap_err();
        assert!(matches!(err, SubdiarioError::Overflow(_)));
    }

    #[test]
    fn zero_needs_no_rate() {
        let invoice = usd_invoice().build().unwrap();
        let ctx = ConversionContext::default();
        assert_eq!(to_company(&invoice, Decimal::ZERO, &ctx).unwrap(), Decimal::ZERO);
    }
}
