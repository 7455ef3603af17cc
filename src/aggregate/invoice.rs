//! Per-invoice sums over applied taxes.

use rust_decimal::Decimal;

use super::conversion::{ConversionContext, to_company};
use super::lines::line_base_kind;
use crate::core::{AfipKind, AmountField, Invoice, InvoiceTax, LineType, SubdiarioError};

/// Shown in place of a jurisdiction when the invoice has no provincial tax.
pub const MISSING_JURISDICTION: &str = "SIN CONFIGURAR";

/// AFIP kind of an applied tax; a tax without group is a configuration error.
pub(crate) fn classify(invoice_tax: &InvoiceTax) -> Result<AfipKind, SubdiarioError> {
    invoice_tax
        .tax
        .afip_kind()
        .ok_or_else(|| SubdiarioError::MissingTaxGroup {
            tax: invoice_tax.tax.name.clone(),
        })
}

/// Sum the applied taxes accepted by `matches`, in company currency.
///
/// Every tax line is classified, so a single ungrouped tax fails the whole
/// invoice even when it would not match.
fn sum_taxes_where<F>(
    invoice: &Invoice,
    ctx: &ConversionContext,
    matches: F,
) -> Result<Decimal, SubdiarioError>
where
    F: Fn(&InvoiceTax, AfipKind) -> bool,
{
    let mut amount = Decimal::ZERO;
    for invoice_tax in &invoice.taxes {
        let kind = classify(invoice_tax)?;
        if matches(invoice_tax, kind) {
            amount += invoice_tax.amount;
        }
    }
    to_company(invoice, amount, ctx)
}

/// Sum tax amounts whose rate equals `rate` and whose group has AFIP kind `kind`.
///
/// `rate` is a fraction: `dec!(0.21)` selects 21 % taxes.
pub fn sum_matching_tax_by_rate(
    invoice: &Invoice,
    rate: Decimal,
    kind: AfipKind,
    ctx: &ConversionContext,
) -> Result<Decimal, SubdiarioError> {
    sum_taxes_where(invoice, ctx, |it, k| k == kind && it.tax.rate == Some(rate))
}

/// Sum of all taxes of one AFIP kind.
pub fn sum_taxes_of_kind(
    invoice: &Invoice,
    kind: AfipKind,
    ctx: &ConversionContext,
) -> Result<Decimal, SubdiarioError> {
    sum_taxes_where(invoice, ctx, |_, k| k == kind)
}

/// Provincial gross-income tax (IIBB) perceived on the invoice.
pub fn sum_provincial_tax(invoice: &Invoice, ctx: &ConversionContext) -> Result<Decimal, SubdiarioError> {
    sum_taxes_of_kind(invoice, AfipKind::Provincial, ctx)
}

/// National withholdings/perceptions on the invoice.
pub fn sum_national_withholding(
    invoice: &Invoice,
    ctx: &ConversionContext,
) -> Result<Decimal, SubdiarioError> {
    sum_taxes_of_kind(invoice, AfipKind::Nacional, ctx)
}

/// Taxes classified as `other`.
pub fn sum_other_taxes(invoice: &Invoice, ctx: &ConversionContext) -> Result<Decimal, SubdiarioError> {
    sum_taxes_of_kind(invoice, AfipKind::Other, ctx)
}

/// Line base of one kind (gravado, no gravado or exento), in company currency.
pub fn invoice_base(
    invoice: &Invoice,
    kind: AfipKind,
    ctx: &ConversionContext,
) -> Result<Decimal, SubdiarioError> {
    let mut amount = Decimal::ZERO;
    for line in invoice.lines.iter().filter(|l| l.line_type == LineType::Line) {
        if line_base_kind(line) == Some(kind) {
            amount += line.amount;
        }
    }
    to_company(invoice, amount, ctx)
}

/// Untaxed, tax, or total amount of the invoice in company currency.
pub fn invoice_amount(
    invoice: &Invoice,
    field: AmountField,
    ctx: &ConversionContext,
) -> Result<Decimal, SubdiarioError> {
    to_company(invoice, field.read(invoice), ctx)
}

/// Jurisdiction of the first provincial tax on the invoice.
///
/// Uses the tax subdivision when set, otherwise the tax name. Invoices
/// without provincial tax get [`MISSING_JURISDICTION`].
pub fn resolve_provincial_jurisdiction(invoice: &Invoice) -> Result<String, SubdiarioError> {
    for invoice_tax in &invoice.taxes {
        if classify(invoice_tax)? == AfipKind::Provincial {
            let tax = &invoice_tax.tax;
            return Ok(tax
                .subdivision
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_else(|| tax.name.clone()));
        }
    }
    tracing::debug!(invoice = %invoice.reference(), "no provincial tax, using placeholder jurisdiction");
    Ok(MISSING_JURISDICTION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn tax(id: u32, name: &str, rate: Option<Decimal>, kind: Option<AfipKind>) -> Tax {
        let mut builder = TaxBuilder::new(id, name);
        if let Some(rate) = rate {
            builder = builder.rate(rate);
        }
        if let Some(kind) = kind {
            builder = builder.group(kind.key(), TaxKind::Sale, kind);
        }
        builder.build()
    }

    fn invoice(taxes: Vec<(Tax, Decimal, Decimal)>) -> Invoice {
        let mut builder =
            InvoiceBuilder::new(1, InvoiceType::Out, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
                .number("00001-00000001")
                .company(1)
                .party(PartyBuilder::new("Cliente").build());
        for (t, base, amount) in taxes {
            builder = builder.add_tax(t, base, amount);
        }
        builder.build().unwrap()
    }

    #[test]
    fn matches_rate_and_kind() {
        let inv = invoice(vec![
            (tax(1, "IVA 21%", Some(dec!(0.21)), Some(AfipKind::Gravado)), dec!(100), dec!(21)),
            (tax(2, "IVA 10.5%", Some(dec!(0.105)), Some(AfipKind::Gravado)), dec!(100), dec!(10.5)),
            (tax(3, "Perc 21%", Some(dec!(0.21)), Some(AfipKind::Nacional)), dec!(100), dec!(21)),
        ]);
        let ctx = ConversionContext::default();
        assert_eq!(
            sum_matching_tax_by_rate(&inv, dec!(0.21), AfipKind::Gravado, &ctx).unwrap(),
            dec!(21.00)
        );
        assert_eq!(
            sum_matching_tax_by_rate(&inv, dec!(0.105), AfipKind::Gravado, &ctx).unwrap(),
            dec!(10.50)
        );
        assert_eq!(
            sum_matching_tax_by_rate(&inv, dec!(0.27), AfipKind::Gravado, &ctx).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn rate_compares_numerically() {
        let inv = invoice(vec![(
            tax(1, "IVA 21%", Some(dec!(0.2100)), Some(AfipKind::Gravado)),
            dec!(100),
            dec!(21),
        )]);
        let ctx = ConversionContext::default();
        assert_eq!(
            sum_matching_tax_by_rate(&inv, dec!(0.21), AfipKind::Gravado, &ctx).unwrap(),
            dec!(21)
        );
    }

    #[test]
    fn buckets_by_kind() {
        let inv = invoice(vec![
            (tax(1, "IIBB BA", None, Some(AfipKind::Provincial)), dec!(100), dec!(3)),
            (tax(2, "IIBB CABA", None, Some(AfipKind::Provincial)), dec!(100), dec!(2)),
            (tax(3, "Perc IVA", None, Some(AfipKind::Nacional)), dec!(100), dec!(1.5)),
            (tax(4, "Imp. internos", None, Some(AfipKind::Other)), dec!(100), dec!(4)),
        ]);
        let ctx = ConversionContext::default();
        assert_eq!(sum_provincial_tax(&inv, &ctx).unwrap(), dec!(5));
        assert_eq!(sum_national_withholding(&inv, &ctx).unwrap(), dec!(1.5));
        assert_eq!(sum_other_taxes(&inv, &ctx).unwrap(), dec!(4));
    }

    #[test]
    fn empty_taxes_sum_to_zero() {
        let inv = invoice(vec![]);
        let ctx = ConversionContext::default();
        assert!(sum_provincial_tax(&inv, &ctx).unwrap().is_zero());
        assert!(sum_national_withholding(&inv, &ctx).unwrap().is_zero());
        assert!(sum_other_taxes(&inv, &ctx).unwrap().is_zero());
        assert!(
            sum_matching_tax_by_rate(&inv, dec!(0.21), AfipKind::Gravado, &ctx)
                .unwrap()
                .is_zero()
        );
    }

    #[test]
    fn missing_group_fails_loudly() {
        let inv = invoice(vec![
            (tax(1, "IVA 21%", Some(dec!(0.21)), Some(AfipKind::Gravado)), dec!(100), dec!(21)),
            (tax(2, "Tasa sin grupo", None, None), dec!(100), dec!(1)),
        ]);
        let ctx = ConversionContext::default();
        let err = sum_provincial_tax(&inv, &ctx).unwrap_err();
        match err {
            SubdiarioError::MissingTaxGroup { tax } => assert_eq!(tax, "Tasa sin grupo"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(resolve_provincial_jurisdiction(&inv).is_err());
    }

    #[test]
    fn jurisdiction_from_subdivision_or_name() {
        let ba = argentine_subdivision("AR-B").unwrap();
        let with_sub = TaxBuilder::new(1, "IIBB Percepción")
            .group("IIBB", TaxKind::Sale, AfipKind::Provincial)
            .subdivision(ba)
            .build();
        let inv = invoice(vec![(with_sub, dec!(100), dec!(3))]);
        assert_eq!(resolve_provincial_jurisdiction(&inv).unwrap(), "Buenos Aires");

        let inv = invoice(vec![(
            tax(2, "IIBB Córdoba", None, Some(AfipKind::Provincial)),
            dec!(100),
            dec!(3),
        )]);
        assert_eq!(resolve_provincial_jurisdiction(&inv).unwrap(), "IIBB Córdoba");
    }

    #[test]
    fn jurisdiction_placeholder() {
        let inv = invoice(vec![(
            tax(1, "IVA 21%", Some(dec!(0.21)), Some(AfipKind::Gravado)),
            dec!(100),
            dec!(21),
        )]);
        assert_eq!(resolve_provincial_jurisdiction(&inv).unwrap(), MISSING_JURISDICTION);
    }

    #[test]
    fn amount_fields() {
        let inv = invoice(vec![(
            tax(1, "IVA 21%", Some(dec!(0.21)), Some(AfipKind::Gravado)),
            dec!(100),
            dec!(21),
        )]);
        let ctx = ConversionContext::default();
        assert_eq!(invoice_amount(&inv, AmountField::Tax, &ctx).unwrap(), dec!(21));
        assert_eq!(invoice_amount(&inv, AmountField::Total, &ctx).unwrap(), dec!(21));
        assert!(invoice_amount(&inv, AmountField::Untaxed, &ctx).unwrap().is_zero());
    }
}
