//! Summary tables printed below the sub-ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::{
    ConversionContext, Measure, sum_by_iva_condition, sum_by_tax, sum_by_tax_and_iva_condition,
    sum_by_tax_and_subdivision,
};
use crate::core::{Invoice, IvaCondition, Subdivision, SubdiarioError, Tax};

/// Neto and percibido of one tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSummary {
    pub tax_id: u32,
    pub tax: String,
    pub base: Decimal,
    pub amount: Decimal,
}

/// Neto and IVA of one counterparty VAT condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionSummary {
    pub condition: IvaCondition,
    pub code: String,
    pub label: String,
    pub base: Decimal,
    pub amount: Decimal,
}

/// Neto and percibido of one tax for one VAT condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxConditionSummary {
    pub tax_id: u32,
    pub tax: String,
    pub condition: IvaCondition,
    pub base: Decimal,
    pub amount: Decimal,
}

/// Neto and percibido of one tax in one province.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSubdivisionSummary {
    pub tax_id: u32,
    pub tax: String,
    pub subdivision: String,
    pub base: Decimal,
    pub amount: Decimal,
}

pub fn tax_summaries(
    taxes: &[&Tax],
    invoices: &[&Invoice],
    ctx: &ConversionContext,
) -> Result<Vec<TaxSummary>, SubdiarioError> {
    taxes
        .iter()
        .map(|tax| -> Result<TaxSummary, SubdiarioError> {
            Ok(TaxSummary {
                tax_id: tax.id,
                tax: tax.name.clone(),
                base: sum_by_tax(tax, invoices.iter().copied(), Measure::Base, ctx)?,
                amount: sum_by_tax(tax, invoices.iter().copied(), Measure::Amount, ctx)?,
            })
        })
        .collect()
}

pub fn condition_summaries(
    invoices: &[&Invoice],
    ctx: &ConversionContext,
) -> Result<Vec<ConditionSummary>, SubdiarioError> {
    IvaCondition::ALL
        .iter()
        .map(|condition| -> Result<ConditionSummary, SubdiarioError> {
            Ok(ConditionSummary {
                condition: *condition,
                code: condition.code(),
                label: condition.label().to_string(),
                base: sum_by_iva_condition(*condition, invoices.iter().copied(), Measure::Base, ctx)?,
                amount: sum_by_iva_condition(
                    *condition,
                    invoices.iter().copied(),
                    Measure::Amount,
                    ctx,
                )?,
            })
        })
        .collect()
}

/// Full tax × condition matrix, taxes outermost.
pub fn tax_condition_summaries(
    taxes: &[&Tax],
    invoices: &[&Invoice],
    ctx: &ConversionContext,
) -> Result<Vec<TaxConditionSummary>, SubdiarioError> {
    let mut out = Vec::with_capacity(taxes.len() * IvaCondition::ALL.len());
    for tax in taxes {
        for condition in IvaCondition::ALL {
            let sum = |measure: Measure| {
                sum_by_tax_and_iva_condition(tax, condition, invoices.iter().copied(), measure, ctx)
            };
            out.push(TaxConditionSummary {
                tax_id: tax.id,
                tax: tax.name.clone(),
                condition,
                base: sum(Measure::Base)?,
                amount: sum(Measure::Amount)?,
            });
        }
    }
    Ok(out)
}

/// Tax × province matrix; combinations without movement are left out.
pub fn tax_subdivision_summaries(
    taxes: &[&Tax],
    subdivisions: &[Subdivision],
    invoices: &[&Invoice],
    ctx: &ConversionContext,
) -> Result<Vec<TaxSubdivisionSummary>, SubdiarioError> {
    let mut out = Vec::new();
    for tax in taxes {
        for subdivision in subdivisions {
            let sum = |measure: Measure| {
                sum_by_tax_and_subdivision(tax, subdivision, invoices.iter().copied(), measure, ctx)
            };
            let base = sum(Measure::Base)?;
            let amount = sum(Measure::Amount)?;
            if base.is_zero() && amount.is_zero() {
                continue;
            }
            out.push(TaxSubdivisionSummary {
                tax_id: tax.id,
                tax: tax.name.clone(),
                subdivision: subdivision.name.clone(),
                base,
                amount,
            });
        }
    }
    Ok(out)
}
