//! Partition of invoice line amounts by the AFIP kind of their taxes.
//!
//! Amounts stay in invoice currency; use
//! [`invoice_base`](super::invoice_base) for company-currency bases.

use rust_decimal::Decimal;

use crate::core::{AfipKind, InvoiceLine, LineType};

/// Base kind a line is reported under, if any.
///
/// Gravado wins over no gravado, which wins over exento. Lines without taxes,
/// or with only provincial/national/other taxes, have no base kind. A line
/// carrying a tax without group is unclassified and has no base kind either.
pub fn line_base_kind(line: &InvoiceLine) -> Option<AfipKind> {
    let mut best: Option<AfipKind> = None;
    for tax in &line.taxes {
        let Some(kind) = tax.afip_kind() else {
            tracing::debug!(tax = %tax.name, line = %line.description, "line tax without group");
            return None;
        };
        if !kind.is_base_kind() {
            continue;
        }
        best = match (best, kind) {
            (Some(AfipKind::Gravado), _) | (_, AfipKind::Gravado) => Some(AfipKind::Gravado),
            (Some(AfipKind::NoGravado), _) | (_, AfipKind::NoGravado) => Some(AfipKind::NoGravado),
            _ => Some(AfipKind::Exento),
        };
    }
    best
}

fn sum_base(lines: &[InvoiceLine], kind: AfipKind) -> Decimal {
    lines
        .iter()
        .filter(|l| l.line_type == LineType::Line && line_base_kind(l) == Some(kind))
        .map(|l| l.amount)
        .sum()
}

/// Amount of lines carrying a gravado tax.
pub fn sum_taxed_base(lines: &[InvoiceLine]) -> Decimal {
    sum_base(lines, AfipKind::Gravado)
}

/// Amount of lines whose strongest base tax is no gravado.
pub fn sum_untaxed_base(lines: &[InvoiceLine]) -> Decimal {
    sum_base(lines, AfipKind::NoGravado)
}

/// Amount of lines whose only base taxes are exento.
pub fn sum_exempt_base(lines: &[InvoiceLine]) -> Decimal {
    sum_base(lines, AfipKind::Exento)
}

fn largest_line(lines: &[InvoiceLine]) -> Option<&InvoiceLine> {
    lines
        .iter()
        .filter(|l| l.line_type == LineType::Line)
        .fold(None, |best: Option<&InvoiceLine>, line| match best {
            Some(b) if b.amount >= line.amount => Some(b),
            _ => Some(line),
        })
}

/// Description of the line with the largest amount ("" when none).
pub fn main_concept(lines: &[InvoiceLine]) -> String {
    largest_line(lines)
        .map(|l| l.description.clone())
        .unwrap_or_default()
}

/// Account of the line with the largest amount ("" when none).
pub fn main_account(lines: &[InvoiceLine]) -> String {
    largest_line(lines)
        .and_then(|l| l.account.clone())
        .unwrap_or_default()
}
