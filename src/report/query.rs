//! Invoice selection for a report period.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ReportConfig, ReportRequest};
use crate::core::{Invoice, InvoiceState, InvoiceType, PointOfSale, PosType};

/// Filter and ordering applied to an invoice snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceQuery {
    pub invoice_type: InvoiceType,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub company_id: u32,
    /// Point of sale ids; `None` keeps every invoice.
    pub pos: Option<Vec<u32>>,
    /// Keep cancelled invoices that already got a number.
    pub include_cancelled_with_number: bool,
}

impl InvoiceQuery {
    /// Sales of the requested company and points of sale.
    pub fn sales(request: &ReportRequest, config: &ReportConfig) -> Self {
        Self {
            invoice_type: InvoiceType::Out,
            from_date: request.from_date,
            to_date: request.to_date,
            company_id: request.company_id,
            pos: Some(request.pos.clone()),
            include_cancelled_with_number: config.include_cancelled_with_number,
        }
    }

    /// Purchases of the requested company; points of sale do not apply.
    pub fn purchases(request: &ReportRequest, config: &ReportConfig) -> Self {
        Self {
            invoice_type: InvoiceType::In,
            from_date: request.from_date,
            to_date: request.to_date,
            company_id: request.company_id,
            pos: None,
            include_cancelled_with_number: config.include_cancelled_with_number,
        }
    }

    fn state_matches(&self, invoice: &Invoice) -> bool {
        match invoice.state {
            InvoiceState::Posted | InvoiceState::Paid => true,
            InvoiceState::Cancelled => {
                self.include_cancelled_with_number && invoice.number.is_some()
            }
            InvoiceState::Draft | InvoiceState::Validated => false,
        }
    }

    /// Whether `invoice` belongs to the selection.
    pub fn matches(&self, invoice: &Invoice) -> bool {
        self.state_matches(invoice)
            && invoice.invoice_type == self.invoice_type
            && invoice.move_date >= self.from_date
            && invoice.move_date <= self.to_date
            && invoice.company_id == self.company_id
            && match &self.pos {
                Some(ids) => invoice.pos.as_ref().is_some_and(|p| ids.contains(&p.id)),
                None => true,
            }
    }

    /// Matching invoices in report order.
    ///
    /// Sales sort by point of sale, date, voucher type and number; purchases
    /// by date. The sort is stable, so ties keep snapshot order.
    pub fn select<'a>(&self, invoices: &'a [Invoice]) -> Vec<&'a Invoice> {
        let mut selected: Vec<&Invoice> = invoices.iter().filter(|i| self.matches(i)).collect();
        match self.invoice_type {
            InvoiceType::Out => selected.sort_by(|a, b| sale_order(a, b)),
            InvoiceType::In => selected.sort_by_key(|i| i.invoice_date),
        }
        tracing::debug!(
            candidates = invoices.len(),
            selected = selected.len(),
            from = %self.from_date,
            to = %self.to_date,
            "selected invoices"
        );
        selected
    }
}

fn sale_order(a: &Invoice, b: &Invoice) -> Ordering {
    a.pos_number()
        .cmp(&b.pos_number())
        .then(a.invoice_date.cmp(&b.invoice_date))
        .then(a.voucher_type.cmp(&b.voucher_type))
        .then(a.number.cmp(&b.number))
}

/// Points of sale preselected by the sales wizards: electronic, reported,
/// and owned by `company_id`.
pub fn default_points_of_sale(points: &[PointOfSale], company_id: u32) -> Vec<u32> {
    points
        .iter()
        .filter(|p| p.pos_type == PosType::Electronic && !p.do_not_report && p.company_id == company_id)
        .map(|p| p.id)
        .collect()
}
