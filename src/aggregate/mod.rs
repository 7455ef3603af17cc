//! Tax aggregation over invoice snapshots.
//!
//! Every function is a pure reducer: it reads invoices, lines and applied
//! taxes and returns a [`Decimal`](rust_decimal::Decimal). Company currency
//! is passed explicitly through a [`ConversionContext`].
//!
//! Rounding happens once per invoice, with the invoice currency when it
//! matches the company currency. Foreign invoices are converted with their
//! historical rate first and rounded with the company currency afterwards.
//!
//! # Example
//!
//! ```
//! use subdiario::aggregate::*;
//! use subdiario::core::*;
//! use rust_decimal_macros::dec;
//! use chrono::NaiveDate;
//!
//! let iva21 = TaxBuilder::new(1, "IVA Ventas 21%")
//!     .rate(dec!(0.21))
//!     .group("IVA", TaxKind::Sale, AfipKind::Gravado)
//!     .build();
//! let invoice = InvoiceBuilder::new(1, InvoiceType::Out, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
//!     .company(1)
//!     .party(PartyBuilder::new("Cliente SA").build())
//!     .add_tax(iva21, dec!(100), dec!(21))
//!     .build()
//!     .unwrap();
//!
//! let ctx = ConversionContext::default();
//! let iva = sum_matching_tax_by_rate(&invoice, dec!(0.21), AfipKind::Gravado, &ctx).unwrap();
//! assert_eq!(iva, dec!(21.00));
//! ```

mod batch;
mod conversion;
mod invoice;
mod lines;

pub use batch::{
    Measure, sum_by_iva_condition, sum_by_tax, sum_by_tax_and_iva_condition,
    sum_by_tax_and_subdivision,
};
pub use conversion::{ConversionContext, exchange_rate, to_company};
pub use invoice::{
    MISSING_JURISDICTION, invoice_amount, invoice_base, resolve_provincial_jurisdiction,
    sum_matching_tax_by_rate, sum_national_withholding, sum_other_taxes, sum_provincial_tax,
    sum_taxes_of_kind,
};
pub use lines::{
    line_base_kind, main_account, main_concept, sum_exempt_base, sum_taxed_base,
    sum_untaxed_base,
};
