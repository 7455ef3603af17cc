//! # subdiario
//!
//! IVA sub-ledgers (libros de IVA ventas y compras) for Argentine companies.
//!
//! The crate works on an in-memory snapshot of posted invoices: it selects
//! the invoices of a period, classifies every line and applied tax by its
//! AFIP kind, converts amounts into company currency at the historical rate,
//! and lays the result out as report contexts or CSV spreadsheets.
//!
//! All monetary values use [`rust_decimal::Decimal`], rounded once per
//! invoice with the currency rounding step.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use subdiario::core::*;
//!
//! let iva = TaxBuilder::new(1, "IVA Ventas 21%")
//!     .rate(dec!(0.21))
//!     .group("IVA", TaxKind::Sale, AfipKind::Gravado)
//!     .build();
//! let invoice = InvoiceBuilder::new(1, InvoiceType::Out, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
//!     .company(1)
//!     .voucher_type("001")
//!     .party(PartyBuilder::new("Cliente SA").vat_number("30712345671").build())
//!     .add_line(LineBuilder::new("Servicio", dec!(100)).tax(iva.clone()).build())
//!     .add_tax(iva, dec!(100), dec!(21))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(invoice.total_amount, dec!(121));
//! assert_eq!(format_voucher_type("001"), "001 - FACTURAS A");
//! assert_eq!(format_tax_identifier(&invoice.party), "30-71234567-1");
//! ```
//!
//! With the `aggregate` feature, the `aggregate` module sums these amounts per tax
//! and converts them into company currency; `report` builds the sub-ledgers.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice snapshot types, builders, CUIT/DNI, voucher types |
//! | `afip` | Exchange rate extraction from AFIP web service responses |
//! | `aggregate` | Per-invoice and batch tax sums in company currency |
//! | `report` | Sales/purchase sub-ledgers, JSON and CSV rendering |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "afip")]
pub mod afip;

#[cfg(feature = "aggregate")]
pub mod aggregate;

#[cfg(feature = "report")]
pub mod report;

#[cfg(feature = "core")]
pub use crate::core::*;
