//! AFIP web service response handling.
//!
//! Only reads responses already stored on invoices; no requests are sent.
//!
//! # Example
//!
//! ```
//! use subdiario::afip::extract_quotation;
//! use rust_decimal_macros::dec;
//!
//! let xml = "<ResultGet><MonId>DOL</MonId><MonCotiz>870.5</MonCotiz></ResultGet>";
//! assert_eq!(extract_quotation(xml).unwrap(), Some(dec!(870.5)));
//! ```

mod quotation;

pub use quotation::{extract_quotation, latest_quotation};
