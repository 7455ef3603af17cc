//! Core record types, builders, and formatting helpers.
//!
//! Everything here is a read-only snapshot of what the ledger holds:
//! invoices, their lines and applied taxes, parties, and tax definitions.

mod builder;
mod currency;
mod error;
mod format;
pub mod identifier;
mod subdivisions;
mod types;
mod vouchers;

pub use builder::*;
pub use currency::*;
pub use error::*;
pub use format::*;
pub use subdivisions::*;
pub use types::*;
pub use vouchers::{format_voucher_type, is_credit_note, voucher_description};
