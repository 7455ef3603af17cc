use thiserror::Error;

/// Errors that can occur while aggregating or rendering a sub-ledger.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubdiarioError {
    /// A tax applied to an invoice has no tax group, so it cannot be
    /// classified into an AFIP bucket.
    #[error("missing tax group on tax '{tax}'")]
    MissingTaxGroup {
        /// Name of the offending tax.
        tax: String,
    },

    /// The invoice is in a foreign currency and no historical rate is known.
    #[error("no exchange rate available for invoice {invoice} ({currency})")]
    MissingExchangeRate {
        /// Invoice number (or id when unnumbered).
        invoice: String,
        /// Invoice currency code.
        currency: String,
    },

    /// An amount fell outside the representable decimal range.
    #[error("amount overflow: {0}")]
    Overflow(String),

    /// The report request is inconsistent (e.g. from_date after to_date).
    #[error("invalid report request: {0}")]
    InvalidRequest(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// AFIP XML response could not be read.
    #[error("XML error: {0}")]
    Xml(String),

    /// Report context could not be rendered.
    #[error("render error: {0}")]
    Render(String),
}

/// Error returned when a CUIT/CUIL or DNI fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierError {
    /// The rejected input value.
    pub value: String,
    /// Why the value failed validation.
    pub reason: String,
}

impl IdentifierError {
    pub fn new(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid identifier '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for IdentifierError {}
