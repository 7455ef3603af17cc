//! Exchange rate (`MonCotiz`) extraction from WSFEv1 responses.

use quick_xml::Reader;
use quick_xml::events::Event;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::core::{AfipTransaction, SubdiarioError};

const QUOTATION_ELEMENT: &str = "MonCotiz";

/// Read the first `MonCotiz` value of a WSFEv1 XML response.
///
/// Namespace prefixes are ignored. Returns `Ok(None)` when the response
/// carries no quotation, and an error when the XML or the value is malformed.
pub fn extract_quotation(xml: &str) -> Result<Option<Decimal>, SubdiarioError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut inside = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                inside = e.local_name().as_ref() == QUOTATION_ELEMENT.as_bytes();
            }
            Ok(Event::Text(ref e)) if inside => {
                let text = e.unescape().map_err(|e| {
                    SubdiarioError::Xml(format!("bad {QUOTATION_ELEMENT} text: {e}"))
                })?;
                let rate = Decimal::from_str(text.trim()).map_err(|e| {
                    SubdiarioError::Xml(format!("bad {QUOTATION_ELEMENT} value '{text}': {e}"))
                })?;
                return Ok(Some(rate));
            }
            Ok(Event::End(_)) => inside = false,
            Ok(Event::Eof) => return Ok(None),
            Err(e) => {
                return Err(SubdiarioError::Xml(format!(
                    "XML parse error at {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
    }
}

/// Quotation of the most recent approved transaction that carries one.
///
/// Rejected transactions are skipped. A malformed response on an approved
/// transaction is an error, not a fallback to an older one.
pub fn latest_quotation(
    transactions: &[AfipTransaction],
) -> Result<Option<Decimal>, SubdiarioError> {
    for transaction in transactions.iter().rev().filter(|t| t.is_approved()) {
        if let Some(rate) = extract_quotation(&transaction.xml_response)? {
            return Ok(Some(rate));
        }
    }
    Ok(None)
}
