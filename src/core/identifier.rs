//! CUIT/CUIL and DNI validation and formatting.

use super::error::IdentifierError;

/// Valid CUIT/CUIL type prefixes (persons, companies, and special ranges).
const CUIT_PREFIXES: &[&str] = &["20", "23", "24", "27", "30", "33", "34", "50", "51", "55"];

const CUIT_WEIGHTS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

fn digits_only(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '/'))
        .collect()
}

/// Modulo 11 check digit of the first ten CUIT digits.
///
/// A result of 10 maps to 9, as AFIP assigns it.
pub fn cuit_check_digit(first_ten: &str) -> Option<u32> {
    if first_ten.len() != 10 {
        return None;
    }
    let mut sum = 0;
    for (ch, weight) in first_ten.chars().zip(CUIT_WEIGHTS) {
        sum += ch.to_digit(10)? * weight;
    }
    Some(match 11 - sum % 11 {
        11 => 0,
        10 => 9,
        dv => dv,
    })
}

/// Validate a CUIT/CUIL and return its 11 digits.
///
/// Accepts the common separators (dashes, dots, spaces, slashes).
pub fn validate_cuit(value: &str) -> Result<String, IdentifierError> {
    let number = digits_only(value);
    if number.len() != 11 {
        return Err(IdentifierError::new(
            value,
            format!("expected 11 digits, got {}", number.len()),
        ));
    }
    if !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(IdentifierError::new(value, "contains non-digit characters"));
    }
    if !CUIT_PREFIXES.contains(&&number[..2]) {
        return Err(IdentifierError::new(
            value,
            format!("unknown type prefix '{}'", &number[..2]),
        ));
    }
    let expected = cuit_check_digit(&number[..10])
        .ok_or_else(|| IdentifierError::new(value, "cannot compute check digit"))?;
    let given = number[10..].parse::<u32>().unwrap_or(u32::MAX);
    if expected != given {
        return Err(IdentifierError::new(
            value,
            format!("check digit mismatch: expected {expected}"),
        ));
    }
    Ok(number)
}

/// Validate and format a CUIT/CUIL as `XX-XXXXXXXX-X`.
pub fn format_cuit(value: &str) -> Result<String, IdentifierError> {
    let n = validate_cuit(value)?;
    Ok(format!("{}-{}-{}", &n[..2], &n[2..10], &n[10..]))
}

/// Validate a DNI and return its 7 or 8 digits.
pub fn validate_dni(value: &str) -> Result<String, IdentifierError> {
    let number = digits_only(value);
    if !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(IdentifierError::new(value, "contains non-digit characters"));
    }
    if !(7..=8).contains(&number.len()) {
        return Err(IdentifierError::new(
            value,
            format!("expected 7 or 8 digits, got {}", number.len()),
        ));
    }
    Ok(number)
}

/// Validate and format a DNI with thousands dots (`20.123.456`).
pub fn format_dni(value: &str) -> Result<String, IdentifierError> {
    let n = validate_dni(value)?;
    let split = n.len() - 6;
    Ok(format!("{}.{}.{}", &n[..split], &n[split..split + 3], &n[split + 3..]))
}
