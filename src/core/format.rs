//! Display helpers for sub-ledger columns.

use super::identifier::{format_cuit, format_dni};
use super::types::{IdentifierKind, Party};

/// Formatted tax identifier of a party, or "" when none is usable.
///
/// Sources are tried in order: the party VAT number (CUIT), then CUIT, CUIL
/// and DNI identifiers. Values failing validation are skipped.
pub fn format_tax_identifier(party: &Party) -> String {
    if let Some(vat) = party.vat_number.as_deref() {
        match format_cuit(vat) {
            Ok(formatted) => return formatted,
            Err(e) => tracing::warn!(party = %party.name, "ignoring VAT number: {e}"),
        }
    }

    let ordered = [IdentifierKind::Cuit, IdentifierKind::Cuil, IdentifierKind::Dni];
    for kind in &ordered {
        for identifier in party.identifiers.iter().filter(|i| &i.kind == kind) {
            let formatted = match kind {
                IdentifierKind::Dni => format_dni(&identifier.code),
                _ => format_cuit(&identifier.code),
            };
            match formatted {
                Ok(formatted) => return formatted,
                Err(e) => tracing::warn!(party = %party.name, "ignoring identifier: {e}"),
            }
        }
    }
    String::new()
}

/// Two-letter abbreviation of a VAT condition key.
///
/// `exento` and `monotributo` are single words with fixed codes; other keys
/// take the initials of their first two words, split on `_` or space.
pub fn format_vat_condition_code(condition: &str) -> String {
    let condition = condition.trim().to_lowercase();
    match condition.as_str() {
        "exento" => return "EX".into(),
        "monotributo" => return "MT".into(),
        _ => {}
    }
    let words: Vec<&str> = condition
        .split(['_', ' '])
        .filter(|w| !w.is_empty())
        .collect();
    match words.as_slice() {
        [] => String::new(),
        [single] => single.chars().take(2).collect::<String>().to_uppercase(),
        [first, second, ..] => first
            .chars()
            .take(1)
            .chain(second.chars().take(1))
            .collect::<String>()
            .to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{IvaCondition, PartyIdentifier};

    fn party(vat: Option<&str>, identifiers: Vec<(IdentifierKind, &str)>) -> Party {
        Party {
            name: "Cliente".into(),
            vat_number: vat.map(Into::into),
            identifiers: identifiers
                .into_iter()
                .map(|(kind, code)| PartyIdentifier {
                    kind,
                    code: code.into(),
                })
                .collect(),
            iva_condition: None,
        }
    }

    #[test]
    fn condition_codes() {
        assert_eq!(format_vat_condition_code("responsable_inscripto"), "RI");
        assert_eq!(format_vat_condition_code("exento"), "EX");
        assert_eq!(format_vat_condition_code("monotributo"), "MT");
        assert_eq!(format_vat_condition_code("consumidor_final"), "CF");
        assert_eq!(format_vat_condition_code("no_alcanzado"), "NA");
        assert_eq!(format_vat_condition_code("Consumidor Final"), "CF");
        assert_eq!(format_vat_condition_code(""), "");
    }

    #[test]
    fn enum_codes_match_keys() {
        assert_eq!(IvaCondition::ResponsableInscripto.code(), "RI");
        assert_eq!(IvaCondition::Exento.code(), "EX");
    }

    #[test]
    fn vat_number_first() {
        let p = party(
            Some("20267565393"),
            vec![(IdentifierKind::Dni, "26756539")],
        );
        assert_eq!(format_tax_identifier(&p), "20-26756539-3");
    }

    #[test]
    fn falls_back_to_identifiers() {
        let p = party(
            Some("not-a-cuit"),
            vec![
                (IdentifierKind::Dni, "26756539"),
                (IdentifierKind::Cuit, "30500010912"),
            ],
        );
        assert_eq!(format_tax_identifier(&p), "30-50001091-2");
    }

    #[test]
    fn dni_when_no_cuit() {
        let p = party(None, vec![(IdentifierKind::Dni, "26756539")]);
        assert_eq!(format_tax_identifier(&p), "26.756.539");
    }

    #[test]
    fn nothing_usable_is_empty() {
        let p = party(
            None,
            vec![
                (IdentifierKind::Other("passport".into()), "AB123"),
                (IdentifierKind::Cuit, "123"),
            ],
        );
        assert_eq!(format_tax_identifier(&p), "");
    }
}
