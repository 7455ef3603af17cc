//! AFIP voucher type table (tabla de comprobantes).
//!
//! Codes are three-digit strings as stored on invoices ("001" = Factura A).

/// Sorted list of (code, description) pairs; sorted for binary search.
static VOUCHER_TYPES: &[(&str, &str)] = &[
    ("001", "FACTURAS A"),
    ("002", "NOTAS DE DEBITO A"),
    ("003", "NOTAS DE CREDITO A"),
    ("004", "RECIBOS A"),
    ("005", "NOTAS DE VENTA AL CONTADO A"),
    ("006", "FACTURAS B"),
    ("007", "NOTAS DE DEBITO B"),
    ("008", "NOTAS DE CREDITO B"),
    ("009", "RECIBOS B"),
    ("010", "NOTAS DE VENTA AL CONTADO B"),
    ("011", "FACTURAS C"),
    ("012", "NOTAS DE DEBITO C"),
    ("013", "NOTAS DE CREDITO C"),
    ("015", "RECIBOS C"),
    ("019", "FACTURAS DE EXPORTACION"),
    ("020", "NOTAS DE DEBITO POR OPERACIONES CON EL EXTERIOR"),
    ("021", "NOTAS DE CREDITO POR OPERACIONES CON EL EXTERIOR"),
    ("051", "FACTURAS M"),
    ("052", "NOTAS DE DEBITO M"),
    ("053", "NOTAS DE CREDITO M"),
    ("054", "RECIBOS M"),
    ("081", "TIQUE FACTURA A"),
    ("082", "TIQUE FACTURA B"),
    ("083", "TIQUE"),
    ("111", "TIQUE FACTURA C"),
    ("201", "FACTURA DE CREDITO ELECTRONICA MiPyMEs (FCE) A"),
    ("202", "NOTA DE DEBITO ELECTRONICA MiPyMEs (FCE) A"),
    ("203", "NOTA DE CREDITO ELECTRONICA MiPyMEs (FCE) A"),
    ("206", "FACTURA DE CREDITO ELECTRONICA MiPyMEs (FCE) B"),
    ("207", "NOTA DE DEBITO ELECTRONICA MiPyMEs (FCE) B"),
    ("208", "NOTA DE CREDITO ELECTRONICA MiPyMEs (FCE) B"),
    ("211", "FACTURA DE CREDITO ELECTRONICA MiPyMEs (FCE) C"),
    ("212", "NOTA DE DEBITO ELECTRONICA MiPyMEs (FCE) C"),
    ("213", "NOTA DE CREDITO ELECTRONICA MiPyMEs (FCE) C"),
];

static CREDIT_NOTES: &[&str] = &["003", "008", "013", "021", "053", "203", "208", "213"];

/// Description of an AFIP voucher type code.
pub fn voucher_description(code: &str) -> Option<&'static str> {
    VOUCHER_TYPES
        .binary_search_by(|(c, _)| (*c).cmp(code))
        .ok()
        .map(|i| VOUCHER_TYPES[i].1)
}

/// Whether `code` is a credit note voucher type.
pub fn is_credit_note(code: &str) -> bool {
    CREDIT_NOTES.binary_search(&code).is_ok()
}

/// Format a voucher type as `"001 - FACTURAS A"`.
///
/// Unknown codes are returned as-is.
pub fn format_voucher_type(code: &str) -> String {
    match voucher_description(code) {
        Some(desc) => format!("{code} - {desc}"),
        None => code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted() {
        assert!(VOUCHER_TYPES.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(CREDIT_NOTES.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn known_voucher() {
        assert_eq!(voucher_description("006"), Some("FACTURAS B"));
        assert_eq!(format_voucher_type("001"), "001 - FACTURAS A");
    }

    #[test]
    fn unknown_voucher_passthrough() {
        assert_eq!(voucher_description("999"), None);
        assert_eq!(format_voucher_type("999"), "999");
    }

    #[test]
    fn credit_notes() {
        assert!(is_credit_note("003"));
        assert!(is_credit_note("213"));
        assert!(!is_credit_note("001"));
    }
}
