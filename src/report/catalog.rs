//! Tax lookups used to lay out report summaries.

use crate::core::{AfipKind, Tax, TaxKind};

/// All tax definitions known to the ledger, active or not.
#[derive(Debug, Clone, Default)]
pub struct TaxCatalog {
    taxes: Vec<Tax>,
}

impl TaxCatalog {
    pub fn new(taxes: Vec<Tax>) -> Self {
        Self { taxes }
    }

    fn sorted<'a>(mut taxes: Vec<&'a Tax>) -> Vec<&'a Tax> {
        taxes.sort_by(|a, b| a.name.cmp(&b.name));
        taxes
    }

    /// Taxes whose group applies to `kind` (or both), including inactive ones.
    pub fn report_taxes(&self, kind: TaxKind) -> Vec<&Tax> {
        Self::sorted(
            self.taxes
                .iter()
                .filter(|t| t.group.as_ref().is_some_and(|g| g.kind.covers(kind)))
                .collect(),
        )
    }

    /// Active gravado taxes whose group is exactly `kind` (the IVA rates).
    pub fn alicuotas(&self, kind: TaxKind) -> Vec<&Tax> {
        Self::sorted(
            self.taxes
                .iter()
                .filter(|t| t.active)
                .filter(|t| {
                    t.group
                        .as_ref()
                        .is_some_and(|g| g.kind == kind && g.afip_kind == AfipKind::Gravado)
                })
                .collect(),
        )
    }

    /// Provincial taxes applying to `kind` (or both), including inactive ones.
    pub fn provincial_taxes(&self, kind: TaxKind) -> Vec<&Tax> {
        Self::sorted(
            self.taxes
                .iter()
                .filter(|t| {
                    t.group
                        .as_ref()
                        .is_some_and(|g| g.kind.covers(kind) && g.afip_kind == AfipKind::Provincial)
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TaxBuilder;
    use rust_decimal_macros::dec;

    fn catalog() -> TaxCatalog {
        TaxCatalog::new(vec![
            TaxBuilder::new(1, "IVA Ventas 21%")
                .rate(dec!(0.21))
                .group("IVA", TaxKind::Sale, AfipKind::Gravado)
                .build(),
            TaxBuilder::new(2, "IVA Compras 21%")
                .rate(dec!(0.21))
                .group("IVA", TaxKind::Purchase, AfipKind::Gravado)
                .build(),
            TaxBuilder::new(3, "IIBB Buenos Aires")
                .group("IIBB", TaxKind::Both, AfipKind::Provincial)
                .inactive()
                .build(),
            TaxBuilder::new(4, "IVA Ventas 10,5%")
                .rate(dec!(0.105))
                .group("IVA", TaxKind::Sale, AfipKind::Gravado)
                .inactive()
                .build(),
            TaxBuilder::new(5, "Sin grupo").build(),
        ])
    }

    fn names(taxes: Vec<&Tax>) -> Vec<&str> {
        taxes.into_iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn report_taxes_include_both_and_inactive() {
        let c = catalog();
        assert_eq!(
            names(c.report_taxes(TaxKind::Sale)),
            vec!["IIBB Buenos Aires", "IVA Ventas 10,5%", "IVA Ventas 21%"]
        );
        assert_eq!(
            names(c.report_taxes(TaxKind::Purchase)),
            vec!["IIBB Buenos Aires", "IVA Compras 21%"]
        );
    }

    #[test]
    fn alicuotas_are_active_gravado_of_exact_kind() {
        let c = catalog();
        assert_eq!(names(c.alicuotas(TaxKind::Sale)), vec!["IVA Ventas 21%"]);
    }

    #[test]
    fn provincial() {
        let c = catalog();
        assert_eq!(names(c.provincial_taxes(TaxKind::Purchase)), vec!["IIBB Buenos Aires"]);
    }
}
