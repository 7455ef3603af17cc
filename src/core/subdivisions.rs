//! ISO 3166-2:AR jurisdictions.

use super::types::Subdivision;

/// The 24 Argentine jurisdictions (23 provinces plus CABA), sorted by name.
static AR_SUBDIVISIONS: &[(&str, &str)] = &[
    ("AR-B", "Buenos Aires"),
    ("AR-K", "Catamarca"),
    ("AR-H", "Chaco"),
    ("AR-U", "Chubut"),
    ("AR-C", "Ciudad Autónoma de Buenos Aires"),
    ("AR-X", "Córdoba"),
    ("AR-W", "Corrientes"),
    ("AR-E", "Entre Ríos"),
    ("AR-P", "Formosa"),
    ("AR-Y", "Jujuy"),
    ("AR-L", "La Pampa"),
    ("AR-F", "La Rioja"),
    ("AR-M", "Mendoza"),
    ("AR-N", "Misiones"),
    ("AR-Q", "Neuquén"),
    ("AR-R", "Río Negro"),
    ("AR-A", "Salta"),
    ("AR-J", "San Juan"),
    ("AR-D", "San Luis"),
    ("AR-Z", "Santa Cruz"),
    ("AR-S", "Santa Fe"),
    ("AR-G", "Santiago del Estero"),
    ("AR-V", "Tierra del Fuego"),
    ("AR-T", "Tucumán"),
];

/// All Argentine subdivisions, in report order.
pub fn argentine_subdivisions() -> Vec<Subdivision> {
    AR_SUBDIVISIONS
        .iter()
        .map(|(code, name)| Subdivision::new(*code, *name))
        .collect()
}

/// Look up an Argentine subdivision by ISO code.
pub fn argentine_subdivision(code: &str) -> Option<Subdivision> {
    AR_SUBDIVISIONS
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(code, name)| Subdivision::new(*code, *name))
}
