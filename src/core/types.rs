use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::Currency;

/// Company issuing (sales) or receiving (purchases) the invoices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: u32,
    pub name: String,
    /// Company CUIT, digits only or with dashes.
    pub cuit: Option<String>,
    /// Company currency; every report amount is expressed in it.
    pub currency: Currency,
}

/// Country subdivision (Argentine province or CABA).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Subdivision {
    /// ISO 3166-2 code (e.g. "AR-B").
    pub code: String,
    pub name: String,
}

impl Subdivision {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Whether both subdivisions share the ISO code, ignoring case.
    pub fn same_as(&self, other: &Subdivision) -> bool {
        self.code.eq_ignore_ascii_case(&other.code)
    }
}

/// Postal address attached to an invoice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub subdivision: Option<Subdivision>,
    /// Multi-line rendering; the first line holds the party name.
    pub full_address: String,
}

impl Address {
    /// Every line of the full address but the first, joined by spaces.
    pub fn address_line(&self) -> String {
        self.full_address
            .lines()
            .skip(1)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// VAT registration category of a counterparty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IvaCondition {
    ResponsableInscripto,
    Exento,
    ConsumidorFinal,
    Monotributo,
    NoAlcanzado,
}

impl IvaCondition {
    /// All conditions in report order.
    pub const ALL: [IvaCondition; 5] = [
        Self::ResponsableInscripto,
        Self::Exento,
        Self::ConsumidorFinal,
        Self::Monotributo,
        Self::NoAlcanzado,
    ];

    /// Selection key as stored by the ERP (e.g. "responsable_inscripto").
    pub fn key(&self) -> &'static str {
        match self {
            Self::ResponsableInscripto => "responsable_inscripto",
            Self::Exento => "exento",
            Self::ConsumidorFinal => "consumidor_final",
            Self::Monotributo => "monotributo",
            Self::NoAlcanzado => "no_alcanzado",
        }
    }

    /// Parse from the selection key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ResponsableInscripto => "IVA Responsable Inscripto",
            Self::Exento => "IVA Sujeto Exento",
            Self::ConsumidorFinal => "Consumidor Final",
            Self::Monotributo => "Responsable Monotributo",
            Self::NoAlcanzado => "No alcanzado",
        }
    }

    /// Two-letter abbreviation used in the sub-ledger columns.
    pub fn code(&self) -> String {
        super::format::format_vat_condition_code(self.key())
    }
}

/// Kind of a party identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentifierKind {
    /// Clave Única de Identificación Tributaria.
    Cuit,
    /// Clave Única de Identificación Laboral (same layout as CUIT).
    Cuil,
    /// Documento Nacional de Identidad.
    Dni,
    /// Any other scheme, kept verbatim.
    Other(String),
}

/// One identifier registered on a party.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyIdentifier {
    pub kind: IdentifierKind,
    pub code: String,
}

/// Counterparty of an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    /// Tax number stored directly on the party (a CUIT for Argentine parties).
    pub vat_number: Option<String>,
    /// Additional identifiers, in registration order.
    pub identifiers: Vec<PartyIdentifier>,
    pub iva_condition: Option<IvaCondition>,
}

/// Whether a tax group applies to sales, purchases, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxKind {
    Sale,
    Purchase,
    Both,
}

impl TaxKind {
    /// True when a group of this kind is usable on `kind` invoices.
    pub fn covers(&self, kind: TaxKind) -> bool {
        *self == TaxKind::Both || *self == kind
    }
}

/// AFIP classification of a tax group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfipKind {
    /// Taxed (IVA applies).
    Gravado,
    /// Not subject to IVA.
    NoGravado,
    /// IVA exempt.
    Exento,
    /// Provincial gross-income tax (IIBB).
    Provincial,
    /// National withholding/perception.
    Nacional,
    Other,
}

impl AfipKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Gravado => "gravado",
            Self::NoGravado => "no_gravado",
            Self::Exento => "exento",
            Self::Provincial => "provincial",
            Self::Nacional => "nacional",
            Self::Other => "other",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "gravado" => Some(Self::Gravado),
            "no_gravado" => Some(Self::NoGravado),
            "exento" => Some(Self::Exento),
            "provincial" => Some(Self::Provincial),
            "nacional" => Some(Self::Nacional),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Kinds that classify the line base (as opposed to additional taxes).
    pub fn is_base_kind(&self) -> bool {
        matches!(self, Self::Gravado | Self::NoGravado | Self::Exento)
    }
}

/// Classification metadata of a tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxGroup {
    pub code: String,
    pub name: String,
    pub kind: TaxKind,
    pub afip_kind: AfipKind,
}

/// Tax definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tax {
    pub id: u32,
    pub name: String,
    /// Percentage rate as a fraction (0.21 for 21 %); `None` for fixed taxes.
    pub rate: Option<Decimal>,
    pub group: Option<TaxGroup>,
    pub active: bool,
    /// Jurisdiction of a provincial tax.
    pub subdivision: Option<Subdivision>,
}

impl Tax {
    /// AFIP kind of the group, if the tax has one.
    pub fn afip_kind(&self) -> Option<AfipKind> {
        self.group.as_ref().map(|g| g.afip_kind)
    }
}

/// One tax applied to an invoice, in invoice currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceTax {
    pub tax: Tax,
    pub base: Decimal,
    pub amount: Decimal,
}

/// Invoice line type; only `Line` rows carry amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    Line,
    Subtotal,
    Title,
    Comment,
}

/// Invoice line, in invoice currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub line_type: LineType,
    pub description: String,
    /// Revenue/expense account name.
    pub account: Option<String>,
    pub amount: Decimal,
    pub taxes: Vec<Tax>,
}

/// Sale (`Out`) or purchase (`In`) invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceType {
    Out,
    In,
}

impl InvoiceType {
    /// Tax kind matching this invoice type.
    pub fn tax_kind(&self) -> TaxKind {
        match self {
            Self::Out => TaxKind::Sale,
            Self::In => TaxKind::Purchase,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceState {
    Draft,
    Validated,
    Posted,
    Paid,
    Cancelled,
}

/// Kind of a point of sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosType {
    Manual,
    Electronic,
    FiscalPrinter,
}

/// Point of sale (punto de venta) registered with AFIP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointOfSale {
    pub id: u32,
    pub number: u32,
    pub pos_type: PosType,
    /// Excluded from the default report selection.
    pub do_not_report: bool,
    pub company_id: u32,
}

/// One exchange with the AFIP web service, as stored on the invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AfipTransaction {
    /// Result code ("A" approved, "R" rejected, "P" partial).
    pub result: String,
    /// Raw XML response.
    pub xml_response: String,
}

impl AfipTransaction {
    pub fn is_approved(&self) -> bool {
        self.result == "A"
    }
}

/// Invoice snapshot as fetched from the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: u32,
    /// Voucher number; cancelled invoices may have none.
    pub number: Option<String>,
    pub invoice_type: InvoiceType,
    pub state: InvoiceState,
    pub invoice_date: NaiveDate,
    /// Accounting date of the move; drives the report period.
    pub move_date: NaiveDate,
    pub currency: Currency,
    /// Rate used on the invoice itself (company currency per invoice unit).
    pub currency_rate: Option<Decimal>,
    pub company_id: u32,
    pub party: Party,
    pub invoice_address: Option<Address>,
    pub pos: Option<PointOfSale>,
    /// AFIP voucher type code (e.g. "001").
    pub voucher_type: Option<String>,
    pub lines: Vec<InvoiceLine>,
    pub taxes: Vec<InvoiceTax>,
    pub untaxed_amount: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    pub afip_transactions: Vec<AfipTransaction>,
}

impl Invoice {
    /// Number for display and error messages, falling back to the id.
    pub fn reference(&self) -> String {
        self.number
            .clone()
            .unwrap_or_else(|| format!("#{}", self.id))
    }

    /// Name of the invoice address subdivision, or "" when unknown.
    pub fn subdivision_name(&self) -> String {
        self.invoice_address
            .as_ref()
            .and_then(|a| a.subdivision.as_ref())
            .map(|s| s.name.clone())
            .unwrap_or_default()
    }

    /// Address without its first line, or "" when there is no address.
    pub fn address_line(&self) -> String {
        self.invoice_address
            .as_ref()
            .map(Address::address_line)
            .unwrap_or_default()
    }

    /// Point of sale number, 0 when the invoice has none.
    pub fn pos_number(&self) -> u32 {
        self.pos.as_ref().map(|p| p.number).unwrap_or(0)
    }

    /// Whether the voucher type is a credit note.
    pub fn is_credit_note(&self) -> bool {
        self.voucher_type
            .as_deref()
            .is_some_and(super::vouchers::is_credit_note)
    }
}

/// Which invoice amount to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountField {
    Untaxed,
    Tax,
    Total,
}

impl AmountField {
    pub fn read(&self, invoice: &Invoice) -> Decimal {
        match self {
            Self::Untaxed => invoice.untaxed_amount,
            Self::Tax => invoice.tax_amount,
            Self::Total => invoice.total_amount,
        }
    }
}
