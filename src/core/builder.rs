use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::currency::Currency;
use super::error::SubdiarioError;
use super::types::*;

/// Builder for invoice snapshots.
///
/// ```
/// use subdiario::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let iva21 = TaxBuilder::new(1, "IVA Ventas 21%")
///     .rate(dec!(0.21))
///     .group("IVA", TaxKind::Sale, AfipKind::Gravado)
///     .build();
///
/// let invoice = InvoiceBuilder::new(1, InvoiceType::Out, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
///     .number("00001-00000001")
///     .company(1)
///     .party(PartyBuilder::new("Cliente SA").vat_number("30500010912").build())
///     .add_line(LineBuilder::new("Servicios", dec!(100)).tax(iva21.clone()).build())
///     .add_tax(iva21, dec!(100), dec!(21))
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.total_amount, dec!(121));
/// ```
pub struct InvoiceBuilder {
    id: u32,
    number: Option<String>,
    invoice_type: InvoiceType,
    state: InvoiceState,
    invoice_date: NaiveDate,
    move_date: Option<NaiveDate>,
    currency: Currency,
    currency_rate: Option<Decimal>,
    company_id: Option<u32>,
    party: Option<Party>,
    invoice_address: Option<Address>,
    pos: Option<PointOfSale>,
    voucher_type: Option<String>,
    lines: Vec<InvoiceLine>,
    taxes: Vec<InvoiceTax>,
    untaxed_amount: Option<Decimal>,
    tax_amount: Option<Decimal>,
    total_amount: Option<Decimal>,
    afip_transactions: Vec<AfipTransaction>,
}

impl InvoiceBuilder {
    pub fn new(id: u32, invoice_type: InvoiceType, invoice_date: NaiveDate) -> Self {
        Self {
            id,
            number: None,
            invoice_type,
            state: InvoiceState::Posted,
            invoice_date,
            move_date: None,
            currency: Currency::ars(),
            currency_rate: None,
            company_id: None,
            party: None,
            invoice_address: None,
            pos: None,
            voucher_type: None,
            lines: Vec::new(),
            taxes: Vec::new(),
            untaxed_amount: None,
            tax_amount: None,
            total_amount: None,
            afip_transactions: Vec::new(),
        }
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn state(mut self, state: InvoiceState) -> Self {
        self.state = state;
        self
    }

    /// Accounting date; defaults to the invoice date.
    pub fn move_date(mut self, date: NaiveDate) -> Self {
        self.move_date = Some(date);
        self
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn currency_rate(mut self, rate: Decimal) -> Self {
        self.currency_rate = Some(rate);
        self
    }

    pub fn company(mut self, company_id: u32) -> Self {
        self.company_id = Some(company_id);
        self
    }

    pub fn party(mut self, party: Party) -> Self {
        self.party = Some(party);
        self
    }

    pub fn invoice_address(mut self, address: Address) -> Self {
        self.invoice_address = Some(address);
        self
    }

    pub fn pos(mut self, pos: PointOfSale) -> Self {
        self.pos = Some(pos);
        self
    }

    pub fn voucher_type(mut self, code: impl Into<String>) -> Self {
        self.voucher_type = Some(code.into());
        self
    }

    pub fn add_line(mut self, line: InvoiceLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn add_tax(mut self, tax: Tax, base: Decimal, amount: Decimal) -> Self {
        self.taxes.push(InvoiceTax { tax, base, amount });
        self
    }

    pub fn add_afip_transaction(
        mut self,
        result: impl Into<String>,
        xml_response: impl Into<String>,
    ) -> Self {
        self.afip_transactions.push(AfipTransaction {
            result: result.into(),
            xml_response: xml_response.into(),
        });
        self
    }

    /// Override the untaxed amount instead of summing the lines.
    pub fn untaxed_amount(mut self, amount: Decimal) -> Self {
        self.untaxed_amount = Some(amount);
        self
    }

    /// Override the tax amount instead of summing the taxes.
    pub fn tax_amount(mut self, amount: Decimal) -> Self {
        self.tax_amount = Some(amount);
        self
    }

    /// Override the total instead of untaxed + tax.
    pub fn total_amount(mut self, amount: Decimal) -> Self {
        self.total_amount = Some(amount);
        self
    }

    /// Build the invoice, filling in amounts that were not set explicitly.
    pub fn build(self) -> Result<Invoice, SubdiarioError> {
        let party = self
            .party
            .ok_or_else(|| SubdiarioError::Builder("party is required".into()))?;
        let company_id = self
            .company_id
            .ok_or_else(|| SubdiarioError::Builder("company is required".into()))?;

        if self.lines.len() > 10_000 {
            return Err(SubdiarioError::Builder(
                "invoice cannot have more than 10,000 lines".into(),
            ));
        }
        if let Some(rate) = self.currency_rate {
            if rate <= Decimal::ZERO {
                return Err(SubdiarioError::Builder(format!(
                    "currency rate must be positive, got {rate}"
                )));
            }
        }
        if let Some(pos) = &self.pos {
            if pos.company_id != company_id {
                return Err(SubdiarioError::Builder(format!(
                    "point of sale {} belongs to company {}, not {company_id}",
                    pos.number, pos.company_id
                )));
            }
        }

        let untaxed_amount = self.untaxed_amount.unwrap_or_else(|| {
            self.lines
                .iter()
                .filter(|l| l.line_type == LineType::Line)
                .map(|l| l.amount)
                .sum()
        });
        let tax_amount = self
            .tax_amount
            .unwrap_or_else(|| self.taxes.iter().map(|t| t.amount).sum());
        let total_amount = self.total_amount.unwrap_or(untaxed_amount + tax_amount);

        Ok(Invoice {
            id: self.id,
            number: self.number,
            invoice_type: self.invoice_type,
            state: self.state,
            invoice_date: self.invoice_date,
            move_date: self.move_date.unwrap_or(self.invoice_date),
            currency: self.currency,
            currency_rate: self.currency_rate,
            company_id,
            party,
            invoice_address: self.invoice_address,
            pos: self.pos,
            voucher_type: self.voucher_type,
            lines: self.lines,
            taxes: self.taxes,
            untaxed_amount,
            tax_amount,
            total_amount,
            afip_transactions: self.afip_transactions,
        })
    }
}

/// Builder for invoice lines.
pub struct LineBuilder {
    line_type: LineType,
    description: String,
    account: Option<String>,
    amount: Decimal,
    taxes: Vec<Tax>,
}

impl LineBuilder {
    pub fn new(description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            line_type: LineType::Line,
            description: description.into(),
            account: None,
            amount,
            taxes: Vec::new(),
        }
    }

    pub fn line_type(mut self, line_type: LineType) -> Self {
        self.line_type = line_type;
        self
    }

    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn tax(mut self, tax: Tax) -> Self {
        self.taxes.push(tax);
        self
    }

    pub fn build(self) -> InvoiceLine {
        InvoiceLine {
            line_type: self.line_type,
            description: self.description,
            account: self.account,
            amount: self.amount,
            taxes: self.taxes,
        }
    }
}

/// Builder for counterparties.
pub struct PartyBuilder {
    name: String,
    vat_number: Option<String>,
    identifiers: Vec<PartyIdentifier>,
    iva_condition: Option<IvaCondition>,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vat_number: None,
            identifiers: Vec::new(),
            iva_condition: None,
        }
    }

    pub fn vat_number(mut self, number: impl Into<String>) -> Self {
        self.vat_number = Some(number.into());
        self
    }

    pub fn identifier(mut self, kind: IdentifierKind, code: impl Into<String>) -> Self {
        self.identifiers.push(PartyIdentifier {
            kind,
            code: code.into(),
        });
        self
    }

    pub fn iva_condition(mut self, condition: IvaCondition) -> Self {
        self.iva_condition = Some(condition);
        self
    }

    pub fn build(self) -> Party {
        Party {
            name: self.name,
            vat_number: self.vat_number,
            identifiers: self.identifiers,
            iva_condition: self.iva_condition,
        }
    }
}

/// Builder for tax definitions.
pub struct TaxBuilder {
    id: u32,
    name: String,
    rate: Option<Decimal>,
    group: Option<TaxGroup>,
    active: bool,
    subdivision: Option<Subdivision>,
}

impl TaxBuilder {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            rate: None,
            group: None,
            active: true,
            subdivision: None,
        }
    }

    /// Percentage rate as a fraction (0.21 for 21 %).
    pub fn rate(mut self, rate: Decimal) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Attach a tax group; its name defaults to the code.
    pub fn group(mut self, code: impl Into<String>, kind: TaxKind, afip_kind: AfipKind) -> Self {
        let code = code.into();
        self.group = Some(TaxGroup {
            name: code.clone(),
            code,
            kind,
            afip_kind,
        });
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn subdivision(mut self, subdivision: Subdivision) -> Self {
        self.subdivision = Some(subdivision);
        self
    }

    pub fn build(self) -> Tax {
        Tax {
            id: self.id,
            name: self.name,
            rate: self.rate,
            group: self.group,
            active: self.active,
            subdivision: self.subdivision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn amounts_computed_from_lines_and_taxes() {
        let tax = TaxBuilder::new(1, "IVA 21%")
            .rate(dec!(0.21))
            .group("IVA", TaxKind::Sale, AfipKind::Gravado)
            .build();
        let invoice = InvoiceBuilder::new(1, InvoiceType::Out, date())
            .company(1)
            .party(PartyBuilder::new("Cliente").build())
            .add_line(LineBuilder::new("a", dec!(60)).tax(tax.clone()).build())
            .add_line(LineBuilder::new("b", dec!(40)).tax(tax.clone()).build())
            .add_line(
                LineBuilder::new("subtotal", dec!(100))
                    .line_type(LineType::Subtotal)
                    .build(),
            )
            .add_tax(tax, dec!(100), dec!(21))
            .build()
            .unwrap();
        assert_eq!(invoice.untaxed_amount, dec!(100));
        assert_eq!(invoice.tax_amount, dec!(21));
        assert_eq!(invoice.total_amount, dec!(121));
        assert_eq!(invoice.move_date, date());
    }

    #[test]
    fn party_required() {
        let err = InvoiceBuilder::new(1, InvoiceType::Out, date())
            .company(1)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("party"));
    }

    #[test]
    fn company_required() {
        assert!(
            InvoiceBuilder::new(1, InvoiceType::Out, date())
                .party(PartyBuilder::new("Cliente").build())
                .build()
                .is_err()
        );
    }

    #[test]
    fn non_positive_rate_rejected() {
        assert!(
            InvoiceBuilder::new(1, InvoiceType::Out, date())
                .company(1)
                .party(PartyBuilder::new("Cliente").build())
                .currency_rate(dec!(0))
                .build()
                .is_err()
        );
    }

    #[test]
    fn pos_of_other_company_rejected() {
        let pos = PointOfSale {
            id: 1,
            number: 3,
            pos_type: PosType::Electronic,
            do_not_report: false,
            company_id: 2,
        };
        assert!(
            InvoiceBuilder::new(1, InvoiceType::Out, date())
                .company(1)
                .party(PartyBuilder::new("Cliente").build())
                .pos(pos)
                .build()
                .is_err()
        );
    }
}
