//! Currencies and their rounding rules.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A currency with its rounding step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 code (e.g. "ARS").
    pub code: String,
    /// Number of decimal places shown.
    pub digits: u32,
    /// Smallest representable step (e.g. 0.01).
    pub rounding: Decimal,
}

impl Currency {
    pub fn new(code: impl Into<String>, digits: u32, rounding: Decimal) -> Self {
        Self {
            code: code.into(),
            digits,
            rounding,
        }
    }

    /// Argentine peso, the usual company currency.
    pub fn ars() -> Self {
        Self::new("ARS", 2, dec!(0.01))
    }

    /// US dollar.
    pub fn usd() -> Self {
        Self::new("USD", 2, dec!(0.01))
    }

    /// Round `amount` to a multiple of the rounding step, ties to even.
    ///
    /// Returns `None` when the amount is too large to be divided into steps.
    pub fn round(&self, amount: Decimal) -> Option<Decimal> {
        if self.rounding.is_zero() {
            return Some(
                amount.round_dp_with_strategy(self.digits, RoundingStrategy::MidpointNearestEven),
            );
        }
        let steps = amount
            .checked_div(self.rounding)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
        Some(steps.checked_mul(self.rounding)?.round_dp(self.digits))
    }

    /// Whether both currencies are the same (by code).
    pub fn same_as(&self, other: &Currency) -> bool {
        self.code.eq_ignore_ascii_case(&other.code)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::ars()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_cents() {
        let ars = Currency::ars();
        assert_eq!(ars.round(dec!(10.004)), Some(dec!(10.00)));
        assert_eq!(ars.round(dec!(10.006)), Some(dec!(10.01)));
        assert_eq!(ars.round(dec!(21)), Some(dec!(21)));
    }

    #[test]
    fn ties_go_to_even() {
        let ars = Currency::ars();
        assert_eq!(ars.round(dec!(0.125)), Some(dec!(0.12)));
        assert_eq!(ars.round(dec!(0.135)), Some(dec!(0.14)));
    }

    #[test]
    fn coarse_rounding_step() {
        let cur = Currency::new("XXX", 2, dec!(0.05));
        assert_eq!(cur.round(dec!(1.02)), Some(dec!(1.00)));
        assert_eq!(cur.round(dec!(1.04)), Some(dec!(1.05)));
    }

    #[test]
    fn overflow_is_none() {
        assert_eq!(Currency::ars().round(Decimal::MAX), None);
    }

    #[test]
    fn same_currency_ignores_case() {
        assert!(Currency::ars().same_as(&Currency::new("ars", 2, dec!(0.01))));
        assert!(!Currency::ars().same_as(&Currency::usd()));
    }
}
