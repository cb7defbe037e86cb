//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are stored at full precision. Rounding to cents only happens when
//! a value is formatted for display, so repeated recomputation never
//! accumulates rounding error.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places shown to shoppers.
const DISPLAY_SCALE: u32 = 2;

/// Round an amount the way it is shown to shoppers (2 places, half away from zero).
///
/// ```
/// use farmstand_core::round_for_display;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_for_display(Decimal::new(233_276, 4)), Decimal::new(2333, 2));
/// ```
#[must_use]
pub fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a US dollar price.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// Create a price from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(cents, DISPLAY_SCALE), currency_code)
    }

    /// Multiply the unit price by a quantity, keeping full precision.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}{:.2}",
            self.currency_code.symbol(),
            round_for_display(self.amount)
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(Price::usd(Decimal::new(233_276, 4)).display(), "$23.33");
        assert_eq!(Price::usd(Decimal::new(1_3575, 4)).display(), "$1.36");
        assert_eq!(Price::usd(Decimal::new(5, 0)).display(), "$5.00");
    }

    #[test]
    fn test_times_keeps_precision() {
        let unit = Price::usd(Decimal::new(499, 2));
        assert_eq!(unit.times(2).amount, Decimal::new(998, 2));
        assert_eq!(unit.times(0).amount, Decimal::ZERO);
    }

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(1299, CurrencyCode::USD);
        assert_eq!(price.amount, Decimal::new(1299, 2));
        assert_eq!(price.to_string(), "$12.99");
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(Price::from_cents(100, CurrencyCode::EUR).display(), "€1.00");
        assert_eq!(Price::from_cents(100, CurrencyCode::GBP).display(), "£1.00");
        assert_eq!(CurrencyCode::CAD.code(), "CAD");
    }

    #[test]
    fn test_price_deserializes_string_amount_with_default_currency() {
        let price: Price = serde_json::from_str(r#"{"amount":"4.99"}"#).unwrap();
        assert_eq!(price, Price::usd(Decimal::new(499, 2)));
    }
}
