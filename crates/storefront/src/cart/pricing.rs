//! Order pricing derived from the cart lines.
//!
//! Every amount is kept at full decimal precision; only the `display_*`
//! helpers round, and only to produce strings.

use farmstand_core::{CurrencyCode, Price};
use rust_decimal::Decimal;
use serde::Serialize;

use super::CartLine;

/// Flat shipping fee charged on any non-empty cart.
pub const SHIPPING_FEE: Decimal = Decimal::from_parts(500, 0, 0, false, 2);

/// Flat sales tax rate applied to the subtotal.
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Subtotal, shipping, tax and total for a set of cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub currency_code: CurrencyCode,
}

impl PriceBreakdown {
    /// Price a list of cart lines.
    #[must_use]
    pub fn for_lines(lines: &[CartLine]) -> Self {
        let currency_code = lines
            .first()
            .map(|line| line.unit_price.currency_code)
            .unwrap_or_default();
        let subtotal: Decimal = lines.iter().map(|line| line.line_total().amount).sum();
        let shipping = if lines.is_empty() {
            Decimal::ZERO
        } else {
            SHIPPING_FEE
        };
        let tax = subtotal * TAX_RATE;

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
            currency_code,
        }
    }

    fn price(&self, amount: Decimal) -> Price {
        Price::new(amount, self.currency_code)
    }

    #[must_use]
    pub fn display_subtotal(&self) -> String {
        self.price(self.subtotal).display()
    }

    #[must_use]
    pub fn display_shipping(&self) -> String {
        self.price(self.shipping).display()
    }

    #[must_use]
    pub fn display_tax(&self) -> String {
        self.price(self.tax).display()
    }

    #[must_use]
    pub fn display_total(&self) -> String {
        self.price(self.total).display()
    }
}
