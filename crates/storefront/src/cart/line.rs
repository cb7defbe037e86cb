//! Cart line items and the cart snapshot type.

use std::collections::BTreeSet;

use farmstand_core::{Price, ProductId};
use serde::Serialize;

use crate::catalog::Product;

/// One product entry in the cart.
///
/// Display fields are copied from the product when the line is created so
/// the cart renders without going back to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub farm_name: String,
    pub unit_price: Price,
    /// Always at least 1 while the line is in a cart.
    pub quantity: u32,
}

impl CartLine {
    /// Create a line holding a single unit of `product`.
    #[must_use]
    pub fn new(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            image: product.image.clone(),
            farm_name: product.farm.name.clone(),
            unit_price: product.price,
            quantity: 1,
        }
    }

    /// Unit price times quantity, at full precision.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Everything the cart store holds: the lines and the wishlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartState {
    pub(crate) lines: Vec<CartLine>,
    pub(crate) wishlist: BTreeSet<ProductId>,
}

impl CartState {
    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Wishlisted product IDs.
    #[must_use]
    pub const fn wishlist(&self) -> &BTreeSet<ProductId> {
        &self.wishlist
    }

    /// Whether the cart has no lines (the wishlist is not considered).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |sum, line| sum.saturating_add(line.quantity))
    }

    /// The line for `product_id`, if any.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    pub(crate) fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}
