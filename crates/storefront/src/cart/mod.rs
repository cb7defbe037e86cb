//! Cart store: the single source of truth for cart lines and the wishlist.
//!
//! [`CartStore`] is a cheaply cloneable handle. Every view and the checkout
//! wizard hold a clone; all clones see the same state. Mutations go through
//! a narrow API and are published on a `tokio::sync::watch` channel, so any
//! view can [`subscribe`](CartStore::subscribe) and react to changes instead
//! of polling.
//!
//! Store operations are total: unknown IDs, zero quantities and clearing an
//! empty cart are all accepted. Operations that change nothing do not notify
//! subscribers.

mod line;
pub mod pricing;

use std::sync::Arc;

use farmstand_core::ProductId;
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::catalog::Product;

pub use line::{CartLine, CartState};
pub use pricing::PriceBreakdown;

/// Shared handle to the cart.
#[derive(Debug, Clone)]
pub struct CartStore {
    state: Arc<watch::Sender<CartState>>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Create an empty cart with an empty wishlist.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(CartState::default());
        Self {
            state: Arc::new(tx),
        }
    }

    /// Observe every change to the cart.
    ///
    /// The receiver starts with the current state marked as seen; use
    /// `changed().await` to wait for the next mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of `product`.
    ///
    /// Increments the existing line for the product, or creates a new line
    /// with quantity 1.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&self, product: &Product) {
        self.state.send_modify(|state| {
            if let Some(line) = state.line_mut(product.id) {
                line.quantity = line.quantity.saturating_add(1);
                debug!(quantity = line.quantity, "Incremented cart line");
            } else {
                state.lines.push(CartLine::new(product));
                info!(name = %product.name, "Added new cart line");
            }
        });
    }

    /// Set the quantity of a line.
    ///
    /// A quantity below 1 removes the line. Updating a product that is not
    /// in the cart does nothing.
    #[instrument(skip(self))]
    pub fn update_quantity(&self, product_id: ProductId, quantity: i64) {
        if quantity < 1 {
            self.remove(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        self.state.send_if_modified(|state| match state.line_mut(product_id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                debug!("Updated cart line quantity");
                true
            }
            Some(_) => false,
            None => {
                debug!("Quantity update for product not in cart ignored");
                false
            }
        });
    }

    /// Remove the line for `product_id` if present.
    #[instrument(skip(self))]
    pub fn remove(&self, product_id: ProductId) {
        self.state.send_if_modified(|state| {
            let before = state.lines.len();
            state.lines.retain(|line| line.product_id != product_id);
            let removed = state.lines.len() != before;
            if removed {
                info!("Removed cart line");
            } else {
                debug!("Remove for product not in cart ignored");
            }
            removed
        });
    }

    /// Remove every line. The wishlist is left untouched.
    #[instrument(skip(self))]
    pub fn clear(&self) {
        self.state.send_if_modified(|state| {
            if state.lines.is_empty() {
                debug!("Clear on empty cart ignored");
                return false;
            }
            let cleared = state.lines.len();
            state.lines.clear();
            info!(cleared, "Cleared cart");
            true
        });
    }

    /// Flip wishlist membership for `product_id`.
    ///
    /// Returns `true` if the product is wishlisted after the call.
    #[instrument(skip(self))]
    pub fn toggle_wishlist(&self, product_id: ProductId) -> bool {
        let mut now_listed = false;
        self.state.send_modify(|state| {
            now_listed = state.wishlist.insert(product_id);
            if !now_listed {
                state.wishlist.remove(&product_id);
            }
        });
        debug!(wishlisted = now_listed, "Toggled wishlist");
        now_listed
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> CartState {
        self.state.borrow().clone()
    }

    /// A copy of the current lines.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.state.borrow().lines.clone()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().is_empty()
    }

    /// Units across all lines (the navbar badge).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.state.borrow().item_count()
    }

    /// Whether `product_id` is on the wishlist.
    #[must_use]
    pub fn is_wishlisted(&self, product_id: ProductId) -> bool {
        self.state.borrow().wishlist.contains(&product_id)
    }

    /// Wishlisted product IDs in ascending order.
    #[must_use]
    pub fn wishlist(&self) -> Vec<ProductId> {
        self.state.borrow().wishlist.iter().copied().collect()
    }

    /// Subtotal, shipping, tax and total for the current lines.
    #[must_use]
    pub fn totals(&self) -> PriceBreakdown {
        PriceBreakdown::for_lines(&self.state.borrow().lines)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use farmstand_core::{FarmId, Price};
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::FarmRef;

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_cents(cents, farmstand_core::CurrencyCode::USD),
            image: format!("https://img.example/{id}.jpg"),
            description: String::new(),
            farm: FarmRef {
                id: FarmId::new(1),
                name: "Miller's Family Farm".to_string(),
            },
            category: "Vegetables".to_string(),
            organic: true,
            in_stock: true,
        }
    }

    #[test]
    fn test_add_same_product_twice_merges_lines() {
        let cart = CartStore::new();
        let tomatoes = product(1, 499);

        cart.add(&tomatoes);
        cart.add(&tomatoes);

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().unwrap().quantity, 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_snapshots_display_fields() {
        let cart = CartStore::new();
        cart.add(&product(4, 399));

        let line = cart.snapshot().line(ProductId::new(4)).cloned().unwrap();
        assert_eq!(line.name, "Product 4");
        assert_eq!(line.farm_name, "Miller's Family Farm");
        assert_eq!(line.image, "https://img.example/4.jpg");
        assert_eq!(line.unit_price.amount, Decimal::new(399, 2));
    }

    #[test]
    fn test_update_quantity_below_one_removes() {
        let cart = CartStore::new();
        cart.add(&product(1, 499));
        cart.add(&product(2, 699));

        cart.update_quantity(ProductId::new(1), 0);
        cart.update_quantity(ProductId::new(2), -3);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let cart = CartStore::new();
        cart.add(&product(1, 499));

        cart.update_quantity(ProductId::new(1), 5);
        assert_eq!(cart.item_count(), 5);

        // Unknown product is ignored, not inserted.
        cart.update_quantity(ProductId::new(77), 3);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let cart = CartStore::new();
        cart.add(&product(1, 499));
        cart.remove(ProductId::new(2));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_quantity_never_drops_below_one() {
        let cart = CartStore::new();
        let ops: [(i32, i64); 8] = [
            (1, 2),
            (2, 1),
            (1, 0),
            (2, -1),
            (3, 4),
            (3, 1),
            (1, 7),
            (3, 0),
        ];
        for (id, quantity) in ops {
            cart.add(&product(id, 100));
            cart.update_quantity(ProductId::new(id), quantity);
            assert!(cart.lines().iter().all(|line| line.quantity >= 1));
        }
    }

    #[test]
    fn test_toggle_wishlist_is_its_own_inverse() {
        let cart = CartStore::new();
        cart.toggle_wishlist(ProductId::new(3));
        let before = cart.wishlist();

        assert!(cart.toggle_wishlist(ProductId::new(5)));
        assert!(!cart.toggle_wishlist(ProductId::new(5)));

        assert_eq!(cart.wishlist(), before);
        assert!(cart.is_wishlisted(ProductId::new(3)));
    }

    #[test]
    fn test_clear_keeps_wishlist() {
        let cart = CartStore::new();
        cart.add(&product(1, 499));
        cart.toggle_wishlist(ProductId::new(1));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.wishlist(), vec![ProductId::new(1)]);
    }

    #[test]
    fn test_clones_share_state() {
        let cart = CartStore::new();
        let view = cart.clone();
        cart.add(&product(1, 499));
        assert_eq!(view.item_count(), 1);
    }

    #[test]
    fn test_subscribers_see_changes_but_not_noops() {
        let cart = CartStore::new();
        let mut rx = cart.subscribe();

        cart.remove(ProductId::new(1));
        cart.clear();
        assert!(!rx.has_changed().unwrap());

        cart.add(&product(1, 499));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().item_count(), 1);

        cart.update_quantity(ProductId::new(1), 1);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_totals_follow_lines() {
        let cart = CartStore::new();
        let tomatoes = product(1, 499);
        cart.add(&tomatoes);
        cart.add(&tomatoes);
        cart.add(&product(2, 699));

        let totals = cart.totals();
        assert_eq!(totals.total, Decimal::new(233_276, 4));
    }
}
