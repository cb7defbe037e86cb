//! Wishlist view.
//!
//! Lists wishlisted catalog products and lets the shopper move them into the
//! cart. A product added from here shows an "Added to Cart" badge for a short
//! while; the badge set is local to the view and cleared by a scheduled task.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use farmstand_core::ProductId;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::cart::CartStore;
use crate::catalog::{Catalog, CatalogError, Product};
use crate::scheduler::{self, ScheduledTask, SchedulerError};

/// Why a wishlist item could not be moved to the cart.
#[derive(Debug, Error)]
pub enum WishlistError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The badge timer could not be started. The cart was left untouched.
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

/// How long the "Added to Cart" badge stays up.
pub const DEFAULT_ADDED_FLASH: Duration = Duration::from_secs(2);

/// The wishlist slide-over.
#[derive(Debug, Clone)]
pub struct WishlistView {
    catalog: Arc<Catalog>,
    cart: CartStore,
    recently_added: Arc<watch::Sender<BTreeSet<ProductId>>>,
    flash: Duration,
}

impl WishlistView {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, cart: CartStore) -> Self {
        let (tx, _rx) = watch::channel(BTreeSet::new());
        Self {
            catalog,
            cart,
            recently_added: Arc::new(tx),
            flash: DEFAULT_ADDED_FLASH,
        }
    }

    /// Override how long the badge stays up.
    #[must_use]
    pub const fn with_flash(mut self, flash: Duration) -> Self {
        self.flash = flash;
        self
    }

    /// Wishlisted products in catalog order.
    ///
    /// IDs that are not in the catalog are skipped.
    #[must_use]
    pub fn items(&self) -> Vec<&Product> {
        self.catalog
            .products()
            .iter()
            .filter(|product| self.cart.is_wishlisted(product.id))
            .collect()
    }

    /// Whether the "Added to Cart" badge is showing for `product_id`.
    #[must_use]
    pub fn is_recently_added(&self, product_id: ProductId) -> bool {
        self.recently_added.borrow().contains(&product_id)
    }

    /// Observe badge changes.
    #[must_use]
    pub fn subscribe_badges(&self) -> watch::Receiver<BTreeSet<ProductId>> {
        self.recently_added.subscribe()
    }

    /// Add one unit of a wishlisted product to the cart.
    ///
    /// While the badge is showing the button is disabled, so a repeat call
    /// does nothing and returns `None`. Otherwise returns the task that will
    /// take the badge down.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError::Catalog` if the product is not in the catalog
    /// and `WishlistError::Scheduler` outside a tokio runtime.
    #[instrument(skip(self))]
    pub fn add_to_cart(&self, product_id: ProductId) -> Result<Option<ScheduledTask>, WishlistError> {
        let product = self.catalog.require_product(product_id)?;
        if self.is_recently_added(product_id) {
            debug!("Add ignored while badge is showing");
            return Ok(None);
        }
        let runtime = scheduler::current_runtime()?;

        self.cart.add(product);
        self.recently_added.send_modify(|added| {
            added.insert(product_id);
        });
        info!(name = %product.name, "Moved wishlist item to cart");

        let badges = Arc::clone(&self.recently_added);
        Ok(Some(ScheduledTask::spawn_on(
            &runtime,
            "wishlist-added-badge",
            self.flash,
            move || {
                badges.send_if_modified(|added| added.remove(&product_id));
            },
        )))
    }

    /// Take a product off the wishlist.
    #[instrument(skip(self))]
    pub fn remove(&self, product_id: ProductId) {
        if self.cart.is_wishlisted(product_id) {
            self.cart.toggle_wishlist(product_id);
        }
    }
}
