//! Application state shared across views.

use std::sync::Arc;

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::panel::CartPanel;
use crate::services::accounts::AccountService;
use crate::wishlist::WishlistView;

/// Application state shared across all views.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the read-only catalog and the one cart every view shares.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    cart: CartStore,
}

impl AppState {
    /// Create a new application state around an already-loaded catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let catalog = catalog.with_featured_count(config.featured_count);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Arc::new(catalog),
                cart: CartStore::new(),
            }),
        }
    }

    /// Load the catalog named by the configuration, or the seed catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if the catalog cannot be loaded.
    pub fn load(config: StorefrontConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::seeded()?,
        };
        Ok(Self::new(config, catalog))
    }

    /// Get the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the shared cart.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// A closed cart panel using the configured confirmation delay.
    #[must_use]
    pub fn cart_panel(&self) -> CartPanel {
        CartPanel::new(self.inner.cart.clone())
            .with_confirmation_delay(self.inner.config.confirmation_delay)
    }

    /// A wishlist view using the configured badge duration.
    #[must_use]
    pub fn wishlist(&self) -> WishlistView {
        WishlistView::new(Arc::clone(&self.inner.catalog), self.inner.cart.clone())
            .with_flash(self.inner.config.wishlist_flash)
    }

    /// The account service using the configured sign-in delay.
    #[must_use]
    pub fn accounts(&self) -> AccountService {
        AccountService::new(self.inner.config.sign_in_delay)
    }
}
