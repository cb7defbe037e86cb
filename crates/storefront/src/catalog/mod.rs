//! Read-only product and farm catalog.
//!
//! The catalog is loaded once at startup, either from the seed document
//! embedded in the binary or from a YAML file named in the configuration,
//! and is never mutated afterwards. Views borrow from it freely.

mod error;
mod types;

use std::collections::HashSet;
use std::path::Path;

use farmstand_core::{FarmId, ProductId};
use serde::Deserialize;
use tracing::{debug, info, instrument};

pub use error::CatalogError;
pub use types::{Farm, FarmRef, Product};

/// Seed catalog shipped with the storefront.
const SEED_CATALOG: &str = include_str!("../../data/catalog.yaml");

/// Number of products shown in the "featured" strip by default.
pub const DEFAULT_FEATURED_COUNT: usize = 4;

/// On-disk catalog document.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    farms: Vec<Farm>,
    products: Vec<Product>,
}

/// In-memory registry of farms and products.
#[derive(Debug, Clone)]
pub struct Catalog {
    farms: Vec<Farm>,
    products: Vec<Product>,
    featured_count: usize,
}

impl Catalog {
    /// Load the seed catalog embedded in the crate.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded document is malformed.
    pub fn seeded() -> Result<Self, CatalogError> {
        Self::from_yaml_str(SEED_CATALOG)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, or a parse or
    /// validation error if its content is not a consistent catalog.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the YAML is malformed, an ID is repeated, or
    /// a product references a farm that is not in the document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_yaml::from_str(yaml)?;
        Self::from_parts(document.farms, document.products)
    }

    /// Build a catalog from already-constructed farms and products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on duplicate IDs or dangling farm references.
    pub fn from_parts(farms: Vec<Farm>, products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut farm_ids = HashSet::with_capacity(farms.len());
        for farm in &farms {
            if !farm_ids.insert(farm.id) {
                return Err(CatalogError::DuplicateFarm(farm.id));
            }
        }

        let mut product_ids = HashSet::with_capacity(products.len());
        for product in &products {
            if !product_ids.insert(product.id) {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
            if !farm_ids.contains(&product.farm.id) {
                return Err(CatalogError::UnknownFarm {
                    product: product.id,
                    farm: product.farm.id,
                });
            }
        }

        info!(
            farms = farms.len(),
            products = products.len(),
            "Catalog loaded"
        );

        Ok(Self {
            farms,
            products,
            featured_count: DEFAULT_FEATURED_COUNT,
        })
    }

    /// Override how many products `featured_products` returns.
    #[must_use]
    pub const fn with_featured_count(mut self, count: usize) -> Self {
        self.featured_count = count;
        self
    }

    /// Every product, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Every farm, in catalog order.
    #[must_use]
    pub fn farms(&self) -> &[Farm] {
        &self.farms
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn product_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Look up a product by ID, failing if it is not in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` for unknown IDs.
    pub fn require_product(&self, id: ProductId) -> Result<&Product, CatalogError> {
        self.product_by_id(id).ok_or(CatalogError::ProductNotFound(id))
    }

    /// Look up a farm by ID.
    #[must_use]
    pub fn farm_by_id(&self, id: FarmId) -> Option<&Farm> {
        self.farms.iter().find(|farm| farm.id == id)
    }

    /// Products sold by one farm, or every product when `farm_id` is `None`.
    #[must_use]
    pub fn products_by_farm(&self, farm_id: Option<FarmId>) -> Vec<&Product> {
        let Some(farm_id) = farm_id else {
            return self.products.iter().collect();
        };
        let products: Vec<_> = self
            .products
            .iter()
            .filter(|product| product.farm.id == farm_id)
            .collect();
        debug!(%farm_id, count = products.len(), "Filtered products by farm");
        products
    }

    /// The fixed-size prefix of the catalog shown on the home page.
    #[must_use]
    pub fn featured_products(&self) -> &[Product] {
        self.products
            .get(..self.featured_count)
            .unwrap_or(&self.products)
    }
}
