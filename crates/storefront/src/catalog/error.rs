//! Catalog error types.

use std::path::PathBuf;

use farmstand_core::{FarmId, ProductId};
use thiserror::Error;

/// Errors that can occur while loading or querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog document is not valid YAML for the expected shape.
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Two farms share an ID.
    #[error("duplicate farm id {0}")]
    DuplicateFarm(FarmId),

    /// Two products share an ID.
    #[error("duplicate product id {0}")]
    DuplicateProduct(ProductId),

    /// A product references a farm that is not in the catalog.
    #[error("product {product} references unknown farm {farm}")]
    UnknownFarm { product: ProductId, farm: FarmId },

    /// Product not found.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// Farm not found.
    #[error("farm {0} not found")]
    FarmNotFound(FarmId),
}
