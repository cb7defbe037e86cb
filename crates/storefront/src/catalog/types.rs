//! Catalog entities.

use farmstand_core::{FarmId, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A farm listed in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Farm {
    pub id: FarmId,
    pub name: String,
    pub description: String,
    /// Image URL.
    pub image: String,
    pub location: String,
    pub specialty: String,
    /// Average review score out of 5, one decimal place.
    pub rating: Decimal,
    /// Certification labels such as `organic` or `humane`.
    #[serde(default)]
    pub certifications: Vec<String>,
}

impl Farm {
    /// Whether the farm carries the given certification (case-insensitive).
    #[must_use]
    pub fn is_certified(&self, certification: &str) -> bool {
        self.certifications
            .iter()
            .any(|cert| cert.eq_ignore_ascii_case(certification))
    }
}

/// Denormalized farm reference carried by each product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmRef {
    pub id: FarmId,
    pub name: String,
}

/// A product available in the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub farm: FarmRef,
    /// Category label, e.g. `Vegetables` or `Dairy & Eggs`.
    pub category: String,
    pub organic: bool,
    pub in_stock: bool,
}
