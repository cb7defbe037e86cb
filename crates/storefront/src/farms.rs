//! Farm directory: summary cards and the farm detail view.

use farmstand_core::{FarmId, Price};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use crate::catalog::{Catalog, CatalogError, Farm, Product};

/// Certification that earns the "Organic" badge on a card.
const ORGANIC_CERTIFICATION: &str = "organic";

/// One entry in the farm directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FarmCard {
    pub id: FarmId,
    pub name: String,
    pub image: String,
    pub location: String,
    pub specialty: String,
    pub rating: Decimal,
    pub description: String,
    pub organic: bool,
    /// Certification names, capitalized for display.
    pub certifications: Vec<String>,
}

impl FarmCard {
    #[must_use]
    pub fn new(farm: &Farm) -> Self {
        Self {
            id: farm.id,
            name: farm.name.clone(),
            image: farm.image.clone(),
            location: farm.location.clone(),
            specialty: farm.specialty.clone(),
            rating: farm.rating,
            description: farm.description.clone(),
            organic: farm.is_certified(ORGANIC_CERTIFICATION),
            certifications: farm.certifications.iter().map(|c| capitalize(c)).collect(),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Cards for every farm, in catalog order.
#[must_use]
pub fn directory(catalog: &Catalog) -> Vec<FarmCard> {
    catalog.farms().iter().map(FarmCard::new).collect()
}

/// Tabs of the farm detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FarmDetailTab {
    #[default]
    About,
    Products,
    Sustainability,
}

impl FarmDetailTab {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Products => "Products & Availability",
            Self::Sustainability => "Sustainability",
        }
    }
}

/// Whether a product can be ordered right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    OutOfStock,
}

impl Availability {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

/// A product row on the availability tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductAvailability {
    pub name: String,
    pub category: String,
    pub price: Price,
    pub availability: Availability,
}

impl From<&Product> for ProductAvailability {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            availability: if product.in_stock {
                Availability::Available
            } else {
                Availability::OutOfStock
            },
        }
    }
}

/// Everything the farm detail view shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FarmDetail {
    pub card: FarmCard,
    pub tab: FarmDetailTab,
    pub products: Vec<ProductAvailability>,
}

impl FarmDetail {
    /// Build the detail view for one farm, opened on the "About" tab.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::FarmNotFound` for unknown IDs.
    #[instrument(skip(catalog))]
    pub fn load(catalog: &Catalog, farm_id: FarmId) -> Result<Self, CatalogError> {
        let farm = catalog
            .farm_by_id(farm_id)
            .ok_or(CatalogError::FarmNotFound(farm_id))?;
        Ok(Self {
            card: FarmCard::new(farm),
            tab: FarmDetailTab::default(),
            products: catalog
                .products_by_farm(Some(farm_id))
                .into_iter()
                .map(ProductAvailability::from)
                .collect(),
        })
    }

    /// Switch tabs.
    pub const fn select_tab(&mut self, tab: FarmDetailTab) {
        self.tab = tab;
    }

    /// Products that can be ordered now.
    pub fn available(&self) -> impl Iterator<Item = &ProductAvailability> {
        self.products
            .iter()
            .filter(|product| product.availability == Availability::Available)
    }
}
