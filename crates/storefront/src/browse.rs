//! Product listing filters.

use std::str::FromStr;

use farmstand_core::FarmId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::catalog::{Catalog, Product};

/// A product category shown in the listing sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Vegetables,
    Fruits,
    Herbs,
    DairyAndEggs,
    HoneyAndPreserves,
}

impl Category {
    /// All categories, in sidebar order.
    pub const ALL: [Self; 5] = [
        Self::Vegetables,
        Self::Fruits,
        Self::Herbs,
        Self::DairyAndEggs,
        Self::HoneyAndPreserves,
    ];

    /// The label products carry in their `category` field.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Vegetables => "Vegetables",
            Self::Fruits => "Fruits",
            Self::Herbs => "Herbs",
            Self::DairyAndEggs => "Dairy & Eggs",
            Self::HoneyAndPreserves => "Honey & Preserves",
        }
    }

    /// Whether `product` belongs to this category.
    #[must_use]
    pub fn contains(&self, product: &Product) -> bool {
        product.category == self.label()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts the display label or a slug (`dairy-and-eggs`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('&', "and");
        let wanted: String = wanted
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-");
        Self::ALL
            .into_iter()
            .find(|category| {
                category
                    .label()
                    .to_lowercase()
                    .replace(" & ", "-and-")
                    == wanted
            })
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Listing filters: farm scope, category and a free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Only products from this farm. `None` lists every farm.
    pub farm: Option<FarmId>,
    /// Only products in this category. `None` is "All".
    pub category: Option<Category>,
    /// Case-insensitive substring of the product or farm name.
    pub search: String,
}

impl ProductQuery {
    /// A query matching every product.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn farm(mut self, farm: FarmId) -> Self {
        self.farm = Some(farm);
        self
    }

    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Whether `product` passes the category and search filters.
    ///
    /// The farm scope is applied by [`apply`](Self::apply).
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let in_category = self
            .category
            .is_none_or(|category| category.contains(product));
        if !in_category {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();
        product.name.to_lowercase().contains(&term)
            || product.farm.name.to_lowercase().contains(&term)
    }

    /// Run the query against `catalog`, keeping catalog order.
    #[instrument(skip(catalog))]
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        let products: Vec<_> = catalog
            .products_by_farm(self.farm)
            .into_iter()
            .filter(|product| self.matches(product))
            .collect();
        debug!(count = products.len(), "Product query evaluated");
        products
    }

    /// Listing heading: the farm name when scoped, the generic title otherwise.
    #[must_use]
    pub fn heading(&self, catalog: &Catalog) -> String {
        self.farm
            .and_then(|id| catalog.farm_by_id(id))
            .map_or_else(
                || "Fresh Local Products".to_string(),
                |farm| format!("Products from {}", farm.name),
            )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|product| product.name.clone()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let catalog = Catalog::seeded().unwrap();
        assert_eq!(ProductQuery::all().apply(&catalog).len(), 12);
    }

    #[test]
    fn test_category_filter() {
        let catalog = Catalog::seeded().unwrap();
        let herbs = ProductQuery::all().category(Category::Herbs).apply(&catalog);
        assert_eq!(names(&herbs), vec!["Fresh Basil", "Fresh Mint"]);
    }

    #[test]
    fn test_search_matches_farm_name_case_insensitive() {
        let catalog = Catalog::seeded().unwrap();
        let results = ProductQuery::all().search("HAPPY hens").apply(&catalog);
        assert_eq!(
            names(&results),
            vec!["Farm Fresh Eggs", "Artisanal Cheese", "Organic Butter"]
        );
    }

    #[test]
    fn test_filters_combine() {
        let catalog = Catalog::seeded().unwrap();
        let results = ProductQuery::all()
            .farm(FarmId::new(1))
            .category(Category::Fruits)
            .search("apple")
            .apply(&catalog);
        assert_eq!(names(&results), vec!["Organic Apples"]);

        let none = ProductQuery::all()
            .farm(FarmId::new(3))
            .category(Category::Vegetables)
            .apply(&catalog);
        assert!(none.is_empty());
    }

    #[test]
    fn test_heading() {
        let catalog = Catalog::seeded().unwrap();
        assert_eq!(ProductQuery::all().heading(&catalog), "Fresh Local Products");
        assert_eq!(
            ProductQuery::all().farm(FarmId::new(3)).heading(&catalog),
            "Products from Sunny Bee Apiaries"
        );
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Dairy & Eggs".parse(), Ok(Category::DairyAndEggs));
        assert_eq!("honey-and-preserves".parse(), Ok(Category::HoneyAndPreserves));
        assert_eq!("herbs".parse(), Ok(Category::Herbs));
        assert!("meat".parse::<Category>().is_err());
    }
}
