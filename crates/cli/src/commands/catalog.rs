//! Catalog browsing commands.

use std::io::Write;

use clap::Subcommand;
use farmstand_core::FarmId;
use farmstand_storefront::AppState;
use farmstand_storefront::browse::{Category, ProductQuery};
use farmstand_storefront::catalog::Product;
use farmstand_storefront::config::StorefrontConfig;
use farmstand_storefront::farms::{self, FarmDetail};

use crate::output::Output;

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List the farm directory
    Farms,
    /// List products, optionally filtered
    Products {
        /// Only products from this farm
        #[arg(long)]
        farm: Option<i32>,

        /// Category label or slug, e.g. `Herbs` or `dairy-and-eggs`
        #[arg(long)]
        category: Option<Category>,

        /// Case-insensitive text in the product or farm name
        #[arg(long, default_value = "")]
        search: String,
    },
    /// List the featured products shown on the home page
    Featured,
    /// Show one farm with its product availability
    Farm {
        /// Farm ID
        id: i32,
    },
}

/// Run a catalog command against the configured catalog.
pub fn run(
    config: StorefrontConfig,
    command: CatalogCommand,
    out: &Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::load(config)?;
    let catalog = state.catalog();

    match command {
        CatalogCommand::Farms => {
            let cards = farms::directory(catalog);
            out.emit(&cards, |w| {
                for card in &cards {
                    let organic = if card.organic { " [organic]" } else { "" };
                    writeln!(
                        w,
                        "{:>3}  {} ({}) - {}, rated {}{organic}",
                        card.id, card.name, card.location, card.specialty, card.rating
                    )?;
                }
                Ok(())
            })?;
        }
        CatalogCommand::Products {
            farm,
            category,
            search,
        } => {
            let mut query = ProductQuery::all().search(search);
            if let Some(farm) = farm {
                query = query.farm(FarmId::new(farm));
            }
            if let Some(category) = category {
                query = query.category(category);
            }
            let products = query.apply(catalog);
            let heading = query.heading(catalog);
            out.emit(&products, |w| {
                writeln!(w, "{heading}")?;
                if products.is_empty() {
                    writeln!(w, "  No products match these filters.")?;
                }
                write_products(w, &products)
            })?;
        }
        CatalogCommand::Featured => {
            let products: Vec<&Product> = catalog.featured_products().iter().collect();
            out.emit(&products, |w| write_products(w, &products))?;
        }
        CatalogCommand::Farm { id } => {
            let detail = FarmDetail::load(catalog, FarmId::new(id))?;
            out.emit(&detail, |w| {
                let card = &detail.card;
                writeln!(w, "{} - {}", card.name, card.location)?;
                writeln!(w, "{}", card.description)?;
                if !card.certifications.is_empty() {
                    writeln!(w, "Certifications: {}", card.certifications.join(", "))?;
                }
                writeln!(w)?;
                for product in &detail.products {
                    writeln!(
                        w,
                        "  {:<28} {:<12} {:>8}  {}",
                        product.name,
                        product.category,
                        product.price.display(),
                        product.availability.label()
                    )?;
                }
                Ok(())
            })?;
        }
    }
    Ok(())
}

fn write_products(w: &mut dyn Write, products: &[&Product]) -> std::io::Result<()> {
    for product in products {
        let stock = if product.in_stock { "" } else { " (out of stock)" };
        writeln!(
            w,
            "{:>3}  {:<28} {:>8}  {}{stock}",
            product.id,
            product.name,
            product.price.display(),
            product.farm.name
        )?;
    }
    Ok(())
}
