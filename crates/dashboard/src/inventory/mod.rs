//! Farmer inventory.
//!
//! A local working copy of the farm's products. Edits here never reach the
//! storefront catalog.

mod image;

pub use image::{ImageUpload, decode_data_url, validate_image};

use farmstand_core::{InventoryItemId, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Errors that can occur while editing inventory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("product name is required")]
    MissingName,

    #[error("category is required")]
    MissingCategory,

    #[error("price must be greater than zero")]
    InvalidPrice,

    #[error("stock must be greater than zero")]
    InvalidStock,

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("unsupported image type: {0}")]
    UnsupportedImageType(String),

    #[error("image file is empty")]
    EmptyImage,
}

/// One product in the farmer's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub name: String,
    pub category: String,
    pub price: Price,
    pub stock: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

/// Contents of the "Add Product" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryDraft {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock: u32,
    pub image: String,
    pub description: String,
}

impl InventoryDraft {
    /// Attach an uploaded file as the image.
    ///
    /// # Errors
    ///
    /// Returns an `InventoryError` if the upload is not a usable image.
    pub fn attach_image(&mut self, upload: &ImageUpload) -> Result<(), InventoryError> {
        self.image = upload.to_data_url()?;
        Ok(())
    }

    fn validate(&self) -> Result<(), InventoryError> {
        if self.name.trim().is_empty() {
            return Err(InventoryError::MissingName);
        }
        if self.category.trim().is_empty() {
            return Err(InventoryError::MissingCategory);
        }
        if self.price <= Decimal::ZERO {
            return Err(InventoryError::InvalidPrice);
        }
        if self.stock == 0 {
            return Err(InventoryError::InvalidStock);
        }
        Ok(())
    }
}

/// The farmer's product list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    #[must_use]
    pub const fn new(items: Vec<InventoryItem>) -> Self {
        Self { items }
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: InventoryItemId) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items with fewer than `threshold` units left.
    pub fn low_stock(&self, threshold: u32) -> impl Iterator<Item = &InventoryItem> {
        self.items.iter().filter(move |item| item.stock < threshold)
    }

    /// The ID the next added item will get: one past the largest in use.
    #[must_use]
    pub fn next_id(&self) -> InventoryItemId {
        self.items
            .iter()
            .map(|item| item.id)
            .max()
            .map_or_else(|| InventoryItemId::new(1), |id| id.next())
    }

    /// Add a product from the "Add Product" form, returning the stored item.
    ///
    /// # Errors
    ///
    /// Returns an `InventoryError` if a required field is blank or zero, or
    /// the image reference is invalid.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub fn add(&mut self, draft: InventoryDraft) -> Result<InventoryItem, InventoryError> {
        draft.validate()?;
        let image = validate_image(&draft.image)?;

        let item = InventoryItem {
            id: self.next_id(),
            name: draft.name.trim().to_string(),
            category: draft.category.trim().to_string(),
            price: Price::usd(draft.price),
            stock: draft.stock,
            image,
            description: draft.description,
        };
        info!(id = %item.id, "Added inventory item");
        self.items.push(item.clone());
        Ok(item)
    }

    /// Replace the item with the same ID.
    ///
    /// Returns `false` (and changes nothing) if no such item exists.
    ///
    /// # Errors
    ///
    /// Returns an `InventoryError` if the new image reference is invalid.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub fn update(&mut self, mut item: InventoryItem) -> Result<bool, InventoryError> {
        item.image = validate_image(&item.image)?;
        let Some(slot) = self.items.iter_mut().find(|existing| existing.id == item.id) else {
            debug!("Update for unknown inventory item ignored");
            return Ok(false);
        };
        *slot = item;
        info!("Updated inventory item");
        Ok(true)
    }

    /// Remove an item, returning it if it existed.
    #[instrument(skip(self))]
    pub fn delete(&mut self, id: InventoryItemId) -> Option<InventoryItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let removed = self.items.remove(index);
        info!(name = %removed.name, "Deleted inventory item");
        Some(removed)
    }
}
