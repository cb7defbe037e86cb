//! Demo data shipped with the dashboard.

use serde::Deserialize;

use crate::error::DashboardError;
use crate::inventory::{Inventory, InventoryItem};
use crate::messages::{CustomerMessage, Inbox};
use crate::orders::{Order, OrderBook};

const SEED: &str = include_str!("../data/seed.yaml");

/// The seed document: starting inventory, orders and messages.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSeed {
    pub inventory: Vec<InventoryItem>,
    pub orders: Vec<Order>,
    pub messages: Vec<CustomerMessage>,
}

impl DashboardSeed {
    /// Parse the seed document embedded in the crate.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Seed` if the embedded document is malformed.
    pub fn embedded() -> Result<Self, DashboardError> {
        Self::from_yaml_str(SEED)
    }

    /// Parse a seed document.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Seed` if the YAML does not match the
    /// expected shape.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DashboardError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    #[must_use]
    pub fn inventory(&self) -> Inventory {
        Inventory::new(self.inventory.clone())
    }

    #[must_use]
    pub fn order_book(&self) -> OrderBook {
        OrderBook::new(self.orders.clone())
    }

    #[must_use]
    pub fn inbox(&self) -> Inbox {
        Inbox::new(self.messages.clone())
    }
}
