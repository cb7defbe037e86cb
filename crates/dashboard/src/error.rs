//! Dashboard error type.

use thiserror::Error;

use crate::inventory::InventoryError;
use crate::messages::MessageError;
use crate::orders::OrderError;

/// Errors surfaced by the farmer dashboard.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The seed document could not be parsed.
    #[error("invalid dashboard seed: {0}")]
    Seed(#[from] serde_yaml::Error),

    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Message error: {0}")]
    Message(#[from] MessageError),
}

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;
