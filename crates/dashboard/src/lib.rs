//! Farmstand farmer dashboard.
//!
//! A local-only back office for one farm: inventory editing, order status
//! tracking, customer messages and sales insights. All state lives in memory
//! and starts from the embedded demo seed; nothing is written back to the
//! storefront catalog.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod dashboard;
pub mod error;
pub mod insights;
pub mod inventory;
pub mod messages;
pub mod orders;
pub mod seed;

pub use dashboard::{DashboardTab, FarmerDashboard};
pub use error::{DashboardError, Result};
