//! Farmstand storefront library.
//!
//! The shopper-facing half of the marketplace: the read-only catalog, the
//! shared cart and wishlist, pricing, the checkout wizard and the simulated
//! account flows. Everything runs in-process; the only asynchronous pieces
//! are the few deferred tasks in [`scheduler`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod browse;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod farms;
pub mod panel;
pub mod scheduler;
pub mod services;
pub mod state;
pub mod wishlist;

pub use error::{AppError, Result};
pub use state::AppState;
