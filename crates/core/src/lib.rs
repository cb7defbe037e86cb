//! Farmstand Core - Shared types library.
//!
//! This crate provides common types used across all Farmstand components:
//! - `storefront` - Shopper-facing catalog, cart and checkout
//! - `dashboard` - Farmer-facing inventory, orders, messages and insights
//! - `cli` - Command-line driver for the demo
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no timers, no global state.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
