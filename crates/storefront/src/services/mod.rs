//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `accounts` - Simulated customer and farmer sign-in and sign-up

pub mod accounts;
