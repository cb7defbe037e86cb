//! Cross-crate tests for Farmstand.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p farmstand-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart panel, wizard and auto-clear on a paused clock
//! - `cart_behavior` - Cart store operations and pricing through `AppState`
//! - `catalog_browsing` - Listing filters, farm directory and wishlist
//! - `accounts` - Simulated sign-in and sign-up
//! - `dashboard` - Farmer dashboard over the embedded seed
//!
//! This library holds the fixtures the test files share.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::time::Duration;

use farmstand_core::ProductId;
use farmstand_storefront::AppState;
use farmstand_storefront::checkout::{PaymentField, PaymentInfo, ShippingField, ShippingInfo};
use farmstand_storefront::config::StorefrontConfig;

/// Seed catalog: Organic Tomatoes, $4.99.
pub const TOMATOES: ProductId = ProductId::new(1);
/// Seed catalog: Raw Honey, $12.99.
pub const HONEY: ProductId = ProductId::new(3);
/// Seed catalog: Organic Spinach, $3.99.
pub const SPINACH: ProductId = ProductId::new(4);

/// App state over the seed catalog with the default delays.
///
/// # Panics
///
/// Panics if the embedded seed catalog fails to load.
#[must_use]
#[allow(clippy::expect_used)]
pub fn seeded_state() -> AppState {
    AppState::load(StorefrontConfig::default()).expect("seed catalog loads")
}

/// App state over the seed catalog with custom delays.
///
/// # Panics
///
/// Panics if the embedded seed catalog fails to load.
#[must_use]
#[allow(clippy::expect_used)]
pub fn seeded_state_with_delays(confirmation: Duration, wishlist_flash: Duration) -> AppState {
    let config = StorefrontConfig {
        confirmation_delay: confirmation,
        wishlist_flash,
        ..StorefrontConfig::default()
    };
    AppState::load(config).expect("seed catalog loads")
}

/// Add one unit of `id` from the state's catalog to its cart.
///
/// # Panics
///
/// Panics if `id` is not in the catalog.
#[allow(clippy::expect_used)]
pub fn add_to_cart(state: &AppState, id: ProductId) {
    let product = state
        .catalog()
        .require_product(id)
        .expect("product is in the seed catalog");
    state.cart().add(product);
}

/// Fill every shipping field with plausible values.
pub fn fill_shipping(info: &mut ShippingInfo) {
    for (field, value) in [
        (ShippingField::FirstName, "Ada"),
        (ShippingField::LastName, "Lovelace"),
        (ShippingField::Email, "ada@example.com"),
        (ShippingField::Phone, "555-0100"),
        (ShippingField::Street, "1 Orchard Lane"),
        (ShippingField::City, "Springfield"),
        (ShippingField::State, "IL"),
        (ShippingField::ZipCode, "62701"),
    ] {
        info.set(field, value);
    }
}

/// Fill every payment field with a test card.
pub fn fill_payment(info: &mut PaymentInfo) {
    info.set(PaymentField::CardNumber, "4242 4242 4242 4242");
    info.set(PaymentField::Expiry, "12/29");
    info.set(PaymentField::Cvc, "123");
}
