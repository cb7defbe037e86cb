//! End-to-end checkout through the cart panel.
//!
//! Every test runs on a paused tokio clock so the confirmation delay can be
//! stepped through without sleeping.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use farmstand_integration_tests::{
    HONEY, SPINACH, TOMATOES, add_to_cart, fill_payment, fill_shipping, seeded_state,
};
use farmstand_storefront::checkout::{CheckoutError, CheckoutStep, ShippingField, StepProgress};
use farmstand_storefront::panel::PanelSignal;

// =============================================================================
// Happy Path
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_full_checkout_clears_cart_and_closes_panel() {
    let state = seeded_state();
    add_to_cart(&state, TOMATOES);
    add_to_cart(&state, TOMATOES);
    add_to_cart(&state, SPINACH);
    state.cart().toggle_wishlist(HONEY);

    let mut panel = state.cart_panel();
    let wizard = panel.open();
    assert_eq!(wizard.step(), CheckoutStep::Cart);

    wizard.begin_checkout().unwrap();
    fill_shipping(wizard.shipping_mut());
    wizard.submit_shipping().unwrap();
    fill_payment(wizard.payment_mut());

    let confirmation = wizard.submit_payment().unwrap().clone();
    assert_eq!(confirmation.ship_to, "Ada Lovelace");
    assert_eq!(confirmation.totals.display_subtotal(), "$13.97");
    assert_eq!(confirmation.totals.display_shipping(), "$5.00");
    assert_eq!(confirmation.totals.display_tax(), "$1.12");
    assert_eq!(confirmation.totals.display_total(), "$20.09");
    assert_eq!(confirmation.lines.len(), 2);

    // The cart survives until the delay elapses
    tokio::time::advance(Duration::from_millis(2_999)).await;
    tokio::task::yield_now().await;
    assert_eq!(state.cart().item_count(), 3);
    assert!(panel.is_open());

    let signal = panel.next_signal().await.unwrap();
    assert_eq!(
        signal,
        PanelSignal::CheckoutCompleted {
            order_token: confirmation.token.clone()
        }
    );
    assert!(!panel.is_open());
    assert!(state.cart().is_empty());
    assert!(state.cart().is_wishlisted(HONEY));
}

#[tokio::test(start_paused = true)]
async fn test_order_token_format() {
    let state = seeded_state();
    add_to_cart(&state, HONEY);

    let mut panel = state.cart_panel();
    let wizard = panel.open();
    wizard.begin_checkout().unwrap();
    fill_shipping(wizard.shipping_mut());
    wizard.submit_shipping().unwrap();
    fill_payment(wizard.payment_mut());
    let token = wizard.submit_payment().unwrap().token.clone();

    let suffix = token.strip_prefix("#ORD-").unwrap();
    assert_eq!(suffix.len(), 9);
    assert!(
        suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
    );
}

#[tokio::test(start_paused = true)]
async fn test_progress_bar_follows_steps() {
    let state = seeded_state();
    add_to_cart(&state, HONEY);

    let mut panel = state.cart_panel();
    let wizard = panel.open();
    wizard.begin_checkout().unwrap();
    fill_shipping(wizard.shipping_mut());
    wizard.submit_shipping().unwrap();

    let progress: Vec<_> = wizard.progress().into_iter().map(|(_, p)| p).collect();
    assert_eq!(
        progress,
        vec![
            StepProgress::Complete,
            StepProgress::Complete,
            StepProgress::Current,
            StepProgress::Upcoming,
        ]
    );
}

// =============================================================================
// Blocked Transitions
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_empty_cart_cannot_start_checkout() {
    let state = seeded_state();
    let mut panel = state.cart_panel();
    let wizard = panel.open();

    assert!(!wizard.can_proceed());
    assert_eq!(wizard.begin_checkout(), Err(CheckoutError::EmptyCart));
    assert_eq!(wizard.step(), CheckoutStep::Cart);
}

#[tokio::test(start_paused = true)]
async fn test_incomplete_shipping_lists_blank_fields() {
    let state = seeded_state();
    add_to_cart(&state, TOMATOES);

    let mut panel = state.cart_panel();
    let wizard = panel.open();
    wizard.begin_checkout().unwrap();
    fill_shipping(wizard.shipping_mut());
    wizard.shipping_mut().set(ShippingField::City, "");
    wizard.shipping_mut().set(ShippingField::ZipCode, "");

    assert_eq!(
        wizard.submit_shipping(),
        Err(CheckoutError::MissingShipping(vec![
            ShippingField::City,
            ShippingField::ZipCode,
        ]))
    );
    assert_eq!(wizard.step(), CheckoutStep::Shipping);
}

#[tokio::test(start_paused = true)]
async fn test_steps_cannot_be_skipped() {
    let state = seeded_state();
    add_to_cart(&state, TOMATOES);

    let mut panel = state.cart_panel();
    let wizard = panel.open();
    fill_payment(wizard.payment_mut());

    assert!(matches!(
        wizard.submit_payment(),
        Err(CheckoutError::InvalidStep {
            expected: CheckoutStep::Payment,
            actual: CheckoutStep::Cart,
            ..
        })
    ));
    assert!(wizard.confirmation().is_none());
}

// =============================================================================
// Panel Lifetime
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_closing_panel_keeps_cart_and_resets_wizard() {
    let state = seeded_state();
    add_to_cart(&state, TOMATOES);

    let mut panel = state.cart_panel();
    let wizard = panel.open();
    wizard.begin_checkout().unwrap();
    fill_shipping(wizard.shipping_mut());
    panel.close();

    let wizard = panel.open();
    assert_eq!(wizard.step(), CheckoutStep::Cart);
    assert!(!wizard.shipping().is_complete());
    assert_eq!(state.cart().item_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_auto_clear_runs_after_panel_closed() {
    let state = seeded_state();
    add_to_cart(&state, SPINACH);

    let mut panel = state.cart_panel();
    let wizard = panel.open();
    wizard.begin_checkout().unwrap();
    fill_shipping(wizard.shipping_mut());
    wizard.submit_shipping().unwrap();
    fill_payment(wizard.payment_mut());
    wizard.submit_payment().unwrap();
    panel.close();

    let mut cart = state.cart().subscribe();
    tokio::time::sleep(Duration::from_secs(3)).await;
    cart.wait_for(|snapshot| snapshot.is_empty()).await.unwrap();

    assert!(matches!(
        panel.next_signal().await,
        Some(PanelSignal::CheckoutCompleted { .. })
    ));
    assert!(!panel.is_open());
}
