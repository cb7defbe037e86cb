//! Scripted checkout.
//!
//! Fills the shared cart, walks the wizard through every step and then
//! waits for the auto-clear to close the panel, the same sequence a
//! shopper goes through in the storefront.


use clap::Args;
use farmstand_core::ProductId;
use farmstand_storefront::AppState;
use farmstand_storefront::checkout::{PaymentField, ShippingField};
use farmstand_storefront::config::StorefrontConfig;
use farmstand_storefront::panel::PanelSignal;

use crate::output::Output;

#[derive(Args)]
pub struct CheckoutArgs {
    /// Add one unit of this product; repeat to add more
    #[arg(long = "add", value_name = "PRODUCT_ID")]
    add: Vec<i32>,

    /// Wishlist this product and move it to the cart from the wishlist
    #[arg(long = "wishlist", value_name = "PRODUCT_ID")]
    wishlist: Vec<i32>,

    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    street: String,
    #[arg(long, default_value = "")]
    city: String,
    #[arg(long, default_value = "")]
    state: String,
    #[arg(long, default_value = "")]
    zip: String,

    #[arg(long, default_value = "")]
    card_number: String,
    /// Card expiry as `MM/YY`
    #[arg(long, default_value = "")]
    expiry: String,
    #[arg(long, default_value = "")]
    cvc: String,
}

/// Run the checkout and wait for the cart to be cleared.
pub async fn run(
    config: StorefrontConfig,
    args: CheckoutArgs,
    out: &Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::load(config)?;

    for id in args.add {
        let product = state.catalog().require_product(ProductId::new(id))?;
        state.cart().add(product);
    }

    let wishlist = state.wishlist();
    for id in args.wishlist {
        let id = ProductId::new(id);
        state.catalog().require_product(id)?;
        if !state.cart().is_wishlisted(id) {
            state.cart().toggle_wishlist(id);
        }
        // The badge task is detached; it clears itself.
        let _badge = wishlist.add_to_cart(id)?;
    }

    let mut panel = state.cart_panel();
    let wizard = panel.open();

    let totals = wizard.totals();
    out.note(&format!(
        "Cart: {} item(s), subtotal {}, shipping {}, tax {}, total {}",
        wizard.cart().item_count(),
        totals.display_subtotal(),
        totals.display_shipping(),
        totals.display_tax(),
        totals.display_total()
    ))?;

    wizard.begin_checkout()?;
    out.note(wizard.step().title())?;

    let shipping = wizard.shipping_mut();
    for (field, value) in [
        (ShippingField::FirstName, args.first_name),
        (ShippingField::LastName, args.last_name),
        (ShippingField::Email, args.email),
        (ShippingField::Phone, args.phone),
        (ShippingField::Street, args.street),
        (ShippingField::City, args.city),
        (ShippingField::State, args.state),
        (ShippingField::ZipCode, args.zip),
    ] {
        shipping.set(field, value);
    }
    wizard.submit_shipping()?;
    out.note(wizard.step().title())?;

    let payment = wizard.payment_mut();
    payment.set(PaymentField::CardNumber, args.card_number);
    payment.set(PaymentField::Expiry, args.expiry);
    payment.set(PaymentField::Cvc, args.cvc);
    let card = payment.masked_card_number();

    let confirmation = wizard.submit_payment()?.clone();
    out.note(wizard.step().title())?;
    out.emit(&confirmation, |w| {
        writeln!(w, "Order placed: {}", confirmation.token)?;
        writeln!(w, "Ship to: {} <{}>", confirmation.ship_to, confirmation.email)?;
        writeln!(w, "Paid with card {card}")?;
        for line in &confirmation.lines {
            writeln!(
                w,
                "  {} x {:<28} {:>8}",
                line.quantity,
                line.name,
                line.line_total().display()
            )?;
        }
        writeln!(w, "Total: {}", confirmation.totals.display_total())
    })?;

    out.note("Waiting for the cart to clear...")?;
    if let Some(PanelSignal::CheckoutCompleted { order_token }) = panel.next_signal().await {
        out.note(&format!(
            "{order_token} complete. Panel open: {}. Items in cart: {}",
            panel.is_open(),
            state.cart().item_count()
        ))?;
    }
    Ok(())
}
