//! Checkout wizard.
//!
//! A strictly linear state machine layered on the [`CartStore`]:
//!
//! ```text
//! Cart ──begin_checkout──▶ Shipping ──submit_shipping──▶ Payment ──submit_payment──▶ Confirmation
//! ```
//!
//! There are no back transitions. `Confirmation` is terminal: entering it
//! generates a display-only order token and schedules the cart to be cleared
//! after the confirmation delay, at which point the host panel is told to
//! close. The scheduled clear is not tied to the wizard's lifetime; dropping
//! the wizard (closing the panel) leaves it running.

mod error;
pub mod forms;

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

use crate::cart::{CartLine, CartStore, PriceBreakdown};
use crate::panel::PanelSignal;
use crate::scheduler::{self, ScheduledTask};

pub use error::CheckoutError;
pub use forms::{PaymentField, PaymentInfo, ShippingField, ShippingInfo};

/// Delay between reaching confirmation and clearing the cart.
pub const DEFAULT_CONFIRMATION_DELAY: Duration = Duration::from_secs(3);

/// Prefix of every order token.
const ORDER_TOKEN_PREFIX: &str = "#ORD-";

/// Random characters after the prefix.
const ORDER_TOKEN_LENGTH: usize = 9;

/// One step of the checkout wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    Cart,
    Shipping,
    Payment,
    Confirmation,
}

impl CheckoutStep {
    /// All steps, in order.
    pub const ALL: [Self; 4] = [Self::Cart, Self::Shipping, Self::Payment, Self::Confirmation];

    /// Position in the progress bar, starting at 0.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Cart => 0,
            Self::Shipping => 1,
            Self::Payment => 2,
            Self::Confirmation => 3,
        }
    }

    /// Progress bar label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cart => "Cart",
            Self::Shipping => "Shipping",
            Self::Payment => "Payment",
            Self::Confirmation => "Confirmation",
        }
    }

    /// Panel heading for the step.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Cart => "Shopping Cart",
            Self::Shipping => "Shipping Information",
            Self::Payment => "Payment Details",
            Self::Confirmation => "Order Confirmation",
        }
    }

    /// Whether no transition leaves this step.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmation)
    }
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How a progress-bar step relates to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepProgress {
    Complete,
    Current,
    Upcoming,
}

/// What the shopper sees once the order is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    /// Display-only order identifier, e.g. `#ORD-k3j9x0a1q`.
    pub token: String,
    pub placed_at: DateTime<Utc>,
    pub ship_to: String,
    pub email: String,
    pub lines: Vec<CartLine>,
    pub totals: PriceBreakdown,
}

/// Generate a display-only order token.
///
/// Tokens are random, not unique across sessions, and never stored.
#[must_use]
pub fn generate_order_token() -> String {
    const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::rng();
    let suffix: String = (0..ORDER_TOKEN_LENGTH)
        .filter_map(|_| CHARSET.get(rng.random_range(0..CHARSET.len())))
        .map(|&byte| char::from(byte))
        .collect();
    format!("{ORDER_TOKEN_PREFIX}{suffix}")
}

/// Checkout wizard for one opening of the cart panel.
#[derive(Debug)]
pub struct CheckoutWizard {
    cart: CartStore,
    step: CheckoutStep,
    shipping: ShippingInfo,
    payment: PaymentInfo,
    confirmation: Option<OrderConfirmation>,
    auto_clear: Option<ScheduledTask>,
    confirmation_delay: Duration,
    close_signal: Option<mpsc::UnboundedSender<PanelSignal>>,
}

impl CheckoutWizard {
    /// Start a wizard on the `Cart` step.
    #[must_use]
    pub fn new(cart: CartStore) -> Self {
        Self {
            cart,
            step: CheckoutStep::Cart,
            shipping: ShippingInfo::default(),
            payment: PaymentInfo::default(),
            confirmation: None,
            auto_clear: None,
            confirmation_delay: DEFAULT_CONFIRMATION_DELAY,
            close_signal: None,
        }
    }

    /// Override the delay before the cart is cleared on confirmation.
    #[must_use]
    pub const fn with_confirmation_delay(mut self, delay: Duration) -> Self {
        self.confirmation_delay = delay;
        self
    }

    /// Send a [`PanelSignal`] to the host panel when the auto-clear fires.
    #[must_use]
    pub fn with_close_signal(mut self, tx: mpsc::UnboundedSender<PanelSignal>) -> Self {
        self.close_signal = Some(tx);
        self
    }

    // =========================================================================
    // State
    // =========================================================================

    /// The current step.
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Progress-bar state of every step.
    #[must_use]
    pub fn progress(&self) -> Vec<(CheckoutStep, StepProgress)> {
        CheckoutStep::ALL
            .into_iter()
            .map(|step| {
                let progress = match step.cmp(&self.step) {
                    std::cmp::Ordering::Less => StepProgress::Complete,
                    std::cmp::Ordering::Equal => StepProgress::Current,
                    std::cmp::Ordering::Greater => StepProgress::Upcoming,
                };
                (step, progress)
            })
            .collect()
    }

    /// The cart this wizard checks out.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Totals for the cart as it is right now.
    #[must_use]
    pub fn totals(&self) -> PriceBreakdown {
        self.cart.totals()
    }

    /// Shipping form buffer.
    #[must_use]
    pub const fn shipping(&self) -> &ShippingInfo {
        &self.shipping
    }

    /// Mutable shipping form buffer.
    pub const fn shipping_mut(&mut self) -> &mut ShippingInfo {
        &mut self.shipping
    }

    /// Payment form buffer.
    #[must_use]
    pub const fn payment(&self) -> &PaymentInfo {
        &self.payment
    }

    /// Mutable payment form buffer.
    pub const fn payment_mut(&mut self) -> &mut PaymentInfo {
        &mut self.payment
    }

    /// The placed order, once on the `Confirmation` step.
    #[must_use]
    pub const fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    /// The pending auto-clear, once on the `Confirmation` step.
    #[must_use]
    pub const fn scheduled_clear(&self) -> Option<&ScheduledTask> {
        self.auto_clear.as_ref()
    }

    /// Whether the "proceed" control for the current step is available.
    ///
    /// On the cart step this is false for an empty cart; on the form steps
    /// it is false until every required field is filled in.
    #[must_use]
    pub fn can_proceed(&self) -> bool {
        match self.step {
            CheckoutStep::Cart => !self.cart.is_empty(),
            CheckoutStep::Shipping => self.shipping.is_complete(),
            CheckoutStep::Payment => self.payment.is_complete(),
            CheckoutStep::Confirmation => false,
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn expect_step(&self, action: &'static str, expected: CheckoutStep) -> Result<(), CheckoutError> {
        if self.step == expected {
            Ok(())
        } else {
            warn!(action, %expected, actual = %self.step, "Checkout action on wrong step");
            Err(CheckoutError::InvalidStep {
                action,
                expected,
                actual: self.step,
            })
        }
    }

    /// Cart → Shipping.
    ///
    /// # Errors
    ///
    /// `EmptyCart` when the cart has no lines, `InvalidStep` when not on the
    /// cart step.
    #[instrument(skip(self))]
    pub fn begin_checkout(&mut self) -> Result<(), CheckoutError> {
        self.expect_step("begin checkout", CheckoutStep::Cart)?;
        if self.cart.is_empty() {
            warn!("Checkout blocked: cart is empty");
            return Err(CheckoutError::EmptyCart);
        }
        self.step = CheckoutStep::Shipping;
        info!(step = %self.step, "Checkout advanced");
        Ok(())
    }

    /// Shipping → Payment.
    ///
    /// # Errors
    ///
    /// `MissingShipping` listing blank fields, `InvalidStep` when not on the
    /// shipping step.
    #[instrument(skip(self))]
    pub fn submit_shipping(&mut self) -> Result<(), CheckoutError> {
        self.expect_step("submit shipping", CheckoutStep::Shipping)?;
        let missing = self.shipping.missing_fields();
        if !missing.is_empty() {
            warn!(missing = missing.len(), "Shipping form incomplete");
            return Err(CheckoutError::MissingShipping(missing));
        }
        self.step = CheckoutStep::Payment;
        info!(step = %self.step, "Checkout advanced");
        Ok(())
    }

    /// Payment → Confirmation.
    ///
    /// Generates the order token and schedules the cart to be cleared after
    /// the confirmation delay.
    ///
    /// # Errors
    ///
    /// `MissingPayment` listing blank fields, `InvalidStep` when not on the
    /// payment step, `Scheduler` outside a tokio runtime. The wizard is left
    /// on the payment step in every case.
    #[instrument(skip(self))]
    pub fn submit_payment(&mut self) -> Result<&OrderConfirmation, CheckoutError> {
        self.expect_step("submit payment", CheckoutStep::Payment)?;
        let missing = self.payment.missing_fields();
        if !missing.is_empty() {
            warn!(missing = missing.len(), "Payment form incomplete");
            return Err(CheckoutError::MissingPayment(missing));
        }
        let runtime = scheduler::current_runtime()?;

        let lines = self.cart.lines();
        let totals = PriceBreakdown::for_lines(&lines);
        let confirmation = OrderConfirmation {
            token: generate_order_token(),
            placed_at: Utc::now(),
            ship_to: self.shipping.full_name(),
            email: self.shipping.email.trim().to_string(),
            lines,
            totals,
        };

        self.step = CheckoutStep::Confirmation;
        info!(
            order_token = %confirmation.token,
            total = %totals.display_total(),
            "Order placed"
        );

        self.auto_clear = Some(self.schedule_clear(&runtime, confirmation.token.clone()));
        Ok(self.confirmation.insert(confirmation))
    }

    fn schedule_clear(&self, runtime: &Handle, order_token: String) -> ScheduledTask {
        let cart = self.cart.clone();
        let close_signal = self.close_signal.clone();
        ScheduledTask::spawn_on(runtime, "checkout-auto-clear", self.confirmation_delay, move || {
            cart.clear();
            if let Some(tx) = close_signal {
                // The panel may already be gone; that is fine.
                let _ = tx.send(PanelSignal::CheckoutCompleted {
                    order_token: order_token.clone(),
                });
            }
            info!(%order_token, "Checkout completed, cart cleared");
        })
    }

    /// Cancel the pending auto-clear.
    ///
    /// Nothing in the shopper flow calls this; the cart is normally cleared
    /// even if the panel is closed first. Returns `true` if a clear was
    /// pending.
    pub fn cancel_scheduled_clear(&mut self) -> bool {
        self.auto_clear.take().is_some_and(|task| {
            let pending = !task.is_finished();
            task.cancel();
            pending
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use farmstand_core::{CurrencyCode, FarmId, Price, ProductId};
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::{FarmRef, Product};
    use crate::scheduler::SchedulerError;

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_cents(cents, CurrencyCode::USD),
            image: String::new(),
            description: String::new(),
            farm: FarmRef {
                id: FarmId::new(1),
                name: "Test Farm".to_string(),
            },
            category: "Vegetables".to_string(),
            organic: true,
            in_stock: true,
        }
    }

    fn stocked_cart() -> CartStore {
        let cart = CartStore::new();
        cart.add(&product(1, 499));
        cart.add(&product(1, 499));
        cart.add(&product(2, 699));
        cart
    }

    fn fill_shipping(wizard: &mut CheckoutWizard) {
        for field in ShippingField::ALL {
            wizard.shipping_mut().set(field, "value");
        }
    }

    fn fill_payment(wizard: &mut CheckoutWizard) {
        let payment = wizard.payment_mut();
        payment.set(PaymentField::CardNumber, "4242424242424242");
        payment.set(PaymentField::Expiry, "01/30");
        payment.set(PaymentField::Cvc, "123");
    }

    #[test]
    fn test_starts_on_cart_step() {
        let wizard = CheckoutWizard::new(CartStore::new());
        assert_eq!(wizard.step(), CheckoutStep::Cart);
        assert!(wizard.confirmation().is_none());
    }

    #[test]
    fn test_empty_cart_cannot_reach_shipping() {
        let mut wizard = CheckoutWizard::new(CartStore::new());
        assert!(!wizard.can_proceed());
        assert_eq!(wizard.begin_checkout(), Err(CheckoutError::EmptyCart));
        assert_eq!(wizard.step(), CheckoutStep::Cart);
    }

    #[test]
    fn test_shipping_requires_all_fields() {
        let mut wizard = CheckoutWizard::new(stocked_cart());
        wizard.begin_checkout().unwrap();

        for blank in ShippingField::ALL {
            fill_shipping(&mut wizard);
            wizard.shipping_mut().set(blank, "");
            assert!(!wizard.can_proceed());
            assert_eq!(
                wizard.submit_shipping(),
                Err(CheckoutError::MissingShipping(vec![blank]))
            );
            assert_eq!(wizard.step(), CheckoutStep::Shipping);
        }

        fill_shipping(&mut wizard);
        wizard.submit_shipping().unwrap();
        assert_eq!(wizard.step(), CheckoutStep::Payment);
    }

    #[test]
    fn test_actions_on_wrong_step_are_rejected() {
        let mut wizard = CheckoutWizard::new(stocked_cart());
        fill_shipping(&mut wizard);

        let err = wizard.submit_shipping().unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::InvalidStep {
                expected: CheckoutStep::Shipping,
                actual: CheckoutStep::Cart,
                ..
            }
        ));

        wizard.begin_checkout().unwrap();
        assert!(matches!(
            wizard.begin_checkout(),
            Err(CheckoutError::InvalidStep { .. })
        ));
    }

    #[test]
    fn test_whitespace_only_shipping_is_accepted() {
        let mut wizard = CheckoutWizard::new(stocked_cart());
        wizard.begin_checkout().unwrap();
        for field in ShippingField::ALL {
            wizard.shipping_mut().set(field, " ");
        }

        assert!(wizard.can_proceed());
        wizard.submit_shipping().unwrap();
        assert_eq!(wizard.step(), CheckoutStep::Payment);
    }

    #[test]
    fn test_payment_outside_runtime_keeps_wizard_on_payment() {
        let cart = stocked_cart();
        let mut wizard = CheckoutWizard::new(cart.clone());
        wizard.begin_checkout().unwrap();
        fill_shipping(&mut wizard);
        wizard.submit_shipping().unwrap();
        fill_payment(&mut wizard);

        assert_eq!(
            wizard.submit_payment().unwrap_err(),
            CheckoutError::Scheduler(SchedulerError::NoRuntime)
        );
        assert_eq!(wizard.step(), CheckoutStep::Payment);
        assert!(wizard.confirmation().is_none());
        assert!(wizard.scheduled_clear().is_none());
        assert_eq!(cart.item_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_payment_requires_all_fields() {
        let mut wizard = CheckoutWizard::new(stocked_cart());
        wizard.begin_checkout().unwrap();
        fill_shipping(&mut wizard);
        wizard.submit_shipping().unwrap();

        wizard.payment_mut().set(PaymentField::CardNumber, "4242");
        let err = wizard.submit_payment().unwrap_err();
        assert_eq!(
            err,
            CheckoutError::MissingPayment(vec![PaymentField::Expiry, PaymentField::Cvc])
        );
        assert_eq!(
            err.to_string(),
            "missing payment fields: Expiry Date, CVC"
        );
        assert!(wizard.scheduled_clear().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirmation_generates_token_and_clears_later() {
        let cart = stocked_cart();
        let mut wizard = CheckoutWizard::new(cart.clone());
        wizard.begin_checkout().unwrap();
        fill_shipping(&mut wizard);
        wizard.submit_shipping().unwrap();
        fill_payment(&mut wizard);

        let confirmation = wizard.submit_payment().unwrap().clone();
        assert!(confirmation.token.starts_with("#ORD-"));
        assert_eq!(confirmation.token.len(), 14);
        assert_eq!(confirmation.totals.total, Decimal::new(233_276, 4));
        assert_eq!(wizard.step(), CheckoutStep::Confirmation);
        assert!(wizard.step().is_terminal());
        assert!(!wizard.can_proceed());

        // Cleared only after the delay.
        tokio::time::sleep(Duration::from_millis(2_900)).await;
        assert!(!cart.is_empty());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(cart.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_wizard_does_not_cancel_clear() {
        let cart = stocked_cart();
        cart.toggle_wishlist(ProductId::new(2));
        {
            let mut wizard = CheckoutWizard::new(cart.clone());
            wizard.begin_checkout().unwrap();
            fill_shipping(&mut wizard);
            wizard.submit_shipping().unwrap();
            fill_payment(&mut wizard);
            wizard.submit_payment().unwrap();
        }

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!cart.is_empty());

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(cart.is_empty());
        assert!(cart.is_wishlisted(ProductId::new(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_scheduled_clear() {
        let cart = stocked_cart();
        let mut wizard = CheckoutWizard::new(cart.clone());
        wizard.begin_checkout().unwrap();
        fill_shipping(&mut wizard);
        wizard.submit_shipping().unwrap();
        fill_payment(&mut wizard);
        wizard.submit_payment().unwrap();

        assert!(wizard.cancel_scheduled_clear());
        assert!(!wizard.cancel_scheduled_clear());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!cart.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_tolerates_already_empty_cart() {
        let cart = stocked_cart();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut wizard = CheckoutWizard::new(cart.clone()).with_close_signal(tx);
        wizard.begin_checkout().unwrap();
        fill_shipping(&mut wizard);
        wizard.submit_shipping().unwrap();
        fill_payment(&mut wizard);
        let token = wizard.submit_payment().unwrap().token.clone();

        cart.clear();
        let signal = rx.recv().await.unwrap();
        assert_eq!(signal, PanelSignal::CheckoutCompleted { order_token: token });
        assert!(cart.is_empty());
    }

    #[test]
    fn test_progress_marks_completed_steps() {
        let mut wizard = CheckoutWizard::new(stocked_cart());
        wizard.begin_checkout().unwrap();
        assert_eq!(
            wizard.progress(),
            vec![
                (CheckoutStep::Cart, StepProgress::Complete),
                (CheckoutStep::Shipping, StepProgress::Current),
                (CheckoutStep::Payment, StepProgress::Upcoming),
                (CheckoutStep::Confirmation, StepProgress::Upcoming),
            ]
        );
    }

    #[test]
    fn test_order_token_charset() {
        for _ in 0..50 {
            let token = generate_order_token();
            let suffix = token.strip_prefix("#ORD-").unwrap();
            assert_eq!(suffix.len(), 9);
            assert!(
                suffix
                    .chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
            );
        }
    }
}
