//! The slide-over cart panel.
//!
//! The panel hosts a [`CheckoutWizard`] while it is open. Opening always
//! starts a fresh wizard on the cart step; closing drops the wizard and its
//! form buffers but never the cart itself. When a scheduled auto-clear
//! fires, the wizard sends a [`PanelSignal`] back here and the panel closes
//! itself.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::cart::CartStore;
use crate::checkout::{CheckoutWizard, DEFAULT_CONFIRMATION_DELAY};

/// Message from a background task to the panel that hosts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelSignal {
    /// The confirmation delay elapsed and the cart was cleared.
    CheckoutCompleted { order_token: String },
}

/// Host for the checkout wizard.
#[derive(Debug)]
pub struct CartPanel {
    cart: CartStore,
    confirmation_delay: Duration,
    wizard: Option<CheckoutWizard>,
    signal_tx: mpsc::UnboundedSender<PanelSignal>,
    signal_rx: mpsc::UnboundedReceiver<PanelSignal>,
}

impl CartPanel {
    /// Create a closed panel over `cart`.
    #[must_use]
    pub fn new(cart: CartStore) -> Self {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        Self {
            cart,
            confirmation_delay: DEFAULT_CONFIRMATION_DELAY,
            wizard: None,
            signal_tx,
            signal_rx,
        }
    }

    /// Override the confirmation delay for wizards opened from now on.
    #[must_use]
    pub const fn with_confirmation_delay(mut self, delay: Duration) -> Self {
        self.confirmation_delay = delay;
        self
    }

    /// Open the panel.
    ///
    /// A closed panel gets a new wizard on the cart step; an open panel is
    /// returned as is.
    #[instrument(skip(self))]
    pub fn open(&mut self) -> &mut CheckoutWizard {
        let cart = &self.cart;
        let delay = self.confirmation_delay;
        let tx = &self.signal_tx;
        self.wizard.get_or_insert_with(|| {
            info!("Cart panel opened");
            CheckoutWizard::new(cart.clone())
                .with_confirmation_delay(delay)
                .with_close_signal(tx.clone())
        })
    }

    /// Close the panel, discarding the wizard's step and form buffers.
    ///
    /// A pending auto-clear keeps running.
    #[instrument(skip(self))]
    pub fn close(&mut self) {
        if let Some(wizard) = self.wizard.take() {
            info!(step = %wizard.step(), "Cart panel closed");
        }
    }

    /// Whether the panel is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.wizard.is_some()
    }

    /// The wizard of the open panel.
    #[must_use]
    pub const fn wizard(&self) -> Option<&CheckoutWizard> {
        self.wizard.as_ref()
    }

    /// Mutable access to the wizard of the open panel.
    pub const fn wizard_mut(&mut self) -> Option<&mut CheckoutWizard> {
        self.wizard.as_mut()
    }

    /// The cart behind the panel.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Handle signals that have already arrived without waiting.
    ///
    /// Every completion signal closes the panel, including one from a
    /// wizard that was closed and replaced in the meantime.
    pub fn poll_signals(&mut self) -> Vec<PanelSignal> {
        let mut handled = Vec::new();
        while let Ok(signal) = self.signal_rx.try_recv() {
            self.handle(&signal);
            handled.push(signal);
        }
        handled
    }

    /// Wait for the next signal and handle it.
    pub async fn next_signal(&mut self) -> Option<PanelSignal> {
        let signal = self.signal_rx.recv().await?;
        self.handle(&signal);
        Some(signal)
    }

    fn handle(&mut self, signal: &PanelSignal) {
        match signal {
            PanelSignal::CheckoutCompleted { order_token } => {
                debug!(%order_token, "Auto-close signal received");
                self.close();
            }
        }
    }
}
