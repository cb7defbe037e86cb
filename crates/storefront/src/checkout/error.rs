//! Checkout error types.

use thiserror::Error;

use super::CheckoutStep;
use super::forms::{PaymentField, ShippingField};
use crate::scheduler::SchedulerError;

/// Why a checkout transition was not taken.
///
/// The wizard always stays on its current step. All but `Scheduler` are input
/// problems the shopper can fix and retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The cart has no lines, so checkout cannot start.
    #[error("cart is empty")]
    EmptyCart,

    /// Required shipping fields are blank.
    #[error("missing shipping fields: {}", labels(.0.iter().map(ShippingField::label)))]
    MissingShipping(Vec<ShippingField>),

    /// Required payment fields are blank.
    #[error("missing payment fields: {}", labels(.0.iter().map(PaymentField::label)))]
    MissingPayment(Vec<PaymentField>),

    /// The action belongs to a different step.
    #[error("cannot {action} while on the {actual} step (expected {expected})")]
    InvalidStep {
        action: &'static str,
        expected: CheckoutStep,
        actual: CheckoutStep,
    },

    /// The cart auto-clear could not be scheduled.
    #[error("could not schedule cart clear: {0}")]
    Scheduler(#[from] SchedulerError),
}

fn labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}
