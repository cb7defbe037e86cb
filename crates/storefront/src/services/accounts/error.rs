//! Account error types.

use thiserror::Error;

/// Errors that can occur during sign-in or account creation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] farmstand_core::EmailError),

    /// A required field was left blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The terms checkbox was not ticked.
    #[error("terms of service must be accepted")]
    TermsNotAccepted,
}
