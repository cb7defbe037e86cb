//! Unified error handling.
//!
//! Provides a unified `AppError` type for operations that cross module
//! boundaries. Binaries report these through `tracing::error!` (and Sentry,
//! when configured) before exiting.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::services::accounts::AccountError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog could not be loaded or a lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A checkout transition was blocked.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Sign-in or sign-up was rejected.
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Whether the error points at a broken deployment rather than bad input.
    ///
    /// Only these are worth reporting to error tracking.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::Catalog(CatalogError::Io { .. } | CatalogError::Parse(_))
                | Self::Checkout(CheckoutError::Scheduler(_))
        )
    }
}

/// Result type alias for storefront operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use farmstand_core::ProductId;

    use super::*;
    use crate::scheduler::SchedulerError;

    #[test]
    fn test_input_errors_are_not_internal() {
        let err = AppError::from(CheckoutError::EmptyCart);
        assert!(!err.is_internal());
        assert_eq!(err.to_string(), "Checkout error: cart is empty");

        let err = AppError::from(CatalogError::ProductNotFound(ProductId::new(9)));
        assert!(!err.is_internal());
    }

    #[test]
    fn test_config_errors_are_internal() {
        let err = AppError::from(ConfigError::InvalidEnvVar(
            "FARMSTAND_FEATURED_COUNT".to_string(),
            "must be at least 1".to_string(),
        ));
        assert!(err.is_internal());
    }

    #[test]
    fn test_missing_runtime_is_internal() {
        let err = AppError::from(CheckoutError::from(SchedulerError::NoRuntime));
        assert!(err.is_internal());
    }
}
