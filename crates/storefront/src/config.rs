//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `FARMSTAND_CATALOG_PATH` - YAML catalog to load instead of the built-in one
//! - `FARMSTAND_CONFIRMATION_DELAY_MS` - Delay before a confirmed order clears the cart (default: 3000)
//! - `FARMSTAND_SIGN_IN_DELAY_MS` - Simulated sign-in latency (default: 1000)
//! - `FARMSTAND_WISHLIST_FLASH_MS` - How long the wishlist "added" badge shows (default: 2000)
//! - `FARMSTAND_FEATURED_COUNT` - Products in the featured strip (default: 4)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::catalog::DEFAULT_FEATURED_COUNT;

const DEFAULT_CONFIRMATION_DELAY_MS: &str = "3000";
const DEFAULT_SIGN_IN_DELAY_MS: &str = "1000";
const DEFAULT_WISHLIST_FLASH_MS: &str = "2000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Catalog file overriding the built-in seed catalog
    pub catalog_path: Option<PathBuf>,
    /// Delay between order confirmation and the cart being cleared
    pub confirmation_delay: Duration,
    /// Simulated latency of sign-in and account creation
    pub sign_in_delay: Duration,
    /// How long the wishlist "Added to Cart" badge stays up
    pub wishlist_flash: Duration,
    /// Number of products in the featured strip
    pub featured_count: usize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            confirmation_delay: Duration::from_secs(3),
            sign_in_delay: Duration::from_secs(1),
            wishlist_flash: Duration::from_secs(2),
            featured_count: DEFAULT_FEATURED_COUNT,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let featured_count: usize =
            env.parsed_or_default("FARMSTAND_FEATURED_COUNT", &DEFAULT_FEATURED_COUNT.to_string())?;
        if featured_count == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "FARMSTAND_FEATURED_COUNT".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            catalog_path: env.optional("FARMSTAND_CATALOG_PATH").map(PathBuf::from),
            confirmation_delay: env
                .millis_or_default("FARMSTAND_CONFIRMATION_DELAY_MS", DEFAULT_CONFIRMATION_DELAY_MS)?,
            sign_in_delay: env.millis_or_default("FARMSTAND_SIGN_IN_DELAY_MS", DEFAULT_SIGN_IN_DELAY_MS)?,
            wishlist_flash: env
                .millis_or_default("FARMSTAND_WISHLIST_FLASH_MS", DEFAULT_WISHLIST_FLASH_MS)?,
            featured_count,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a, F>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Get an optional variable. Blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Get and parse a variable with a default value.
    fn parsed_or_default<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    /// Get a millisecond duration with a default value.
    fn millis_or_default(&self, key: &str, default: &str) -> Result<Duration, ConfigError> {
        self.parsed_or_default::<u64>(key, default)
            .map(Duration::from_millis)
    }
}
