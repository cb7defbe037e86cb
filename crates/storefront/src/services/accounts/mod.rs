//! Account service.
//!
//! Sign-in and sign-up are simulated: the forms are checked for required
//! fields, the call waits a fixed delay standing in for a network round trip,
//! and then succeeds. No credentials are checked and nothing is stored.

mod error;

pub use error::AccountError;

use std::time::Duration;

use farmstand_core::{AccountKind, Email};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{info, instrument};

/// Default simulated round-trip time.
pub const DEFAULT_SIGN_IN_DELAY: Duration = Duration::from_secs(1);

/// Sign-in form contents.
#[derive(Debug)]
pub struct SignInForm {
    pub email: String,
    pub password: SecretString,
    pub remember_me: bool,
}

/// Sign-up form contents.
///
/// `farm_name` is only required for farmer accounts.
#[derive(Debug)]
pub struct CreateAccountForm {
    pub kind: AccountKind,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: SecretString,
    pub farm_name: String,
    pub accepted_terms: bool,
}

impl Default for CreateAccountForm {
    fn default() -> Self {
        Self {
            kind: AccountKind::default(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            password: SecretString::from(String::new()),
            farm_name: String::new(),
            accepted_terms: false,
        }
    }
}

/// The signed-in identity returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSession {
    pub kind: AccountKind,
    pub email: Email,
    /// Set for newly created accounts.
    pub display_name: Option<String>,
    /// Set for newly created farmer accounts.
    pub farm_name: Option<String>,
    pub remember_me: bool,
}

/// Simulated account service.
#[derive(Debug, Clone, Copy)]
pub struct AccountService {
    delay: Duration,
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new(DEFAULT_SIGN_IN_DELAY)
    }
}

impl AccountService {
    /// Create a service with the given simulated latency.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Sign in a customer or farmer.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidEmail` if the email is malformed, or
    /// `AccountError::MissingField` if the password is blank.
    #[instrument(skip(self, kind, form), fields(kind = %kind))]
    pub async fn sign_in(
        &self,
        kind: AccountKind,
        form: SignInForm,
    ) -> Result<AccountSession, AccountError> {
        let email = Email::parse(&form.email)?;
        require_secret("Password", &form.password)?;

        tokio::time::sleep(self.delay).await;

        info!(domain = %email.domain(), "Signed in");
        Ok(AccountSession {
            kind,
            email,
            display_name: None,
            farm_name: None,
            remember_me: form.remember_me,
        })
    }

    /// Create a customer or farmer account.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::MissingField` for the first blank required
    /// field, `AccountError::InvalidEmail` for a malformed email, and
    /// `AccountError::TermsNotAccepted` if the terms box is unticked.
    #[instrument(skip(self, form), fields(kind = %form.kind))]
    pub async fn create_account(
        &self,
        form: CreateAccountForm,
    ) -> Result<AccountSession, AccountError> {
        let first_name = require("First Name", &form.first_name)?;
        let last_name = require("Last Name", &form.last_name)?;
        let email = Email::parse(&form.email)?;
        require("Phone Number", &form.phone)?;
        require_secret("Password", &form.password)?;
        let farm_name = match form.kind {
            AccountKind::Farmer => Some(require("Farm Name", &form.farm_name)?.to_string()),
            AccountKind::Customer => None,
        };
        if !form.accepted_terms {
            return Err(AccountError::TermsNotAccepted);
        }

        tokio::time::sleep(self.delay).await;

        info!(domain = %email.domain(), "Account created");
        Ok(AccountSession {
            kind: form.kind,
            email,
            display_name: Some(format!("{first_name} {last_name}")),
            farm_name,
            remember_me: false,
        })
    }
}

fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, AccountError> {
    let value = value.trim();
    if value.is_empty() {
        Err(AccountError::MissingField(field))
    } else {
        Ok(value)
    }
}

fn require_secret(field: &'static str, value: &SecretString) -> Result<(), AccountError> {
    require(field, value.expose_secret()).map(|_| ())
}
