//! Simulated sign-in and sign-up through the shared application state.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use farmstand_core::AccountKind;
use farmstand_integration_tests::seeded_state;
use farmstand_storefront::services::accounts::{AccountError, CreateAccountForm, SignInForm};
use secrecy::SecretString;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_farmer_sign_in_takes_configured_delay() {
    let state = seeded_state();
    let started = Instant::now();

    let session = state
        .accounts()
        .sign_in(
            AccountKind::Farmer,
            SignInForm {
                email: "hen@happyhens.farm".to_string(),
                password: SecretString::from("cluck-cluck".to_string()),
                remember_me: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(started.elapsed(), Duration::from_secs(1));
    assert_eq!(session.kind, AccountKind::Farmer);
    assert_eq!(session.email.domain(), "happyhens.farm");
    assert!(session.remember_me);
}

#[tokio::test(start_paused = true)]
async fn test_farmer_sign_up_requires_farm_name() {
    let state = seeded_state();
    let mut form = CreateAccountForm {
        kind: AccountKind::Farmer,
        first_name: "Sam".to_string(),
        last_name: "Miller".to_string(),
        email: "sam@millerfarm.example".to_string(),
        phone: "555-0199".to_string(),
        password: SecretString::from("tomatoes".to_string()),
        accepted_terms: true,
        ..CreateAccountForm::default()
    };

    let started = Instant::now();
    let err = state.accounts().create_account(form).await.unwrap_err();
    assert_eq!(err, AccountError::MissingField("Farm Name"));
    // Rejected before the simulated delay
    assert_eq!(started.elapsed(), Duration::ZERO);

    form = CreateAccountForm {
        kind: AccountKind::Farmer,
        first_name: "Sam".to_string(),
        last_name: "Miller".to_string(),
        email: "sam@millerfarm.example".to_string(),
        phone: "555-0199".to_string(),
        password: SecretString::from("tomatoes".to_string()),
        farm_name: "Miller's Family Farm".to_string(),
        accepted_terms: true,
    };
    let session = state.accounts().create_account(form).await.unwrap();
    assert_eq!(session.display_name.as_deref(), Some("Sam Miller"));
    assert_eq!(session.farm_name.as_deref(), Some("Miller's Family Farm"));
}

#[tokio::test(start_paused = true)]
async fn test_sign_in_rejects_bad_email() {
    let state = seeded_state();
    let result = state
        .accounts()
        .sign_in(
            AccountKind::Customer,
            SignInForm {
                email: "not-an-email".to_string(),
                password: SecretString::from("secret".to_string()),
                remember_me: false,
            },
        )
        .await;
    assert!(matches!(result, Err(AccountError::InvalidEmail(_))));
}
