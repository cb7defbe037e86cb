//! Shipping and payment form buffers.
//!
//! Buffers hold raw strings exactly as typed. The only check is that
//! required fields are non-empty. Whitespace counts as input. There is no
//! format validation.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

/// A required field on the shipping form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingField {
    FirstName,
    LastName,
    Email,
    Phone,
    Street,
    City,
    State,
    ZipCode,
}

impl ShippingField {
    /// All fields, in form order.
    pub const ALL: [Self; 8] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::Street,
        Self::City,
        Self::State,
        Self::ZipCode,
    ];

    /// Field label as shown on the form.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Street => "Street Address",
            Self::City => "City",
            Self::State => "State",
            Self::ZipCode => "ZIP Code",
        }
    }
}

/// Shipping details entered during checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl ShippingInfo {
    /// Current value of a field.
    #[must_use]
    pub fn get(&self, field: ShippingField) -> &str {
        match field {
            ShippingField::FirstName => &self.first_name,
            ShippingField::LastName => &self.last_name,
            ShippingField::Email => &self.email,
            ShippingField::Phone => &self.phone,
            ShippingField::Street => &self.street,
            ShippingField::City => &self.city,
            ShippingField::State => &self.state,
            ShippingField::ZipCode => &self.zip_code,
        }
    }

    /// Replace the value of a field.
    pub fn set(&mut self, field: ShippingField, value: impl Into<String>) {
        let slot = match field {
            ShippingField::FirstName => &mut self.first_name,
            ShippingField::LastName => &mut self.last_name,
            ShippingField::Email => &mut self.email,
            ShippingField::Phone => &mut self.phone,
            ShippingField::Street => &mut self.street,
            ShippingField::City => &mut self.city,
            ShippingField::State => &mut self.state,
            ShippingField::ZipCode => &mut self.zip_code,
        };
        *slot = value.into();
    }

    /// Required fields that are still blank, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<ShippingField> {
        ShippingField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    /// Whether every required field is filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// "First Last" for the confirmation screen.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// A required field on the payment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentField {
    CardNumber,
    Expiry,
    Cvc,
}

impl PaymentField {
    /// All fields, in form order.
    pub const ALL: [Self; 3] = [Self::CardNumber, Self::Expiry, Self::Cvc];

    /// Field label as shown on the form.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CardNumber => "Card Number",
            Self::Expiry => "Expiry Date",
            Self::Cvc => "CVC",
        }
    }
}

/// Card details entered during checkout.
///
/// Card number and CVC are secrets and never appear in `Debug` output or
/// logs. Nothing here is sent anywhere.
#[derive(Debug)]
pub struct PaymentInfo {
    card_number: SecretString,
    expiry: String,
    cvc: SecretString,
}

impl Default for PaymentInfo {
    fn default() -> Self {
        Self {
            card_number: SecretString::from(String::new()),
            expiry: String::new(),
            cvc: SecretString::from(String::new()),
        }
    }
}

impl PaymentInfo {
    /// Replace the value of a field.
    pub fn set(&mut self, field: PaymentField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PaymentField::CardNumber => self.card_number = SecretString::from(value),
            PaymentField::Expiry => self.expiry = value,
            PaymentField::Cvc => self.cvc = SecretString::from(value),
        }
    }

    /// Expiry as typed (`MM/YY`, unchecked).
    #[must_use]
    pub fn expiry(&self) -> &str {
        &self.expiry
    }

    /// Last four characters of the card number for display, e.g. `•••• 4242`.
    #[must_use]
    pub fn masked_card_number(&self) -> String {
        let digits: Vec<char> = self
            .card_number
            .expose_secret()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let tail: String = digits.iter().skip(digits.len().saturating_sub(4)).collect();
        format!("•••• {tail}")
    }

    fn is_blank(&self, field: PaymentField) -> bool {
        match field {
            PaymentField::CardNumber => self.card_number.expose_secret().is_empty(),
            PaymentField::Expiry => self.expiry.is_empty(),
            PaymentField::Cvc => self.cvc.expose_secret().is_empty(),
        }
    }

    /// Required fields that are still blank, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<PaymentField> {
        PaymentField::ALL
            .into_iter()
            .filter(|field| self.is_blank(*field))
            .collect()
    }

    /// Whether every required field is filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
