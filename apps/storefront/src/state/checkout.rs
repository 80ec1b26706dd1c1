//! # Checkout State
//!
//! The three-step checkout wizard.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌───────────┐  next (validates)  ┌───────────┐  next  ┌───────────┐  │
//! │   │  Address  │ ─────────────────► │  Payment  │ ─────► │  Review   │  │
//! │   │           │ ◄───────────────── │           │ ◄───── │           │  │
//! │   └───────────┘        back        └───────────┘  back  └─────┬─────┘  │
//! │   name, phone, street,             cod | upi | card           │ place   │
//! │   city, state, pincode,                                       ▼         │
//! │   country (default India)                           commands::checkout  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use shopgrid_core::validation::{validate_address, validate_required};
use shopgrid_core::{Address, PaymentMethod, User, ValidationError};

/// Where the wizard is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    #[default]
    Address,
    Payment,
    Review,
}

impl CheckoutStep {
    /// 1-based, for "Step 2 of 3".
    pub const fn number(&self) -> u8 {
        match self {
            CheckoutStep::Address => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Review => 3,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            CheckoutStep::Address => "Shipping Address",
            CheckoutStep::Payment => "Payment Method",
            CheckoutStep::Review => "Review Order",
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Editable fields on the address step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    Name,
    Phone,
    Street,
    City,
    State,
    Pincode,
    Country,
}

impl AddressField {
    pub const ALL: [AddressField; 7] = [
        AddressField::Name,
        AddressField::Phone,
        AddressField::Street,
        AddressField::City,
        AddressField::State,
        AddressField::Pincode,
        AddressField::Country,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            AddressField::Name => "name",
            AddressField::Phone => "phone",
            AddressField::Street => "street",
            AddressField::City => "city",
            AddressField::State => "state",
            AddressField::Pincode => "pincode",
            AddressField::Country => "country",
        }
    }
}

impl FromStr for AddressField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let wanted = match wanted.as_str() {
            "address" => "street",
            "zip" | "postal_code" => "pincode",
            other => other,
        };
        AddressField::ALL
            .into_iter()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "field".to_string(),
                allowed: AddressField::ALL.iter().map(|f| f.as_str().to_string()).collect(),
            })
    }
}

/// Everything entered so far.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDraft {
    pub step: CheckoutStep,
    pub full_name: String,
    pub phone: String,
    pub address: Address,
    pub payment_method: PaymentMethod,
}

impl CheckoutDraft {
    /// A fresh draft on the address step, prefilled from the signed-in user.
    pub fn start(user: Option<&User>, default_country: &str) -> Self {
        let mut draft = CheckoutDraft::default();

        if let Some(user) = user {
            draft.full_name = user.name.clone();
            draft.phone = user.phone.clone().unwrap_or_default();
            if let Some(address) = &user.address {
                draft.address = address.clone();
            }
        }
        if draft.address.country.trim().is_empty() {
            draft.address.country = default_country.to_string();
        }

        draft
    }

    pub fn set_field(&mut self, field: AddressField, value: &str) {
        let value = value.trim().to_string();
        match field {
            AddressField::Name => self.full_name = value,
            AddressField::Phone => self.phone = value,
            AddressField::Street => self.address.street = value,
            AddressField::City => self.address.city = value,
            AddressField::State => self.address.state = value,
            AddressField::Pincode => self.address.postal_code = value,
            AddressField::Country => self.address.country = value,
        }
    }

    /// Picks a payment method. Only the checkout options are offered.
    pub fn choose_payment(&mut self, method: PaymentMethod) -> Result<(), ValidationError> {
        if !PaymentMethod::CHECKOUT_OPTIONS.contains(&method) {
            return Err(ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: PaymentMethod::CHECKOUT_OPTIONS
                    .iter()
                    .map(|m| m.as_str().to_string())
                    .collect(),
            });
        }
        self.payment_method = method;
        Ok(())
    }

    /// Checks the address step.
    pub fn validate_address_step(&self) -> Result<(), ValidationError> {
        validate_required("name", &self.full_name)?;
        validate_required("phone", &self.phone)?;
        validate_address(&self.address)?;
        validate_required("country", &self.address.country)?;
        Ok(())
    }

    /// Moves forward one step. Leaving the address step requires a valid
    /// address; the review step is the last one and stays put.
    pub fn next(&mut self) -> Result<CheckoutStep, ValidationError> {
        self.step = match self.step {
            CheckoutStep::Address => {
                self.validate_address_step()?;
                CheckoutStep::Payment
            }
            CheckoutStep::Payment => CheckoutStep::Review,
            CheckoutStep::Review => CheckoutStep::Review,
        };
        Ok(self.step)
    }

    /// Moves back one step; the address step stays put.
    pub fn back(&mut self) -> CheckoutStep {
        self.step = match self.step {
            CheckoutStep::Address | CheckoutStep::Payment => CheckoutStep::Address,
            CheckoutStep::Review => CheckoutStep::Payment,
        };
        self.step
    }
}

/// The wizard in progress, if any.
#[derive(Debug, Clone, Default)]
pub struct CheckoutState {
    draft: Arc<Mutex<Option<CheckoutDraft>>>,
}

impl CheckoutState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts over with `draft`, discarding any wizard in progress.
    pub fn begin(&self, draft: CheckoutDraft) {
        *self.draft.lock().unwrap_or_else(PoisonError::into_inner) = Some(draft);
    }

    pub fn is_active(&self) -> bool {
        self.draft
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn current(&self) -> Option<CheckoutDraft> {
        self.draft
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Runs `f` on the active draft; `None` when no checkout is open.
    pub fn with_draft_mut<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut CheckoutDraft) -> R,
    {
        let mut draft = self.draft.lock().unwrap_or_else(PoisonError::into_inner);
        draft.as_mut().map(f)
    }

    /// Closes the wizard, returning what was entered.
    pub fn finish(&self) -> Option<CheckoutDraft> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}
