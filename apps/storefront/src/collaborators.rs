//! # External Collaborators
//!
//! The storefront talks to two outside services: an identity provider for
//! login/signup and a payment gateway for checkout. Both sit behind traits;
//! the shipped implementations are in-process mocks that always succeed.
//!
//! ```text
//! ┌──────────────────────┐      ┌───────────────────────────────────────┐
//! │  commands::auth      │ ───► │ dyn IdentityProvider                  │
//! │                      │      │   MockIdentityProvider (demo user)    │
//! └──────────────────────┘      └───────────────────────────────────────┘
//! ┌──────────────────────┐      ┌───────────────────────────────────────┐
//! │  commands::checkout  │ ───► │ dyn PaymentGateway                    │
//! │                      │      │   MockPaymentGateway (instant approve)│
//! └──────────────────────┘      └───────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shopgrid_core::{Money, PaymentMethod, PaymentStatus, User};
use tracing::debug;

use crate::config::DemoSection;
use crate::error::{AuthError, PaymentError};

// =============================================================================
// Identity
// =============================================================================

/// Issues user identities.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError>;

    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError>;
}

/// Accepts any credentials.
///
/// Login returns the configured demo customer with the email that was typed;
/// signup returns a fresh customer carrying the supplied name and email.
#[derive(Debug, Clone, Default)]
pub struct MockIdentityProvider {
    demo: DemoSection,
}

impl MockIdentityProvider {
    pub fn new(demo: DemoSection) -> Self {
        MockIdentityProvider { demo }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn login(&self, email: &str, _password: &str) -> Result<User, AuthError> {
        debug!(email, "Mock login");
        Ok(User {
            id: "1".to_string(),
            name: self.demo.user_name.clone(),
            email: email.to_string(),
            phone: Some(self.demo.user_phone.clone()),
            address: None,
        })
    }

    async fn signup(&self, name: &str, email: &str, _password: &str) -> Result<User, AuthError> {
        debug!(email, "Mock signup");
        Ok(User {
            id: "2".to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            address: None,
        })
    }
}

// =============================================================================
// Payments
// =============================================================================

/// Proof that a charge went through (or, for cash on delivery, was deferred).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub method: PaymentMethod,
    pub amount: Money,
    pub status: PaymentStatus,
}

/// Takes payment for an order.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, amount: Money, method: PaymentMethod) -> Result<PaymentReceipt, PaymentError>;
}

/// Approves every charge immediately. Cash on delivery stays pending.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockPaymentGateway;

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn charge(&self, amount: Money, method: PaymentMethod) -> Result<PaymentReceipt, PaymentError> {
        debug!(%amount, %method, "Mock charge approved");
        Ok(PaymentReceipt {
            method,
            amount,
            status: method.initial_payment_status(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_login_uses_demo_identity() {
        let provider = MockIdentityProvider::default();
        let user = provider.login("ann@example.com", "secret").await.unwrap();

        assert_eq!(user.id, "1");
        assert_eq!(user.name, "Subhojeet Ganguli");
        assert_eq!(user.email, "ann@example.com");
        assert_eq!(user.phone.as_deref(), Some("+91 9305205959"));
    }

    #[tokio::test]
    async fn test_mock_signup_keeps_supplied_name() {
        let provider = MockIdentityProvider::default();
        let user = provider.signup("Ann Lee", "ann@example.com", "secret").await.unwrap();

        assert_eq!(user.id, "2");
        assert_eq!(user.name, "Ann Lee");
        assert!(user.phone.is_none());
    }

    #[tokio::test]
    async fn test_mock_gateway_statuses() {
        let gateway = MockPaymentGateway;
        let amount = Money::from_minor(540);

        let cod = gateway.charge(amount, PaymentMethod::Cod).await.unwrap();
        assert_eq!(cod.status, PaymentStatus::Pending);

        let upi = gateway.charge(amount, PaymentMethod::Upi).await.unwrap();
        assert_eq!(upi.status, PaymentStatus::Paid);
        assert_eq!(upi.amount, amount);
    }
}
