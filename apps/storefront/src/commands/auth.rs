//! # Auth Commands
//!
//! Login, signup and logout against the configured [`IdentityProvider`].
//!
//! ## Login Flow
//! ```text
//! login ann@example.com secret
//!      │
//!      ▼
//! validate_email / validate_password ──► "Please enter your email"
//!      │
//!      ▼
//! IdentityProvider::login ──────────────► "Authentication failed. Please try again."
//!      │
//!      ▼
//! AuthState::sign_in(user)  ──►  header shows "Hi, Subhojeet"
//! ```

use shopgrid_core::validation::{validate_email, validate_password, validate_required};
use shopgrid_core::User;
use tracing::{debug, info};

use crate::collaborators::IdentityProvider;
use crate::error::ApiError;
use crate::state::AuthState;

/// Signs in with email and password.
///
/// Any previously signed-in user is replaced.
pub async fn login(
    auth: &AuthState,
    identity: &dyn IdentityProvider,
    email: &str,
    password: &str,
) -> Result<User, ApiError> {
    let email = validate_email(email)?;
    validate_password(password)?;
    debug!(email = %email, "login command");

    let user = identity.login(&email, password).await?;
    info!(user_id = %user.id, "User signed in");

    auth.sign_in(user.clone());
    Ok(user)
}

/// Creates an account and signs it in.
pub async fn signup(
    auth: &AuthState,
    identity: &dyn IdentityProvider,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, ApiError> {
    let name = validate_required("name", name)?;
    let email = validate_email(email)?;
    validate_password(password)?;
    debug!(email = %email, "signup command");

    let user = identity.signup(&name, &email, password).await?;
    info!(user_id = %user.id, "User signed up");

    auth.sign_in(user.clone());
    Ok(user)
}

/// Signs out. Signing out when nobody is signed in is a no-op.
pub fn logout(auth: &AuthState) -> Option<User> {
    let user = auth.sign_out();
    if let Some(user) = &user {
        info!(user_id = %user.id, "User signed out");
    }
    user
}

pub fn current_user(auth: &AuthState) -> Option<User> {
    auth.current_user()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::MockIdentityProvider;
    use crate::error::{AuthError, ErrorCode, AUTH_FAILED_MESSAGE};
    use async_trait::async_trait;

    struct DownProvider;

    #[async_trait]
    impl IdentityProvider for DownProvider {
        async fn login(&self, _email: &str, _password: &str) -> Result<User, AuthError> {
            Err(AuthError::Unavailable("timeout".to_string()))
        }

        async fn signup(&self, _name: &str, _email: &str, _password: &str) -> Result<User, AuthError> {
            Err(AuthError::Unavailable("timeout".to_string()))
        }
    }

    #[tokio::test]
    async fn test_login_signs_in() {
        let auth = AuthState::new();
        let provider = MockIdentityProvider::default();

        let user = login(&auth, &provider, " ann@example.com ", "pw").await.unwrap();
        assert_eq!(user.email, "ann@example.com");
        assert_eq!(current_user(&auth), Some(user));
    }

    #[tokio::test]
    async fn test_login_requires_fields() {
        let auth = AuthState::new();
        let provider = MockIdentityProvider::default();

        let err = login(&auth, &provider, "", "pw").await.unwrap_err();
        assert_eq!(err.message, "Please enter your email");

        let err = login(&auth, &provider, "ann@example.com", "  ").await.unwrap_err();
        assert_eq!(err.message, "Please enter your password");

        let err = login(&auth, &provider, "ann.example.com", "pw").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(!auth.is_logged_in());
    }

    #[tokio::test]
    async fn test_provider_failure_is_generic() {
        let auth = AuthState::new();

        let err = login(&auth, &DownProvider, "ann@example.com", "pw").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthError);
        assert_eq!(err.message, AUTH_FAILED_MESSAGE);
        assert!(!auth.is_logged_in());
    }

    #[tokio::test]
    async fn test_signup_then_logout() {
        let auth = AuthState::new();
        let provider = MockIdentityProvider::default();

        let err = signup(&auth, &provider, " ", "ann@example.com", "pw").await.unwrap_err();
        assert_eq!(err.message, "Please enter your name");

        let user = signup(&auth, &provider, "Ann Lee", "ann@example.com", "pw").await.unwrap();
        assert_eq!(user.name, "Ann Lee");
        assert!(auth.is_logged_in());

        assert_eq!(logout(&auth).map(|u| u.id), Some("2".to_string()));
        assert!(logout(&auth).is_none());
    }
}
