//! # Auth State
//!
//! Who is signed in, if anyone. Identities come from the
//! [`IdentityProvider`](crate::collaborators::IdentityProvider); this type
//! only remembers the result.

use std::sync::{Arc, Mutex, PoisonError};

use shopgrid_core::User;

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    user: Arc<Mutex<Option<User>>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Replaces whoever was signed in.
    pub fn sign_in(&self, user: User) {
        *self.user.lock().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    /// Returns the user that was signed in.
    pub fn sign_out(&self) -> Option<User> {
        self.user.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            phone: None,
            address: None,
        }
    }

    #[test]
    fn test_sign_in_replaces_user() {
        let auth = AuthState::new();
        assert!(!auth.is_logged_in());

        auth.sign_in(user("1"));
        auth.sign_in(user("2"));
        assert_eq!(auth.current_user().map(|u| u.id), Some("2".to_string()));

        assert!(auth.sign_out().is_some());
        assert!(!auth.is_logged_in());
        assert!(auth.sign_out().is_none());
    }
}
