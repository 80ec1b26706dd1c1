//! # Validation Module
//!
//! Required-input and format checks run before any state changes.
//!
//! ## Where Checks Sit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shell input ("login  ann@example.com  ****")                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  THIS MODULE: blank? too long? malformed?                              │
//! │       │                                                                 │
//! │       ├── Err(ValidationError) ──► alert, nothing changed              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  State transition (auth, cart, checkout)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopgrid_core::validation::{validate_email, validate_required};
//!
//! assert_eq!(validate_required("name", "  Ann ").unwrap(), "Ann");
//! assert!(validate_email("   ").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::Address;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Upper bound of the product page quantity selector.
pub const MAX_ITEM_QUANTITY: i64 = 99;

/// Longest accepted catalog search string.
pub const MAX_SEARCH_LENGTH: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Rejects blank input and returns the trimmed value.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(value.to_string())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be blank
/// - Exactly one `@` with something on both sides
///
/// The mock identity provider accepts any address, so this is the only
/// check an email ever gets.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = validate_required("email", email)?;

    let malformed = match email.split_once('@') {
        Some((local, domain)) => local.is_empty() || domain.is_empty() || domain.contains('@'),
        None => true,
    };
    if malformed {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "expected name@domain".to_string(),
        });
    }

    Ok(email)
}

/// Password only needs to be present. Surrounding whitespace is kept.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.trim().is_empty() {
        return Err(ValidationError::required("password"));
    }
    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches the whole catalog)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LENGTH {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_LENGTH,
        });
    }

    Ok(query.to_string())
}

/// Validates a shipping address on the checkout address step.
///
/// Street, city, state and pincode must be non-blank. The pincode is free
/// text so foreign postcodes pass. A blank country is left for the caller
/// to default.
pub fn validate_address(address: &Address) -> ValidationResult<()> {
    validate_required("street", &address.street)?;
    validate_required("city", &address.city)?;
    validate_required("state", &address.state)?;
    validate_required("pincode", &address.postal_code)?;
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity picked on the product page.
///
/// ## Rules
/// - Must be positive (> 0); the selector floor is 1
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
///
/// Cart line edits do not go through here: a zero or negative quantity on an
/// existing line means "remove", and any positive quantity is set as given.
pub fn validate_quantity(qty: i64) -> ValidationResult<u32> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: format!("cannot exceed {}", MAX_ITEM_QUANTITY),
        });
    }

    Ok(qty as u32)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Address {
        Address {
            street: "12 MG Road".to_string(),
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            postal_code: "411001".to_string(),
            country: String::new(),
        }
    }

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("name", " Ann ").unwrap(), "Ann");
        assert_eq!(
            validate_required("name", "   "),
            Err(ValidationError::required("name"))
        );
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email(" ann@example.com ").unwrap(), "ann@example.com");
        assert_eq!(validate_email(""), Err(ValidationError::required("email")));
        assert!(validate_email("ann.example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ann@").is_err());
        assert!(validate_email("a@b@c").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("hunter2").is_ok());
        assert_eq!(validate_password(" "), Err(ValidationError::required("password")));
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  sony ").unwrap(), "sony");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address(&address()).is_ok());

        let mut missing_city = address();
        missing_city.city = " ".to_string();
        assert_eq!(
            validate_address(&missing_city),
            Err(ValidationError::required("city"))
        );

        let mut blank_pin = address();
        blank_pin.postal_code = String::new();
        assert_eq!(
            validate_address(&blank_pin),
            Err(ValidationError::required("pincode"))
        );

        let mut us = address();
        us.city = "San Francisco".to_string();
        us.state = "CA".to_string();
        us.postal_code = "94105".to_string();
        us.country = "USA".to_string();
        assert!(validate_address(&us).is_ok());
    }

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity(1).unwrap(), 1);
        assert_eq!(validate_quantity(99).unwrap(), 99);

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(100).is_err());
    }
}
