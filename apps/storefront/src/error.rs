//! # Storefront Errors
//!
//! Collaborator errors plus the single user-facing [`ApiError`].
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Shell line ("track sg123")                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  ValidationError ─── "Please enter your email" ──┐              │  │
//! │  │  CoreError ───────── EmptyCart, ProductNotFound ─┤              │  │
//! │  │  OrderError ──────── NotFound, InvalidTransition ┼──► ApiError   │  │
//! │  │  AuthError ───────── provider failure ───────────┤              │  │
//! │  │  PaymentError ────── gateway failure ────────────┘              │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Shell prints the message as a blocking alert (or JSON with --json):   │
//! │  { "code": "NOT_FOUND",                                                 │
//! │    "message": "Order not found. Please check your order number." }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use serde::Serialize;
use shopgrid_core::{CoreError, ValidationError};
use shopgrid_orders::OrderError;
use thiserror::Error;

/// Alert shown when an order number lookup misses.
pub const ORDER_NOT_FOUND_MESSAGE: &str = "Order not found. Please check your order number.";

/// Alert shown when the identity provider fails.
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed. Please try again.";

// =============================================================================
// Collaborator Errors
// =============================================================================

/// Identity provider failures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing name, email or password.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Identity provider rejected the request: {0}")]
    Rejected(String),

    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Payment gateway failures.
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment declined: {0}")]
    Declined(String),

    #[error("Payment gateway unavailable: {0}")]
    Unavailable(String),
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

// =============================================================================
// API Error
// =============================================================================

/// What a failed command reports to the user.
///
/// ## Serialization
/// ```json
/// {
///   "code": "CART_ERROR",
///   "message": "Your cart is empty"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message, shown as-is
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product or order
    NotFound,

    /// Missing or malformed input
    ValidationError,

    /// Cart operation failed
    CartError,

    /// Identity provider failure
    AuthError,

    /// Payment gateway failure
    PaymentError,

    /// Order lifecycle rule broken
    OrderError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::CartError => "CART_ERROR",
            ErrorCode::AuthError => "AUTH_ERROR",
            ErrorCode::PaymentError => "PAYMENT_ERROR",
            ErrorCode::OrderError => "ORDER_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// The order-lookup alert.
    pub fn order_not_found() -> Self {
        ApiError::new(ErrorCode::NotFound, ORDER_NOT_FOUND_MESSAGE)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Missing input reads as a prompt ("Please enter your email"); every other
/// validation failure keeps its own wording.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Required { field } => {
                ApiError::validation(format!("Please enter your {}", field))
            }
            other => ApiError::validation(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::EmptyCart => ApiError::cart(CoreError::EmptyCart.to_string()),
            CoreError::OrderNotFound(_) => ApiError::order_not_found(),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(_) => ApiError::order_not_found(),
            e @ OrderError::InvalidTransition { .. } => {
                ApiError::new(ErrorCode::OrderError, e.to_string())
            }
            OrderError::Core(e) => e.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(e) => e.into(),
            other => {
                tracing::error!(error = %other, "Identity provider failed");
                ApiError::new(ErrorCode::AuthError, AUTH_FAILED_MESSAGE)
            }
        }
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        tracing::error!(error = %err, "Payment failed");
        ApiError::new(ErrorCode::PaymentError, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}
