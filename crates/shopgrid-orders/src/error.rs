//! # Order Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────────┐  ┌─────────────────────┐ │
//! │  │    Lookup       │  │    Lifecycle        │  │      Domain         │ │
//! │  │                 │  │                     │  │                     │ │
//! │  │  NotFound       │  │  InvalidTransition  │  │  Core(CoreError)    │ │
//! │  └─────────────────┘  └─────────────────────┘  └─────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopgrid_core::{CoreError, OrderStatus};
use thiserror::Error;

/// Result type alias for order operations.
pub type OrderResult<T> = Result<T, OrderError>;

#[derive(Debug, Error)]
pub enum OrderError {
    /// No order with this id or number.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The requested status would move the order backwards or out of a
    /// terminal state.
    #[error("Cannot move order {order_number} from {from} to {to}")]
    InvalidTransition {
        order_number: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl OrderError {
    /// True for lookup misses, which the UI reports differently.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            OrderError::NotFound(_) | OrderError::Core(CoreError::OrderNotFound(_))
        )
    }
}
