//! # shopgrid-core: Pure Business Logic for the ShopGrid Storefront
//!
//! Everything in this crate is deterministic and free of I/O. Timers, the
//! order store and the terminal UI live in the crates layered on top.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ShopGrid Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/storefront (terminal shell)                │   │
//! │  │   Catalog ──► Cart ──► Checkout wizard ──► Order tracking      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │         shopgrid-orders (OrderBook, Scheduler, Clock)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopgrid-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │ catalog │ │  cart   │ │ pricing │  │   │
//! │  │   │ Product │ │  Money  │ │ filter  │ │  Cart   │ │ delivery│  │   │
//! │  │   │  Order  │ │         │ │  sort   │ │CartItem │ │ discount│  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO GLOBAL STATE • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, User, Address, Order, TrackingUpdate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Static demo catalog plus filter/sort queries
//! - [`cart`] - Cart state transitions and derived totals
//! - [`pricing`] - Delivery fee and discount rules
//! - [`error`] - Domain error types
//! - [`validation`] - Required-input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use shopgrid_core::cart::Cart;
//! use shopgrid_core::catalog;
//! use shopgrid_core::pricing::DeliveryPolicy;
//!
//! let jeans = catalog::find_product("5").unwrap();
//!
//! let mut cart = Cart::new();
//! cart.add(jeans);
//! cart.add(jeans);
//!
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.subtotal().minor_units(), 2 * 2999);
//!
//! // Above the free-delivery threshold, so no fee
//! let quote = DeliveryPolicy::default().quote(cart.subtotal());
//! assert!(quote.fee.is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Label of the catalog pseudo-category that matches every product.
pub const ALL_CATEGORIES: &str = "All Categories";

/// Country prefilled on the checkout address step.
pub const DEFAULT_COUNTRY: &str = "India";
