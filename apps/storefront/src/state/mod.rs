//! # State Module
//!
//! Explicit state objects owned by [`AppState`](crate::AppState). Nothing in
//! the storefront is a global; every command receives the states it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │  CartState   │ │  AuthState   │ │  OrderState  │ │CheckoutState │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │  Arc<Mutex<  │ │  Arc<Mutex<  │ │  OrderBook   │ │  Arc<Mutex<  │   │
//! │  │    Cart>>    │ │ Option<User>>│ │  + last no.  │ │ Option<Draft>│   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  ConfigState: Arc<StorefrontConfig>, read-only after startup     │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Mutex-wrapped states recover from poisoning instead of panicking    │
//! │  • OrderBook is shared with its own timer tasks                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod cart;
mod checkout;
mod config;
mod orders;

pub use auth::AuthState;
pub use cart::CartState;
pub use checkout::{AddressField, CheckoutDraft, CheckoutState, CheckoutStep};
pub use config::ConfigState;
pub use orders::OrderState;
