//! # Commands Module
//!
//! Every action the shell can take, as plain functions over the state
//! objects.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Product grid, product detail
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── auth.rs      ◄─── Login, signup, logout
//! ├── checkout.rs  ◄─── Wizard steps, place order
//! ├── orders.rs    ◄─── Tracking, status updates
//! └── config.rs    ◄─── Effective configuration
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  shell: "add 5 2"                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(                                           │
//! │      &state.cart,      ◄── only the state it needs                     │
//! │      &state.config,                                                     │
//! │      "5", Some(2),                                                      │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  views::render_cart(cfg, &response)  or  serde_json (--json)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Responses derive `Serialize` so `--json` mode can print them verbatim.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod orders;
