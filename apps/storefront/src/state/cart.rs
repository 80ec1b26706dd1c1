//! # Cart State
//!
//! The session's shopping cart behind an `Arc<Mutex<_>>`.
//!
//! ## Thread Safety
//! The shell is the only writer, but the checkout command awaits a delay
//! between reading the cart and clearing it, so access is serialized through
//! the mutex. A poisoned lock is recovered rather than propagated: the cart
//! holds no invariant a panicking reader could have broken halfway.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shell Command             Cart State Change                            │
//! │  ─────────────             ─────────────────                            │
//! │  add 5 [n] ─────────────►  with_cart_mut(|c| c.add_many(p, n))          │
//! │  qty 5 3 ───────────────►  with_cart_mut(|c| c.set_quantity("5", 3))    │
//! │  remove 5 ──────────────►  with_cart_mut(|c| c.remove("5"))             │
//! │  place ─────────────────►  with_cart(|c| c.snapshot()) … clear()        │
//! │  cart ──────────────────►  with_cart(|c| CartTotals::compute(c, …))     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use shopgrid_core::Cart;

/// Thread-safe wrapper for the shopping cart.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add(product));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    /// Units in the cart, for the header badge.
    pub fn item_count(&self) -> u32 {
        self.with_cart(Cart::item_count)
    }
}
