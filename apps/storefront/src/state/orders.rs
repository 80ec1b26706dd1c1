//! # Order State
//!
//! The session's [`OrderBook`] plus the number of the most recently placed
//! order, which the order-success view and a bare `track` fall back to.

use std::sync::{Arc, Mutex, PoisonError};

use shopgrid_orders::OrderBook;

#[derive(Debug, Clone)]
pub struct OrderState {
    book: OrderBook,
    last_placed: Arc<Mutex<Option<String>>>,
}

impl OrderState {
    pub fn new(book: OrderBook) -> Self {
        OrderState {
            book,
            last_placed: Arc::new(Mutex::new(None)),
        }
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn last_placed(&self) -> Option<String> {
        self.last_placed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn remember_placed(&self, order_number: &str) {
        *self.last_placed.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(order_number.to_string());
    }
}
