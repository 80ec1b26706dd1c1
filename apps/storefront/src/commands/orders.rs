//! # Order Commands
//!
//! Tracking lookups and manual lifecycle changes.
//!
//! ```text
//! track SG4K2J9Q1ZX  ──► OrderBook::require_by_number ──► timeline
//! track              ──► the order placed last in this session
//! orders             ──► every order, newest first
//! status SG… delivered / cancel SG…  ──► OrderBook::update_status
//! ```

use shopgrid_core::{Order, OrderStatus, ValidationError};
use shopgrid_orders::OrderError;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::OrderState;

fn resolve_number(orders: &OrderState, order_number: Option<&str>) -> Result<String, ApiError> {
    match order_number.map(str::trim).filter(|n| !n.is_empty()) {
        Some(number) => Ok(number.to_string()),
        None => orders
            .last_placed()
            .ok_or_else(|| ValidationError::required("order number").into()),
    }
}

/// Looks an order up by number, case-insensitively.
///
/// With no number, falls back to the order placed last in this session.
pub fn track_order(orders: &OrderState, order_number: Option<&str>) -> Result<Order, ApiError> {
    let number = resolve_number(orders, order_number)?;
    debug!(order_number = %number, "track_order command");
    Ok(orders.book().require_by_number(&number)?)
}

/// All orders, newest first.
pub fn list_orders(orders: &OrderState) -> Vec<Order> {
    debug!("list_orders command");
    let mut all = orders.book().orders();
    all.reverse();
    all
}

/// Moves an order to `status` by hand (delivery desk, support tools).
///
/// Backward moves and moves out of delivered/cancelled are rejected.
pub fn update_order_status(
    orders: &OrderState,
    order_number: &str,
    status: &str,
) -> Result<Order, ApiError> {
    let status: OrderStatus = status.parse()?;
    let order = orders.book().require_by_number(order_number)?;
    debug!(order_number = %order.order_number, %status, "update_order_status command");

    orders.book().update_status(&order.id, status)?;
    info!(order_number = %order.order_number, %status, "Order status changed by hand");

    orders
        .book()
        .get_order(&order.id)
        .ok_or_else(|| OrderError::NotFound(order.order_number.clone()).into())
}

/// Cancels an order that has not been delivered yet.
pub fn cancel_order(orders: &OrderState, order_number: &str) -> Result<Order, ApiError> {
    update_order_status(orders, order_number, OrderStatus::Cancelled.as_str())
}
