//! # Cart Commands
//!
//! Add, change and remove cart lines, with totals recomputed on every call.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  Wizard  │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       ▲                │                                 │              │
//! │       │           add_to_cart                            │              │
//! │       │           update_cart_item                       │              │
//! │       │           remove_from_cart                       │              │
//! │       │                │                                 │              │
//! │       └── clear_cart ──┘◄──── place_order empties it ────┘              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopgrid_core::catalog;
use shopgrid_core::validation::validate_quantity;
use shopgrid_core::pricing::DeliveryPolicy;
use shopgrid_core::{Cart, CartItem, CartTotals, CoreError};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CartState, ConfigState};

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl CartResponse {
    fn build(cart: &Cart, policy: &DeliveryPolicy) -> Self {
        CartResponse {
            items: cart.snapshot(),
            totals: CartTotals::compute(cart, policy),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Shopping Cart (2 items)                                                │
/// │                                                                         │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  Levi's 511 Slim Jeans         x2              ₹5998           │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Subtotal                                      ₹5998           │    │
/// │  │  Delivery                                      FREE            │    │
/// │  │  ──────────────────────────────────────────────────            │    │
/// │  │  Total                                         ₹5998           │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(cart: &CartState, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    let policy = config.delivery_policy();
    cart.with_cart(|c| CartResponse::build(c, &policy))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases
/// - If product not in cart: added as new line
/// - The product is copied into the line, so the cart keeps the price it
///   was added at
///
/// ## Arguments
/// * `product_id` - Catalog id
/// * `quantity` - Units to add (default: 1, at most 99)
pub fn add_to_cart(
    cart: &CartState,
    config: &ConfigState,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = validate_quantity(quantity.unwrap_or(1))?;
    debug!(product_id, quantity, "add_to_cart command");

    let product = catalog::find_product(product_id)
        .ok_or_else(|| CoreError::ProductNotFound(product_id.trim().to_string()))?;

    if !product.in_stock {
        return Err(ApiError::cart(format!("{} is out of stock", product.name)));
    }

    let policy = config.delivery_policy();
    Ok(cart.with_cart_mut(|c| {
        c.add_many(product, quantity);
        CartResponse::build(c, &policy)
    }))
}

/// Sets the quantity of a cart line.
///
/// ## Behavior
/// - `quantity <= 0`: removes the line
/// - Otherwise sets the quantity exactly; the 99 cap only applies per add
/// - Product not in cart: cart unchanged
pub fn update_cart_item(
    cart: &CartState,
    config: &ConfigState,
    product_id: &str,
    quantity: i64,
) -> CartResponse {
    debug!(product_id, quantity, "update_cart_item command");
    let policy = config.delivery_policy();

    if quantity <= 0 {
        return remove_from_cart(cart, config, product_id);
    }

    cart.with_cart_mut(|c| {
        c.set_quantity(product_id, quantity);
        CartResponse::build(c, &policy)
    })
}

/// Removes a line from the cart. Ids not in the cart are ignored.
pub fn remove_from_cart(cart: &CartState, config: &ConfigState, product_id: &str) -> CartResponse {
    debug!(product_id, "remove_from_cart command");
    let policy = config.delivery_policy();
    cart.with_cart_mut(|c| {
        c.remove(product_id);
        CartResponse::build(c, &policy)
    })
}

/// Clears the cart (Clear Cart button).
pub fn clear_cart(cart: &CartState, config: &ConfigState) -> CartResponse {
    debug!("clear_cart command");
    let policy = config.delivery_policy();
    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::build(c, &policy)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::error::ErrorCode;
    use shopgrid_core::Money;

    fn fixtures() -> (CartState, ConfigState) {
        (CartState::new(), ConfigState::new(StorefrontConfig::default()))
    }

    #[test]
    fn test_add_merges_lines() {
        let (cart, config) = fixtures();

        add_to_cart(&cart, &config, "5", None).unwrap();
        let response = add_to_cart(&cart, &config, "5", Some(2)).unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].quantity, 3);
        assert_eq!(response.totals.item_count, 3);
        assert_eq!(response.totals.subtotal, Money::from_minor(8997));
        assert_eq!(response.totals.delivery_fee, Money::zero());
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let (cart, config) = fixtures();

        let err = add_to_cart(&cart, &config, "99", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = add_to_cart(&cart, &config, "1", Some(0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_to_cart(&cart, &config, "1", Some(100)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(get_cart(&cart, &config).is_empty());
    }

    #[test]
    fn test_update_and_remove() {
        let (cart, config) = fixtures();
        add_to_cart(&cart, &config, "1", None).unwrap();
        add_to_cart(&cart, &config, "4", None).unwrap();

        let response = update_cart_item(&cart, &config, "4", 3);
        assert_eq!(response.totals.item_count, 4);

        let response = update_cart_item(&cart, &config, "4", 0);
        assert_eq!(response.items.len(), 1);

        let response = update_cart_item(&cart, &config, "8", 2);
        assert_eq!(response.items.len(), 1);

        let response = remove_from_cart(&cart, &config, "1");
        assert!(response.is_empty());
        assert_eq!(response.totals.total, Money::zero());
    }

    #[test]
    fn test_update_goes_past_add_limit() {
        let (cart, config) = fixtures();
        add_to_cart(&cart, &config, "5", Some(99)).unwrap();
        let response = add_to_cart(&cart, &config, "5", Some(99)).unwrap();
        assert_eq!(response.items[0].quantity, 198);

        let response = update_cart_item(&cart, &config, "5", 199);
        assert_eq!(response.items[0].quantity, 199);
        assert_eq!(response.totals.item_count, 199);

        let response = update_cart_item(&cart, &config, "5", 150);
        assert_eq!(response.items[0].quantity, 150);
        assert_eq!(response.totals.subtotal, Money::from_minor(2999 * 150));
    }

    #[test]
    fn test_small_cart_pays_delivery() {
        let cart = CartState::new();
        let mut custom = StorefrontConfig::default();
        custom.pricing.free_delivery_threshold = 1_000_000;
        let config = ConfigState::new(custom);

        let response = add_to_cart(&cart, &config, "5", None).unwrap();
        assert_eq!(response.totals.delivery_fee, Money::from_minor(40));
        assert_eq!(response.totals.total, Money::from_minor(3039));
    }

    #[test]
    fn test_clear_cart() {
        let (cart, config) = fixtures();
        add_to_cart(&cart, &config, "2", Some(2)).unwrap();

        let response = clear_cart(&cart, &config);
        assert!(response.is_empty());
        assert_eq!(cart.item_count(), 0);
    }
}
