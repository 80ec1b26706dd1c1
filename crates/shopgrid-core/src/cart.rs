//! # Cart
//!
//! The shopping cart and its state transitions.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  User Action              Operation                Cart Change          │
//! │  ───────────              ─────────                ───────────          │
//! │                                                                         │
//! │  "Add to cart" ─────────► add(product) ──────────► qty += 1 or push    │
//! │                                                                         │
//! │  +/- on a line ─────────► set_quantity(id, n) ───► qty = n (≤0 drops)  │
//! │                                                                         │
//! │  Trash icon ────────────► remove(id) ────────────► line dropped        │
//! │                                                                         │
//! │  Order placed ──────────► clear() ───────────────► items.clear()       │
//! │                                                                         │
//! │  Any render ────────────► item_count(), subtotal() (recomputed)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::pricing::{DeliveryPolicy, DeliveryQuote};
use crate::types::Product;

/// A line in the cart: a product and how many of it.
///
/// The product is held by value, so an order built from these lines keeps
/// its own snapshot of name and price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: Product,
    /// Always ≥ 1 while the line is in a cart.
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product: Product, quantity: u32) -> Self {
        CartItem { product, quantity }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price * self.quantity
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product id (adding the same product bumps quantity)
/// - Every quantity is ≥ 1 (dropping to zero removes the line)
/// - Subtotal is never negative, since catalog prices are not
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds one unit of a product.
    ///
    /// - Already in cart: quantity + 1
    /// - Not in cart: new line with quantity 1
    pub fn add(&mut self, product: &Product) {
        self.add_many(product, 1);
    }

    /// Adds `quantity` units of a product at once (the product page's
    /// quantity selector). A zero quantity changes nothing.
    pub fn add_many(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        match self.items.iter_mut().find(|i| i.product.id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(CartItem::new(product.clone(), quantity)),
        }
    }

    /// Sets the quantity of a line.
    ///
    /// - `quantity <= 0`: same as [`Cart::remove`]
    /// - Product not in cart: no-op
    ///
    /// Returns whether the cart changed.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.items.iter_mut().find(|i| i.product.id == product_id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Removes a line by product id. Absent ids are ignored.
    ///
    /// Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        self.items.len() != initial_len
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Quantity of one product, 0 if absent.
    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.items
            .iter()
            .find(|i| i.product.id == product_id)
            .map_or(0, |i| i.quantity)
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines (the badge on the cart icon).
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Σ price × quantity.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Subtotal plus delivery fee under `policy`.
    pub fn quote(&self, policy: &DeliveryPolicy) -> DeliveryQuote {
        policy.quote(self.subtotal())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copy of the current lines, for handing to order creation.
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.items.clone()
    }
}

/// Cart totals summary for rendering and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: u32,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

impl CartTotals {
    pub fn compute(cart: &Cart, policy: &DeliveryPolicy) -> Self {
        let quote = cart.quote(policy);
        CartTotals {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            subtotal: quote.subtotal,
            delivery_fee: quote.fee,
            total: quote.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: Money::from_minor(price),
            original_price: None,
            description: String::new(),
            image: String::new(),
            category: "Electronics".to_string(),
            rating: 4.0,
            reviews: 10,
            in_stock: true,
            features: Vec::new(),
        }
    }

    #[test]
    fn test_add_same_product_twice() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        cart.add(&product);
        cart.add(&product);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of("1"), 2);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.subtotal().minor_units(), 1998);
    }

    #[test]
    fn test_add_many() {
        let mut cart = Cart::new();
        let product = test_product("1", 100);

        cart.add_many(&product, 3);
        cart.add_many(&product, 0);
        cart.add(&product);

        assert_eq!(cart.quantity_of("1"), 4);
    }

    #[test]
    fn test_subtotal_tracks_every_mutation() {
        let mut cart = Cart::new();
        let a = test_product("a", 250);
        let b = test_product("b", 1200);
        let c = test_product("c", 75);

        let expected = |cart: &Cart| -> i64 {
            cart.items()
                .iter()
                .map(|i| i.product.price.minor_units() * i.quantity as i64)
                .sum()
        };

        cart.add(&a);
        cart.add(&b);
        cart.add(&a);
        assert_eq!(cart.subtotal().minor_units(), expected(&cart));

        cart.set_quantity("b", 4);
        cart.add(&c);
        assert_eq!(cart.subtotal().minor_units(), expected(&cart));

        cart.remove("a");
        cart.set_quantity("c", -3);
        assert_eq!(cart.subtotal().minor_units(), expected(&cart));
        assert_eq!(cart.subtotal().minor_units(), 4800);
        assert!(!cart.subtotal().is_negative());
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let a = test_product("a", 250);
        let b = test_product("b", 100);

        let mut via_zero = Cart::new();
        via_zero.add(&a);
        via_zero.add(&b);
        let mut via_remove = via_zero.clone();

        assert!(via_zero.set_quantity("a", 0));
        assert!(via_remove.remove("a"));

        assert_eq!(via_zero, via_remove);
    }

    #[test]
    fn test_set_quantity_on_absent_product_is_noop() {
        let mut cart = Cart::new();
        cart.add(&test_product("a", 10));
        let before = cart.clone();

        assert!(!cart.set_quantity("missing", 5));
        assert!(!cart.remove("missing"));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&test_product("1", 999));
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert!(cart.subtotal().is_zero());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let product = test_product("1", 500);
        let mut cart = Cart::new();
        cart.add(&product);

        let snapshot = cart.snapshot();
        cart.set_quantity("1", 9);
        cart.clear();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].quantity, 1);
    }

    #[test]
    fn test_totals_include_delivery_fee() {
        let mut cart = Cart::new();
        cart.add(&test_product("1", 200));

        let totals = CartTotals::compute(&cart, &DeliveryPolicy::default());
        assert_eq!(totals.subtotal.minor_units(), 200);
        assert_eq!(totals.delivery_fee.minor_units(), 40);
        assert_eq!(totals.total.minor_units(), 240);

        cart.set_quantity("1", 3);
        let totals = CartTotals::compute(&cart, &DeliveryPolicy::default());
        assert!(totals.delivery_fee.is_zero());
        assert_eq!(totals.total.minor_units(), 600);
    }
}
