//! # Views
//!
//! Plain-text rendering of command results for the shell.
//!
//! Every function takes the command's response by reference and returns the
//! text to print, so rendering never touches state. Prices go through
//! [`StorefrontConfig::format_price`].
//!
//! ```text
//! commands::*  ──► Response DTO ──┬──► views::render_*  ──► stdout (text)
//!                                 └──► serde_json        ──► stdout (--json)
//! ```

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use shopgrid_core::{Order, OrderStatus, User};

use crate::commands::cart::CartResponse;
use crate::commands::catalog::{CatalogResponse, ProductView};
use crate::commands::checkout::{CheckoutView, PlacedOrder};
use crate::config::StorefrontConfig;
use crate::error::ApiError;
use crate::state::CheckoutStep;

/// Heading of the order-success view.
pub const ORDER_PLACED_HEADING: &str = "Order Placed Successfully!";

/// Printed while the checkout processing delay runs.
pub const PROCESSING_MESSAGE: &str = "Processing...";

/// Shown when the orders list is empty.
pub const NO_ORDERS_MESSAGE: &str = "No orders found";

const RULE: &str = "────────────────────────────────────────────────────────────";

pub const HELP: &str = "\
Browse
  products                       list products with the current filters
  search <text>                  filter by name or category (empty clears)
  category <name|all>            filter by category
  categories                     list categories
  sort <popular|price-low|price-high|rating|newest>
  product <id>                   product details

Cart
  cart                           show the cart
  add <id> [qty]                 add to cart (qty 1-99)
  update <id> <qty>              set quantity (0 removes)
  remove <id>                    remove from cart
  clear                          empty the cart

Account
  login <email> <password>
  signup <email> <password> <name...>
  logout
  whoami

Checkout
  checkout                       start checkout
  set <field> <value...>         name, phone, street, city, state, pincode, country
  pay <cod|upi|card>             choose payment method
  next | back                    move between steps
  place                          place the order (review step)
  abort                          leave checkout

Orders
  track [order-number]           tracking timeline (default: last order)
  orders                         all orders
  status <order-number> <status> change status by hand
  cancel <order-number>          cancel an order

  config                         show effective configuration
  help | quit";

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%d %b %Y, %H:%M:%S").to_string()
}

fn date(at: &DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y").to_string()
}

fn plural(count: impl Into<u64>, one: &str, many: &str) -> String {
    let count = count.into();
    if count == 1 {
        format!("{} {}", count, one)
    } else {
        format!("{} {}", count, many)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The product grid with its result count.
pub fn render_products(config: &StorefrontConfig, response: &CatalogResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} · {} · sort: {}",
        plural(response.products.len() as u64, "product", "products"),
        response.query.category,
        response.query.sort
    );
    if !response.query.search.is_empty() {
        let _ = writeln!(out, "Search: \"{}\"", response.query.search);
    }
    let _ = writeln!(out, "{}", RULE);

    if response.products.is_empty() {
        out.push_str("No products match your search.");
        return out;
    }

    for view in &response.products {
        let p = &view.product;
        let _ = write!(out, "[{}] {}  {}", p.id, p.name, config.format_price(p.price));
        if let (Some(original), Some(percent)) = (p.original_price, view.discount_percent) {
            let _ = write!(out, "  MRP {}  {}% off", config.format_price(original), percent);
        }
        let _ = writeln!(out, "\n    {} · ★ {:.1} ({} reviews)", p.category, p.rating, p.reviews);
    }

    out.trim_end().to_string()
}

/// Product detail page.
pub fn render_product(config: &StorefrontConfig, view: &ProductView) -> String {
    let p = &view.product;
    let mut out = String::new();

    let _ = writeln!(out, "{}", p.name);
    let _ = writeln!(out, "★ {:.1} ({} reviews) · {}", p.rating, p.reviews, p.category);
    let _ = write!(out, "{}", config.format_price(p.price));
    if let (Some(original), Some(percent)) = (p.original_price, view.discount_percent) {
        let _ = write!(out, "  MRP {}  {}% off", config.format_price(original), percent);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", if p.in_stock { "In stock" } else { "Out of stock" });
    let _ = writeln!(out, "\n{}", p.description);

    if !p.features.is_empty() {
        let _ = writeln!(out, "\nKey Features");
        for feature in &p.features {
            let _ = writeln!(out, "  • {}", feature);
        }
    }
    let _ = write!(out, "\nadd {} [qty] to add to cart", p.id);
    out
}

pub fn render_categories(categories: &[&str]) -> String {
    categories.join("\n")
}

// =============================================================================
// Cart
// =============================================================================

fn write_totals(out: &mut String, config: &StorefrontConfig, cart: &CartResponse) {
    let totals = &cart.totals;
    let delivery = if totals.delivery_fee.is_zero() {
        "FREE".to_string()
    } else {
        config.format_price(totals.delivery_fee)
    };

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "{:<44}{:>16}", "Subtotal", config.format_price(totals.subtotal));
    let _ = writeln!(out, "{:<44}{:>16}", "Delivery", delivery);
    let _ = writeln!(out, "{:<44}{:>16}", "Total", config.format_price(totals.total));
}

fn write_lines(out: &mut String, config: &StorefrontConfig, cart: &CartResponse) {
    for item in &cart.items {
        let _ = writeln!(
            out,
            "[{}] {:<36} x{:<3}{:>16}",
            item.product.id,
            item.product.name,
            item.quantity,
            config.format_price(item.line_total())
        );
    }
}

pub fn render_cart(config: &StorefrontConfig, cart: &CartResponse) -> String {
    if cart.is_empty() {
        return "Your cart is empty".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Shopping Cart ({})",
        plural(cart.totals.item_count, "item", "items")
    );
    let _ = writeln!(out, "{}", RULE);
    write_lines(&mut out, config, cart);
    write_totals(&mut out, config, cart);

    if !cart.totals.delivery_fee.is_zero() {
        let threshold = config.delivery_policy().free_threshold;
        let _ = writeln!(
            out,
            "Add items over {} for free delivery",
            config.format_price(threshold)
        );
    }
    out.trim_end().to_string()
}

// =============================================================================
// Checkout
// =============================================================================

pub fn render_checkout(config: &StorefrontConfig, view: &CheckoutView) -> String {
    let draft = &view.draft;
    let mut out = String::new();
    let _ = writeln!(out, "Checkout · Step {} of 3: {}", draft.step.number(), draft.step);
    let _ = writeln!(out, "{}", RULE);

    match draft.step {
        CheckoutStep::Address => {
            let fields = [
                ("name", draft.full_name.as_str()),
                ("phone", draft.phone.as_str()),
                ("street", draft.address.street.as_str()),
                ("city", draft.address.city.as_str()),
                ("state", draft.address.state.as_str()),
                ("pincode", draft.address.postal_code.as_str()),
                ("country", draft.address.country.as_str()),
            ];
            for (field, value) in fields {
                let shown = if value.is_empty() { "-" } else { value };
                let _ = writeln!(out, "  {:<10}{}", field, shown);
            }
            out.push_str("set <field> <value>, then next");
        }
        CheckoutStep::Payment => {
            for method in shopgrid_core::PaymentMethod::CHECKOUT_OPTIONS {
                let marker = if method == draft.payment_method { "(•)" } else { "( )" };
                let _ = writeln!(out, "  {} {:<5} {}", marker, method.as_str(), method.label());
            }
            out.push_str("pay <method>, then next (or back)");
        }
        CheckoutStep::Review => {
            let _ = writeln!(out, "Deliver to: {}, {}", draft.full_name, draft.phone);
            let _ = writeln!(out, "            {}", draft.address.one_line());
            let _ = writeln!(out, "Payment:    {}", draft.payment_method.label());
            let _ = writeln!(out, "{}", RULE);
            write_lines(&mut out, config, &view.cart);
            write_totals(&mut out, config, &view.cart);
            out.push_str("place to order (or back)");
        }
    }
    out
}

/// The order-success view.
pub fn render_placed(config: &StorefrontConfig, placed: &PlacedOrder) -> String {
    let order = &placed.order;
    let mut out = String::new();
    let _ = writeln!(out, "{}", ORDER_PLACED_HEADING);
    let _ = writeln!(out, "Order Number:    {}", order.order_number);
    let _ = writeln!(out, "Tracking Number: {}", order.tracking_number);
    let _ = writeln!(out, "Total:           {}", config.format_price(order.total));
    let _ = writeln!(
        out,
        "Payment:         {} ({})",
        order.payment_method.label(),
        placed.receipt.status
    );
    let _ = writeln!(out, "Estimated Delivery: {}", date(&order.estimated_delivery));
    let _ = write!(out, "track {} to follow your order", order.order_number);
    out
}

// =============================================================================
// Orders
// =============================================================================

/// Progress bar over the forward statuses.
fn progress(status: OrderStatus) -> String {
    if status == OrderStatus::Cancelled {
        return "Cancelled".to_string();
    }
    OrderStatus::ALL
        .iter()
        .filter(|s| **s != OrderStatus::Cancelled)
        .map(|s| {
            if s.rank() <= status.rank() {
                format!("[{}]", s.label())
            } else {
                s.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Tracking page: header, progress and the timeline newest first.
pub fn render_tracking(config: &StorefrontConfig, order: &Order) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Order {}  ({})", order.order_number, order.status.label());
    let _ = writeln!(out, "Tracking Number: {}", order.tracking_number);
    let _ = writeln!(out, "Placed: {}", timestamp(&order.created_at));
    if !order.status.is_terminal() {
        let _ = writeln!(out, "Estimated Delivery: {}", date(&order.estimated_delivery));
    }
    let _ = writeln!(out, "{}", progress(order.status));
    let _ = writeln!(out, "{}", RULE);

    for update in order.tracking_updates.iter().rev() {
        let _ = writeln!(out, "● {}  {}", update.status, timestamp(&update.timestamp));
        let _ = writeln!(out, "  {}", update.description);
        if let Some(location) = &update.location {
            let _ = writeln!(out, "  {}", location);
        }
    }

    let _ = writeln!(out, "{}", RULE);
    for item in &order.items {
        let _ = writeln!(
            out,
            "{} x{}  {}",
            item.product.name,
            item.quantity,
            config.format_price(item.line_total())
        );
    }
    let _ = writeln!(out, "Total: {}", config.format_price(order.total));
    let _ = write!(out, "Ship to: {}", order.shipping_address.one_line());
    out
}

pub fn render_orders(config: &StorefrontConfig, orders: &[Order]) -> String {
    if orders.is_empty() {
        return NO_ORDERS_MESSAGE.to_string();
    }

    orders
        .iter()
        .map(|order| {
            format!(
                "{}  {:<16} {:>10}  {}  {}",
                order.order_number,
                order.status.label(),
                config.format_price(order.total),
                plural(order.item_count(), "item", "items"),
                timestamp(&order.created_at)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Account & Errors
// =============================================================================

pub fn render_user(user: Option<&User>) -> String {
    match user {
        Some(user) => {
            let first_name = user.name.split_whitespace().next().unwrap_or(&user.name);
            format!("Hi, {} ({})", first_name, user.email)
        }
        None => "Not signed in. login <email> <password>".to_string(),
    }
}

/// The blocking alert.
pub fn render_error(err: &ApiError) -> String {
    format!("! {}", err.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{cart, catalog};
    use crate::state::{CartState, ConfigState};
    use shopgrid_core::catalog::CatalogQuery;

    fn config() -> StorefrontConfig {
        StorefrontConfig::default()
    }

    #[test]
    fn test_product_grid() {
        let response = catalog::list_products(&CatalogQuery::default()).unwrap();
        let text = render_products(&config(), &response);

        assert!(text.starts_with("8 products · All Categories · sort: popular"));
        assert!(text.contains("[1] Samsung Galaxy S24 Ultra  ₹124999  MRP ₹134999  7% off"));
    }

    #[test]
    fn test_product_detail_lists_features() {
        let view = catalog::get_product("5").unwrap();
        let text = render_product(&config(), &view);
        assert!(text.contains("25% off"));
        assert!(text.contains("In stock"));
    }

    #[test]
    fn test_cart_view() {
        let state = CartState::new();
        let config_state = ConfigState::new(config());
        assert_eq!(
            render_cart(&config(), &cart::get_cart(&state, &config_state)),
            "Your cart is empty"
        );

        let response = cart::add_to_cart(&state, &config_state, "5", Some(2)).unwrap();
        let text = render_cart(&config(), &response);
        assert!(text.starts_with("Shopping Cart (2 items)"));
        assert!(text.contains("FREE"));
        assert!(text.contains("₹5998"));
    }

    #[test]
    fn test_progress_marks_reached_steps() {
        let bar = progress(OrderStatus::Processing);
        assert!(bar.starts_with("[Pending] → [Confirmed] → [Processing] → Shipped"));
        assert_eq!(progress(OrderStatus::Cancelled), "Cancelled");
    }

    #[test]
    fn test_empty_orders() {
        assert_eq!(render_orders(&config(), &[]), NO_ORDERS_MESSAGE);
    }

    #[test]
    fn test_user_greeting() {
        let user = User {
            id: "1".to_string(),
            name: "Subhojeet Ganguli".to_string(),
            email: "s@example.com".to_string(),
            phone: None,
            address: None,
        };
        assert_eq!(render_user(Some(&user)), "Hi, Subhojeet (s@example.com)");
        assert!(render_user(None).starts_with("Not signed in"));
    }
}
