//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Order      │   │ TrackingUpdate  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (UUID)      │   │  id (1, 2, ..)  │       │
//! │  │  name           │   │  order_number   │   │  status label   │       │
//! │  │  price          │   │  status         │   │  description    │       │
//! │  │  category       │   │  items snapshot │   │  timestamp      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  OrderStatus    │   │ PaymentMethod   │   │ PaymentStatus   │       │
//! │  │  Pending ──►    │   │  Cod            │   │  Pending        │       │
//! │  │  Confirmed ──►  │   │  Upi            │   │  Paid           │       │
//! │  │  ...  Delivered │   │  Card           │   │  Failed         │       │
//! │  │  (Cancelled)    │   │  Netbanking     │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Orders carry both:
//! - `id`: UUID v4, opaque, used by the timers that advance the order
//! - `order_number`: short human-readable key the customer types in to track

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cart::CartItem;
use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product listed in the catalog.
///
/// Catalog data is created once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Money,
    /// Pre-discount price, shown struck through.
    pub original_price: Option<Money>,
    pub description: String,
    /// Image URL.
    pub image: String,
    pub category: String,
    /// Average rating out of 5.
    pub rating: f64,
    /// Number of reviews; drives the default "popular" ordering.
    pub reviews: u32,
    pub in_stock: bool,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Product {
    /// Whole-percent discount against the original price, if there is one.
    pub fn discount_percent(&self) -> Option<i64> {
        self.original_price
            .map(|original| crate::pricing::calculate_discount(original, self.price))
    }
}

// =============================================================================
// User & Address
// =============================================================================

/// A postal address. Plain value, no lifecycle of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "pincode")]
    pub postal_code: String,
    pub country: String,
}

impl Address {
    /// Renders the address on one line, skipping blank parts.
    pub fn one_line(&self) -> String {
        [
            self.street.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.postal_code.as_str(),
            self.country.as_str(),
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// The signed-in customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<Address>,
}

// =============================================================================
// Order Status
// =============================================================================

/// Fulfillment status of an order.
///
/// ## Lifecycle
/// ```text
/// Pending ──► Confirmed ──► Processing ──► Shipped ──► OutForDelivery ──► Delivered
///    │            │              │             │              │
///    └────────────┴──────────────┴─────────────┴──────────────┴──► Cancelled
/// ```
/// Forward moves may skip steps; nothing moves backwards and the two
/// terminal states accept no further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Position along the linear fulfillment sequence. `Cancelled` sits
    /// outside it and is handled separately by [`Self::can_transition_to`].
    pub const fn rank(&self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Confirmed => 1,
            OrderStatus::Processing => 2,
            OrderStatus::Shipped => 3,
            OrderStatus::OutForDelivery => 4,
            OrderStatus::Delivered => 5,
            OrderStatus::Cancelled => u8::MAX,
        }
    }

    /// `Delivered` and `Cancelled` end the lifecycle.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether an order in `self` may move to `next`.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            OrderStatus::Cancelled => true,
            _ => next.rank() > self.rank(),
        }
    }

    /// Wire name, as used in serde and on the command line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Label written into tracking updates.
    pub const fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::OutForDelivery => "Out for delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Customer-facing description for the tracking timeline.
    pub const fn description(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Your order is pending confirmation.",
            OrderStatus::Confirmed => "Order confirmed and payment verified.",
            OrderStatus::Processing => "Your order is being prepared for shipment.",
            OrderStatus::Shipped => "Your order has been shipped and is on its way.",
            OrderStatus::OutForDelivery => "Your order is out for delivery.",
            OrderStatus::Delivered => "Your order has been successfully delivered.",
            OrderStatus::Cancelled => "Your order has been cancelled.",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: OrderStatus::ALL.iter().map(|s| s.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Payment
// =============================================================================

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on delivery: nothing is collected up front.
    #[default]
    Cod,
    Upi,
    Card,
    Netbanking,
}

impl PaymentMethod {
    /// Methods offered on the checkout payment step.
    pub const CHECKOUT_OPTIONS: [PaymentMethod; 3] =
        [PaymentMethod::Cod, PaymentMethod::Upi, PaymentMethod::Card];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "cod",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Card => "card",
            PaymentMethod::Netbanking => "netbanking",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "Cash on Delivery",
            PaymentMethod::Upi => "UPI Payment",
            PaymentMethod::Card => "Credit/Debit Card",
            PaymentMethod::Netbanking => "Net Banking",
        }
    }

    /// Payment status an order starts with: COD is collected later,
    /// everything else is treated as already paid.
    pub const fn initial_payment_status(&self) -> PaymentStatus {
        match self {
            PaymentMethod::Cod => PaymentStatus::Pending,
            _ => PaymentStatus::Paid,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cod" | "cash" => Ok(PaymentMethod::Cod),
            "upi" => Ok(PaymentMethod::Upi),
            "card" => Ok(PaymentMethod::Card),
            "netbanking" => Ok(PaymentMethod::Netbanking),
            _ => Err(ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: vec![
                    "cod".to_string(),
                    "upi".to_string(),
                    "card".to_string(),
                    "netbanking".to_string(),
                ],
            }),
        }
    }
}

/// Whether money has been collected for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Tracking
// =============================================================================

/// One entry in an order's tracking timeline. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingUpdate {
    /// 1-based position within the order's timeline.
    pub id: u32,
    pub status: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub location: Option<String>,
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
///
/// `items` is a snapshot of the cart at checkout time. Only `status` and
/// `tracking_updates` change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub tracking_number: String,
    pub items: Vec<CartItem>,
    pub total: Money,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub estimated_delivery: DateTime<Utc>,
    pub shipping_address: Address,
    pub tracking_updates: Vec<TrackingUpdate>,
}

impl Order {
    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Most recent tracking entry. Orders are seeded with one, so this is
    /// only `None` for a hand-built order.
    pub fn latest_update(&self) -> Option<&TrackingUpdate> {
        self.tracking_updates.last()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions_are_forward_only() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Confirmed));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::OutForDelivery));

        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::Confirmed));
        assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Confirmed));
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn test_cancel_from_any_non_terminal_state() {
        for status in OrderStatus::ALL {
            let expected = !status.is_terminal();
            assert_eq!(status.can_transition_to(OrderStatus::Cancelled), expected, "{status}");
        }
    }

    #[test]
    fn test_terminal_states_accept_nothing() {
        for next in OrderStatus::ALL {
            assert!(!OrderStatus::Delivered.can_transition_to(next));
            assert!(!OrderStatus::Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_every_status_has_label_and_description() {
        for status in OrderStatus::ALL {
            assert!(!status.label().is_empty());
            assert!(!status.description().is_empty());
        }
        assert_eq!(OrderStatus::OutForDelivery.label(), "Out for delivery");
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert_eq!(
            "Out for delivery".parse::<OrderStatus>().unwrap(),
            OrderStatus::OutForDelivery
        );
        assert!("lost".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_status_serde_names() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out-for-delivery\"");
    }

    #[test]
    fn test_initial_payment_status() {
        assert_eq!(PaymentMethod::Cod.initial_payment_status(), PaymentStatus::Pending);
        assert_eq!(PaymentMethod::Upi.initial_payment_status(), PaymentStatus::Paid);
        assert_eq!(PaymentMethod::Card.initial_payment_status(), PaymentStatus::Paid);
        assert_eq!(PaymentMethod::Netbanking.initial_payment_status(), PaymentStatus::Paid);
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("UPI".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cod);
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_address_one_line_skips_blanks() {
        let address = Address {
            street: "12 MG Road".to_string(),
            city: "Pune".to_string(),
            state: String::new(),
            postal_code: "411001".to_string(),
            country: "India".to_string(),
        };
        assert_eq!(address.one_line(), "12 MG Road, Pune, 411001, India");
    }
}
