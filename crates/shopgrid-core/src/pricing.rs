//! # Pricing Rules
//!
//! Delivery fee and discount calculations shared by the cart view, the
//! checkout review step and order creation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Subtotal ₹450 ──► quote() ──► fee ₹40 ──► total ₹490                   │
//! │  Subtotal ₹501 ──► quote() ──► fee ₹0  ──► total ₹501                   │
//! │                                                                         │
//! │  The threshold is exclusive: exactly ₹500 still pays the fee.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Subtotal above which delivery is free.
pub const FREE_DELIVERY_THRESHOLD: Money = Money::from_minor(500);

/// Flat fee charged at or below the threshold.
pub const STANDARD_DELIVERY_FEE: Money = Money::from_minor(40);

/// Delivery fee rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPolicy {
    pub free_threshold: Money,
    pub fee: Money,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        DeliveryPolicy {
            free_threshold: FREE_DELIVERY_THRESHOLD,
            fee: STANDARD_DELIVERY_FEE,
        }
    }
}

impl DeliveryPolicy {
    pub const fn new(free_threshold: Money, fee: Money) -> Self {
        DeliveryPolicy { free_threshold, fee }
    }

    /// Fee for a given subtotal.
    pub fn fee_for(&self, subtotal: Money) -> Money {
        if subtotal > self.free_threshold {
            Money::zero()
        } else {
            self.fee
        }
    }

    /// Full price breakdown for a subtotal.
    ///
    /// ## Example
    /// ```rust
    /// use shopgrid_core::money::Money;
    /// use shopgrid_core::pricing::DeliveryPolicy;
    ///
    /// let quote = DeliveryPolicy::default().quote(Money::from_minor(300));
    /// assert_eq!(quote.fee.minor_units(), 40);
    /// assert_eq!(quote.total.minor_units(), 340);
    /// ```
    pub fn quote(&self, subtotal: Money) -> DeliveryQuote {
        let fee = self.fee_for(subtotal);
        DeliveryQuote {
            subtotal,
            fee,
            total: subtotal + fee,
        }
    }
}

/// Subtotal, delivery fee and grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryQuote {
    pub subtotal: Money,
    pub fee: Money,
    pub total: Money,
}

impl DeliveryQuote {
    pub fn is_free_delivery(&self) -> bool {
        self.fee.is_zero()
    }
}

/// Percentage saved going from `original` to `current`, rounded to the
/// nearest whole percent with halves rounding up.
///
/// Returns 0 when `original` is not positive.
///
/// ## Example
/// ```rust
/// use shopgrid_core::money::Money;
/// use shopgrid_core::pricing::calculate_discount;
///
/// assert_eq!(calculate_discount(Money::from_minor(1000), Money::from_minor(750)), 25);
/// ```
pub fn calculate_discount(original: Money, current: Money) -> i64 {
    let original = original.minor_units() as i128;
    if original <= 0 {
        return 0;
    }

    // round(x / o) == floor((2x + o) / 2o) for o > 0
    let saved = (original - current.minor_units() as i128) * 100;
    (2 * saved + original).div_euclid(2 * original) as i64
}
