//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    Every amount is a whole number of the store's smallest unit.        │
//! │    The demo catalog is priced in whole rupees, so one unit = ₹1.       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopgrid_core::money::Money;
//!
//! let price = Money::from_minor(2999);
//!
//! let doubled = price * 2u32;
//! let total = price + Money::from_minor(40);
//!
//! assert_eq!(doubled.minor_units(), 5998);
//! assert_eq!(total.to_string(), "₹3039");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// Symbol used by the `Display` impl. UI code formats through
/// [`Money::format_with`] so the configured currency wins.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit the store prices in.
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction (original − current price) stays total
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde transparent**: serializes as a bare integer
///
/// ## Where Money Flows
/// ```text
/// Product.price ──► CartItem.line_total ──► Cart.subtotal
///                                              │
///                                              ▼
///                              DeliveryPolicy.quote ──► Order.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use shopgrid_core::money::Money;
    ///
    /// let price = Money::from_minor(124999);
    /// assert_eq!(price.minor_units(), 124999);
    /// ```
    #[inline]
    pub const fn from_minor(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a line quantity.
    ///
    /// ## Example
    /// ```rust
    /// use shopgrid_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(2999);
    /// assert_eq!(unit_price.multiply_quantity(3).minor_units(), 8997);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Formats the amount with an explicit symbol and number of decimals.
    ///
    /// `decimals` says how many of the stored digits are fractional: a store
    /// priced in paise would pass 2, the rupee-priced demo catalog passes 0.
    ///
    /// ## Example
    /// ```rust
    /// use shopgrid_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(124999).format_with("₹", 0), "₹124999");
    /// assert_eq!(Money::from_minor(1099).format_with("$", 2), "$10.99");
    /// assert_eq!(Money::from_minor(-550).format_with("$", 2), "-$5.50");
    /// ```
    pub fn format_with(&self, symbol: &str, decimals: u8) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.unsigned_abs();

        if decimals == 0 {
            return format!("{}{}{}", sign, symbol, abs);
        }

        let divisor = 10_u64.pow(decimals as u32);
        format!(
            "{}{}{}.{:0width$}",
            sign,
            symbol,
            abs / divisor,
            abs % divisor,
            width = decimals as usize
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders with the demo currency and no decimals.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(DEFAULT_CURRENCY_SYMBOL, 0))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
