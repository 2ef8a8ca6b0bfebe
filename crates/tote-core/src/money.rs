//! # Money Module
//!
//! Provides the `Money` type used for every price and total in the cart.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing float prices drifts:                                           │
//! │    199.99 + 149.99 + 79.99 = 429.97000000000003                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    19999 + 14999 + 7999 = 42997 cents, exactly $429.97                 │
//! │    Rounding happens in ONE place: the discount calculation             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tote_core::money::Money;
//! use tote_core::types::DiscountRate;
//!
//! let price = Money::from_major_minor(199, 99); // $199.99
//! let line = price.multiply_quantity(2);          // $399.98
//! assert_eq!(line.cents(), 39998);
//!
//! let discount = Money::from_cents(10000).calculate_discount(DiscountRate::from_bps(1000));
//! assert_eq!(discount.cents(), 1000); // 10% of $100.00
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Sub;
use ts_rs::TS;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartLine.unit_price (frozen) ──► CartLine.line_total
///                                                          │
///                                                          ▼
///                       CartTotals.subtotal ──► discount ──► final_total
/// ```
///
/// Signed so that intermediate differences stay representable. All
/// arithmetic saturates instead of overflowing, because quantities have no
/// upper bound.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// ```rust
    /// use tote_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(79, 99).cents(), 7999);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a cart quantity, saturating at the `i64`
    /// bounds.
    ///
    /// ```rust
    /// use tote_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(7999);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 23997);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Adds two amounts, saturating at the `i64` bounds.
    #[inline]
    pub const fn saturating_add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Calculates the discount amount for a rate, rounding half up to the
    /// nearest cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. `i128` keeps the
    /// intermediate product from overflowing.
    ///
    /// ```rust
    /// use tote_core::money::Money;
    /// use tote_core::types::DiscountRate;
    ///
    /// // $399.98 at 5% = $19.999 → $20.00
    /// let subtotal = Money::from_cents(39998);
    /// let discount = subtotal.calculate_discount(DiscountRate::from_bps(500));
    /// assert_eq!(discount.cents(), 2000);
    /// ```
    pub fn calculate_discount(&self, rate: DiscountRate) -> Money {
        let discount = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(discount as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `$12.34`. Localized display belongs to the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Saturating sum, so that a subtotal over huge quantities never panics.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
