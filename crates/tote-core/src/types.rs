//! # Domain Types
//!
//! Core domain types shared by the catalog, the promo registry and the cart.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartLine     │   │   CartTotals    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  product_id     │──►│  subtotal       │       │
//! │  │  name, image    │   │  snapshot       │   │  discount       │       │
//! │  │  price          │   │  quantity ≥ 1   │   │  final_total    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DiscountRate   │   │  PromoOutcome   │   │ CheckoutOutcome │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Applied        │   │  Completed      │       │
//! │  │  1000 = 10%     │   │  EmptyInput     │   │  EmptyCart      │       │
//! │  └─────────────────┘   │  AlreadyApplied │   └─────────────────┘       │
//! │                        │  InvalidCode    │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

/// Catalog identifier of a product.
pub type ProductId = u32;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so the valid range 0..=10000 covers 0% to 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Basis points of a 100% discount.
    pub const MAX_BPS: u32 = 10_000;

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a fraction (`0.10` = 10%).
    ///
    /// Negative and NaN inputs become zero. Values above 1.0 are kept so
    /// that validation can reject them.
    pub fn from_fraction(fraction: f64) -> Self {
        DiscountRate((fraction * Self::MAX_BPS as f64).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn full() -> Self {
        DiscountRate(Self::MAX_BPS)
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A purchasable product. Never mutated once it is in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    /// Image reference (URL or asset path) for the presentation layer.
    pub image: String,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        Product {
            id,
            name: name.into(),
            description: description.into(),
            price,
            image: image.into(),
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One product-and-quantity entry in the cart.
///
/// ## Snapshot Pattern
/// Name, description, image and price are copied from the product when the
/// line is created. A later catalog change never reaches existing lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub image: String,
    /// Price at time of adding (frozen).
    pub unit_price: Money,
    /// Always at least 1.
    pub quantity: i64,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a line with quantity 1 from the product's current data.
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            unit_price: product.price,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Promo
// =============================================================================

/// The promo code currently applied to a cart, with the rate it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AppliedPromo {
    pub code: String,
    pub rate: DiscountRate,
}

/// Result of applying a promo code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", content = "promo", rename_all = "camelCase")]
#[ts(export)]
pub enum PromoOutcome {
    /// The code was valid and is now the active promo.
    Applied(AppliedPromo),
    /// Nothing left after trimming whitespace.
    EmptyInput,
    /// The code is already the active promo.
    AlreadyApplied,
    /// The code is not in the registry.
    InvalidCode,
}

impl PromoOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, PromoOutcome::Applied(_))
    }
}

impl fmt::Display for PromoOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromoOutcome::Applied(_) => f.write_str("Promo code applied successfully!"),
            PromoOutcome::EmptyInput => f.write_str("Please enter a promo code"),
            PromoOutcome::AlreadyApplied => f.write_str("Promo code already applied"),
            PromoOutcome::InvalidCode => f.write_str("Invalid promo code"),
        }
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Number of distinct lines.
    pub item_count: usize,
    /// Sum of all quantities (the cart badge count).
    pub total_quantity: i64,
    pub subtotal: Money,
    pub discount: Money,
    pub final_total: Money,
}

// =============================================================================
// Checkout
// =============================================================================

/// What was bought in a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutSummary {
    #[ts(as = "String")]
    pub order_id: Uuid,
    pub lines: Vec<CartLine>,
    pub promo_code: Option<String>,
    pub totals: CartTotals,
    #[ts(as = "String")]
    pub completed_at: DateTime<Utc>,
}

/// Result of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", content = "summary", rename_all = "camelCase")]
#[ts(export)]
pub enum CheckoutOutcome {
    Completed(CheckoutSummary),
    EmptyCart,
}

impl fmt::Display for CheckoutOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutOutcome::Completed(summary) => write!(
                f,
                "Checkout successful!\nSubtotal: {}\nDiscount: -{}\nFinal Total: {}",
                summary.totals.subtotal, summary.totals.discount, summary.totals.final_total
            ),
            CheckoutOutcome::EmptyCart => f.write_str("Your cart is empty!"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
