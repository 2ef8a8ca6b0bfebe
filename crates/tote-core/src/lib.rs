//! # tote-core: Pure Cart Logic for Tote
//!
//! This crate is the **heart** of Tote. It owns the catalog, the promo
//! registry and the cart engine, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tote Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation Adapter (tote-shell, web UI)          │   │
//! │  │    Product grid ──► Cart view ──► Promo input ──► Checkout      │   │
//! │  └───────────────┬───────────────────────────────▲─────────────────┘   │
//! │          calls   │                               │ refresh(&Cart)      │
//! │  ┌───────────────▼───────────────────────────────┴─────────────────┐   │
//! │  │               ★ tote-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   promo   │  │   cart    │  │   money   │  │   │
//! │  │   │  Catalog  │  │  Registry │  │CartEngine │  │   Money   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • TYPED OUTCOMES                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine, totals, outcomes)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Read-only product catalog
//! - [`promo`] - Read-only promo code registry
//! - [`cart`] - The cart engine and its refresh listener
//! - [`validation`] - Input rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tote_core::{CartEngine, CheckoutOutcome, PromoOutcome};
//!
//! let mut engine = CartEngine::default();
//! engine.add_item(1); // Wireless Headphones, $199.99
//! engine.add_item(1);
//!
//! assert_eq!(engine.totals().subtotal.cents(), 39998);
//! assert!(matches!(engine.apply_promo(" ostad10 "), PromoOutcome::Applied(_)));
//! assert_eq!(engine.totals().final_total.cents(), 35998);
//!
//! assert!(matches!(engine.checkout(), CheckoutOutcome::Completed(_)));
//! assert!(engine.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod promo;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartEngine, CartListener};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use promo::PromoRegistry;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Smallest quantity a cart line can hold. Lower requests are raised to it.
pub const MIN_LINE_QUANTITY: i64 = 1;
