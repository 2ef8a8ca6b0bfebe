//! # Error Types
//!
//! Domain-specific error types for tote-core.
//!
//! ## Where Errors Can Happen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  Building a Catalog / PromoRegistry      → CoreError (this file)       │
//! │  ├── duplicate product id / promo code                                 │
//! │  └── ValidationError (bad name, price, rate, code)                     │
//! │                                                                         │
//! │  Operating the CartEngine                → NEVER an error              │
//! │  ├── unknown product        → silent no-op                             │
//! │  ├── promo conditions       → PromoOutcome                             │
//! │  └── empty checkout         → CheckoutOutcome::EmptyCart               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while assembling the read-only catalog and promo data.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Two catalog entries share an id.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// Two registry entries share a code.
    #[error("Duplicate promo code: {0}")]
    DuplicatePromoCode(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for catalog and registry entries.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
