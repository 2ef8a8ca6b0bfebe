//! # Validation Module
//!
//! Input rules for catalog entries, promo codes and cart quantities.
//!
//! ## Two Kinds of Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Build time (Catalog::new, PromoRegistry::new)                          │
//! │  ├── validate_product_name / validate_price                            │
//! │  ├── validate_promo_code / validate_discount_rate                      │
//! │  └── FAIL with ValidationError: bad data never reaches a cart          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Run time (CartEngine operations)                                       │
//! │  ├── clamp_quantity: 0, -3 → 1                                         │
//! │  ├── normalize_promo_code: "  ostad10 " → "ostad10"                    │
//! │  └── NEVER fail: user input is corrected or reported as an outcome      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::DiscountRate;
use crate::MIN_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted promo code.
pub const MAX_PROMO_CODE_LEN: usize = 32;

/// Longest accepted product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a product name.
///
/// ```rust
/// use tote_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Smart Watch").is_ok());
/// assert!(validate_product_name("  ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a catalog price. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Promo Validators
// =============================================================================

/// Trims surrounding whitespace from user-entered promo input.
///
/// Returns `None` when nothing is left.
///
/// ```rust
/// use tote_core::validation::normalize_promo_code;
///
/// assert_eq!(normalize_promo_code("  ostad10\n"), Some("ostad10"));
/// assert_eq!(normalize_promo_code(" \t "), None);
/// ```
pub fn normalize_promo_code(input: &str) -> Option<&str> {
    let code = input.trim();
    (!code.is_empty()).then_some(code)
}

/// Validates a promo code for registration.
///
/// ## Rules
/// - Must not be empty after trimming
/// - No whitespace inside the code (it could never be typed back in)
/// - At most 32 characters
pub fn validate_promo_code(code: &str) -> ValidationResult<()> {
    let Some(code) = normalize_promo_code(code) else {
        return Err(ValidationError::Required {
            field: "promo code".to_string(),
        });
    };

    if code.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "promo code".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    if code.chars().count() > MAX_PROMO_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "promo code".to_string(),
            max: MAX_PROMO_CODE_LEN,
        });
    }

    Ok(())
}

/// Validates a discount rate: 0 to 10000 basis points (0% to 100%).
pub fn validate_discount_rate(rate: DiscountRate) -> ValidationResult<()> {
    if rate.bps() > DiscountRate::MAX_BPS {
        return Err(ValidationError::OutOfRange {
            field: "discount rate".to_string(),
            min: 0,
            max: DiscountRate::MAX_BPS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Quantity
// =============================================================================

/// Raises any quantity below 1 to 1. There is no upper bound.
///
/// ```rust
/// use tote_core::validation::clamp_quantity;
///
/// assert_eq!(clamp_quantity(-4), 1);
/// assert_eq!(clamp_quantity(0), 1);
/// assert_eq!(clamp_quantity(7), 7);
/// ```
#[inline]
pub fn clamp_quantity(quantity: i64) -> i64 {
    quantity.max(MIN_LINE_QUANTITY)
}

// =============================================================================
// Unit Tests
// =============================================================================
