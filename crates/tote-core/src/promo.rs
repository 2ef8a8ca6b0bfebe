//! # Promo Registry
//!
//! Immutable mapping from promo code to discount rate.
//!
//! Codes are matched exactly (case-sensitive) after the caller trims
//! surrounding whitespace.

use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::types::{AppliedPromo, DiscountRate};
use crate::validation::{validate_discount_rate, validate_promo_code};

/// Read-only promo code table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoRegistry {
    rates: BTreeMap<String, DiscountRate>,
}

impl PromoRegistry {
    /// Builds a registry from `(code, rate)` pairs.
    ///
    /// Codes are stored trimmed. Duplicates, blank codes and rates above
    /// 100% are rejected.
    pub fn new<S>(entries: impl IntoIterator<Item = (S, DiscountRate)>) -> CoreResult<Self>
    where
        S: Into<String>,
    {
        let mut rates = BTreeMap::new();

        for (code, rate) in entries {
            let code: String = code.into();
            validate_promo_code(&code)?;
            validate_discount_rate(rate)?;

            let code = code.trim().to_string();
            if rates.contains_key(&code) {
                return Err(CoreError::DuplicatePromoCode(code));
            }
            rates.insert(code, rate);
        }

        Ok(PromoRegistry { rates })
    }

    /// Returns the rate for a code, `None` if the code is unknown.
    pub fn rate(&self, code: &str) -> Option<DiscountRate> {
        self.rates.get(code).copied()
    }

    /// Resolves a code into the promo a cart would hold.
    pub fn resolve(&self, code: &str) -> Option<AppliedPromo> {
        self.rate(code).map(|rate| AppliedPromo {
            code: code.to_string(),
            rate,
        })
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    /// All codes with their rates, sorted by code.
    pub fn iter(&self) -> impl Iterator<Item = (&str, DiscountRate)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// `ostad10` (10%) and `ostad5` (5%).
impl Default for PromoRegistry {
    fn default() -> Self {
        let rates = [
            ("ostad10".to_string(), DiscountRate::from_bps(1000)),
            ("ostad5".to_string(), DiscountRate::from_bps(500)),
        ]
        .into_iter()
        .collect();

        PromoRegistry { rates }
    }
}
