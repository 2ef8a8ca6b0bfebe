//! # Cart Engine
//!
//! Owns the cart state and every business rule that touches it.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Engine Operations                               │
//! │                                                                         │
//! │  Presentation Action      Engine Call           State Change   Refresh │
//! │  ───────────────────      ───────────           ────────────   ─────── │
//! │                                                                         │
//! │  Click "Add to Cart" ───► add_item(id) ───────► qty += 1 / push   yes  │
//! │                                                                         │
//! │  Edit quantity ─────────► set_quantity(id, n) ► qty = max(1, n)   yes  │
//! │                                                                         │
//! │  Enter promo ───────────► apply_promo(code) ──► active promo    if set │
//! │                                                                         │
//! │  Click Clear ───────────► clear() ────────────► lines + promo     yes  │
//! │                                                                         │
//! │  Click Checkout ────────► checkout() ─────────► clear()       if !empty│
//! │                                                                         │
//! │  Render totals ─────────► totals() ───────────► (read only)       no   │
//! │                                                                         │
//! │  Unknown product ids are silent no-ops: nothing changes, no refresh.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is a plain owned value driven through `&mut self`; the
//! presentation layer holds it and is the only actor.

use std::fmt;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::money::Money;
use crate::promo::PromoRegistry;
use crate::types::{
    AppliedPromo, CartLine, CartTotals, CheckoutOutcome, CheckoutSummary, ProductId,
    PromoOutcome,
};
use crate::validation::{clamp_quantity, normalize_promo_code};

// =============================================================================
// Cart State
// =============================================================================

/// The mutable cart state: lines plus at most one active promo.
///
/// ## Invariants
/// - Lines are unique by `product_id`
/// - Every quantity is at least 1
/// - The active promo, if any, came from the engine's registry
///
/// Only [`CartEngine`] can mutate a `Cart`; everyone else gets `&Cart`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
    active_promo: Option<AppliedPromo>,
}

impl Cart {
    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn active_promo(&self) -> Option<&AppliedPromo> {
        self.active_promo.as_ref()
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all quantities (the cart badge count).
    pub fn total_quantity(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |sum, l| sum.saturating_add(l.quantity))
    }

    /// Σ unit price × quantity, using the prices frozen at add-time.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Computes the totals. Pure: no state change, no refresh.
    pub fn totals(&self) -> CartTotals {
        let subtotal = self.subtotal();
        let discount = self
            .active_promo
            .as_ref()
            .map(|promo| subtotal.calculate_discount(promo.rate))
            .unwrap_or_else(Money::zero);

        CartTotals {
            item_count: self.item_count(),
            total_quantity: self.total_quantity(),
            subtotal,
            discount,
            final_total: subtotal - discount,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }
}

// =============================================================================
// Refresh Listener
// =============================================================================

/// Receives a refresh signal after every mutating engine operation.
///
/// The listener gets a read-only view of the cart and re-renders from it.
/// Any `FnMut(&Cart)` closure is a listener.
pub trait CartListener {
    fn on_refresh(&mut self, cart: &Cart);
}

impl<F> CartListener for F
where
    F: FnMut(&Cart),
{
    fn on_refresh(&mut self, cart: &Cart) {
        self(cart)
    }
}

// =============================================================================
// Cart Engine
// =============================================================================

/// The cart engine: catalog + promo registry + cart + refresh listener.
pub struct CartEngine {
    catalog: Catalog,
    promos: PromoRegistry,
    cart: Cart,
    listener: Option<Box<dyn CartListener>>,
}

impl CartEngine {
    /// Creates an engine with an empty cart and no listener.
    pub fn new(catalog: Catalog, promos: PromoRegistry) -> Self {
        CartEngine {
            catalog,
            promos,
            cart: Cart::default(),
            listener: None,
        }
    }

    /// Builder form of [`CartEngine::set_listener`].
    pub fn with_listener(mut self, listener: impl CartListener + 'static) -> Self {
        self.set_listener(listener);
        self
    }

    /// Registers the refresh listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl CartListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds one unit of a catalog product.
    ///
    /// ## Behavior
    /// - Unknown product: no-op, no refresh
    /// - Already in cart: quantity + 1
    /// - Not in cart: new line with quantity 1 and a frozen product snapshot
    pub fn add_item(&mut self, product_id: ProductId) {
        let Some(product) = self.catalog.get(product_id) else {
            debug!(product_id, "add_item ignored: unknown product");
            return;
        };

        match self.cart.line_mut(product_id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                debug!(product_id, quantity = line.quantity, "cart line incremented");
            }
            None => {
                self.cart.lines.push(CartLine::from_product(product));
                debug!(product_id, "cart line created");
            }
        }

        self.refresh();
    }

    /// Overwrites the quantity of an existing line, raising values below 1
    /// to 1.
    ///
    /// No-op (and no refresh) if the product is not in the cart.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        let Some(line) = self.cart.line_mut(product_id) else {
            debug!(product_id, "set_quantity ignored: product not in cart");
            return;
        };

        line.quantity = clamp_quantity(quantity);
        debug!(
            product_id,
            requested = quantity,
            quantity = line.quantity,
            "cart line quantity set"
        );

        self.refresh();
    }

    /// Empties the cart and drops the active promo.
    pub fn clear(&mut self) {
        self.cart.lines.clear();
        self.cart.active_promo = None;
        debug!("cart cleared");

        self.refresh();
    }

    /// Applies a promo code.
    ///
    /// ## Decision Order
    /// ```text
    /// input ──trim──► ""?                 ──► EmptyInput      (no change)
    ///                 == active code?      ──► AlreadyApplied  (no change)
    ///                 in registry?         ──► Applied         (set + refresh)
    ///                 otherwise            ──► InvalidCode     (no change)
    /// ```
    ///
    /// A valid code different from the active one replaces it.
    pub fn apply_promo(&mut self, input: &str) -> PromoOutcome {
        let Some(code) = normalize_promo_code(input) else {
            return PromoOutcome::EmptyInput;
        };

        if self
            .cart
            .active_promo
            .as_ref()
            .is_some_and(|active| active.code == code)
        {
            return PromoOutcome::AlreadyApplied;
        }

        let Some(promo) = self.promos.resolve(code) else {
            debug!(code, "promo code rejected");
            return PromoOutcome::InvalidCode;
        };

        debug!(code, rate_bps = promo.rate.bps(), "promo code applied");
        self.cart.active_promo = Some(promo.clone());
        self.refresh();

        PromoOutcome::Applied(promo)
    }

    /// Completes the purchase.
    ///
    /// An empty cart returns [`CheckoutOutcome::EmptyCart`] and changes
    /// nothing. Otherwise the summary is captured first, then the cart is
    /// cleared (one refresh).
    pub fn checkout(&mut self) -> CheckoutOutcome {
        if self.cart.is_empty() {
            debug!("checkout rejected: empty cart");
            return CheckoutOutcome::EmptyCart;
        }

        let summary = CheckoutSummary {
            order_id: Uuid::new_v4(),
            lines: self.cart.lines.clone(),
            promo_code: self.cart.active_promo.as_ref().map(|p| p.code.clone()),
            totals: self.cart.totals(),
            completed_at: Utc::now(),
        };
        debug!(
            order_id = %summary.order_id,
            final_total = %summary.totals.final_total,
            "checkout completed"
        );

        self.clear();
        CheckoutOutcome::Completed(summary)
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Current totals. Pure read.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn active_promo(&self) -> Option<&AppliedPromo> {
        self.cart.active_promo()
    }

    pub fn total_quantity(&self) -> i64 {
        self.cart.total_quantity()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn promos(&self) -> &PromoRegistry {
        &self.promos
    }

    fn refresh(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener.on_refresh(&self.cart);
        }
    }
}

impl Default for CartEngine {
    fn default() -> Self {
        CartEngine::new(Catalog::default(), PromoRegistry::default())
    }
}

impl fmt::Debug for CartEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartEngine")
            .field("catalog", &self.catalog)
            .field("promos", &self.promos)
            .field("cart", &self.cart)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use proptest::prelude::*;

    use super::*;
    use crate::types::{DiscountRate, Product};

    /// Engine over the default data with a refresh counter.
    fn counted_engine() -> (CartEngine, Rc<Cell<usize>>) {
        let refreshes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&refreshes);
        let engine = CartEngine::default().with_listener(move |_: &Cart| {
            counter.set(counter.get() + 1);
        });
        (engine, refreshes)
    }

    fn hundred_dollar_engine() -> CartEngine {
        let catalog = Catalog::new(vec![Product::new(
            7,
            "Gift Card",
            "",
            Money::from_cents(10000),
            "",
        )])
        .unwrap();
        let promos = PromoRegistry::new([("ostad10", DiscountRate::from_bps(1000))]).unwrap();
        CartEngine::new(catalog, promos)
    }

    #[test]
    fn test_add_same_product_twice() {
        let mut engine = CartEngine::default();

        engine.add_item(1);
        engine.add_item(1);

        assert_eq!(engine.lines().len(), 1);
        assert_eq!(engine.lines()[0].quantity, 2);
        assert_eq!(engine.totals().subtotal.cents(), 39998);
    }

    #[test]
    fn test_add_unknown_product_is_silent() {
        let (mut engine, refreshes) = counted_engine();

        engine.add_item(42);

        assert!(engine.is_empty());
        assert_eq!(refreshes.get(), 0);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut engine = CartEngine::default();
        engine.add_item(3);
        engine.add_item(1);
        engine.add_item(3);

        let ids: Vec<_> = engine.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(engine.total_quantity(), 3);
    }

    #[test]
    fn test_set_quantity_clamps_to_one() {
        let mut engine = CartEngine::default();
        engine.add_item(2);

        engine.set_quantity(2, 0);
        assert_eq!(engine.cart().line(2).map(|l| l.quantity), Some(1));

        engine.set_quantity(2, -5);
        assert_eq!(engine.cart().line(2).map(|l| l.quantity), Some(1));

        engine.set_quantity(2, 4);
        assert_eq!(engine.cart().line(2).map(|l| l.quantity), Some(4));
        assert_eq!(engine.totals().subtotal.cents(), 4 * 14999);
    }

    #[test]
    fn test_set_quantity_on_missing_line_is_noop() {
        let (mut engine, refreshes) = counted_engine();
        engine.add_item(1);
        let before = engine.cart().clone();

        engine.set_quantity(2, 5);
        engine.set_quantity(99, 5);

        assert_eq!(engine.cart(), &before);
        assert_eq!(refreshes.get(), 1);
    }

    #[test]
    fn test_promo_discount_on_hundred_dollars() {
        let mut engine = hundred_dollar_engine();
        engine.add_item(7);

        let outcome = engine.apply_promo("ostad10");
        assert!(outcome.is_applied());

        let totals = engine.totals();
        assert_eq!(totals.subtotal.cents(), 10000);
        assert_eq!(totals.discount.cents(), 1000);
        assert_eq!(totals.final_total.cents(), 9000);
    }

    #[test]
    fn test_promo_empty_input() {
        let (mut engine, refreshes) = counted_engine();
        engine.apply_promo("ostad5");
        let refreshes_before = refreshes.get();

        assert_eq!(engine.apply_promo(" "), PromoOutcome::EmptyInput);
        assert_eq!(engine.apply_promo(""), PromoOutcome::EmptyInput);
        assert_eq!(engine.active_promo().map(|p| p.code.as_str()), Some("ostad5"));
        assert_eq!(refreshes.get(), refreshes_before);
    }

    #[test]
    fn test_promo_already_applied() {
        let (mut engine, refreshes) = counted_engine();

        assert!(engine.apply_promo("ostad10").is_applied());
        assert_eq!(engine.apply_promo("  ostad10 "), PromoOutcome::AlreadyApplied);
        assert_eq!(refreshes.get(), 1);
    }

    #[test]
    fn test_promo_invalid_code() {
        let mut engine = CartEngine::default();
        engine.apply_promo("ostad10");

        assert_eq!(engine.apply_promo("ostad99"), PromoOutcome::InvalidCode);
        assert_eq!(engine.apply_promo("OSTAD10"), PromoOutcome::InvalidCode);
        assert_eq!(engine.active_promo().map(|p| p.code.as_str()), Some("ostad10"));
    }

    #[test]
    fn test_promo_replaced_by_other_valid_code() {
        let mut engine = CartEngine::default();
        engine.add_item(1);

        engine.apply_promo("ostad10");
        let outcome = engine.apply_promo("ostad5");

        assert!(outcome.is_applied());
        assert_eq!(engine.active_promo().map(|p| p.rate.bps()), Some(500));
        // $199.99 × 5% = $9.9995 → $10.00
        assert_eq!(engine.totals().discount.cents(), 1000);
    }

    #[test]
    fn test_promo_on_empty_cart_discounts_nothing() {
        let mut engine = CartEngine::default();
        engine.apply_promo("ostad10");

        let totals = engine.totals();
        assert!(totals.subtotal.is_zero());
        assert!(totals.discount.is_zero());
        assert!(totals.final_total.is_zero());
    }

    #[test]
    fn test_clear_resets_everything() {
        let (mut engine, refreshes) = counted_engine();
        engine.add_item(1);
        engine.add_item(2);
        engine.apply_promo("ostad10");

        engine.clear();

        let totals = engine.totals();
        assert!(engine.is_empty());
        assert!(engine.active_promo().is_none());
        assert!(totals.subtotal.is_zero());
        assert!(totals.discount.is_zero());
        assert_eq!(refreshes.get(), 4);
    }

    #[test]
    fn test_clear_allows_reapplying_same_code() {
        let mut engine = CartEngine::default();
        engine.apply_promo("ostad10");
        engine.clear();

        assert!(engine.apply_promo("ostad10").is_applied());
    }

    #[test]
    fn test_checkout_empty_cart() {
        let (mut engine, refreshes) = counted_engine();

        assert_eq!(engine.checkout(), CheckoutOutcome::EmptyCart);
        assert!(engine.is_empty());
        assert_eq!(refreshes.get(), 0);
    }

    #[test]
    fn test_checkout_empty_cart_keeps_promo() {
        let mut engine = CartEngine::default();
        engine.apply_promo("ostad5");

        assert_eq!(engine.checkout(), CheckoutOutcome::EmptyCart);
        assert!(engine.active_promo().is_some());
    }

    #[test]
    fn test_checkout_reports_then_clears() {
        let (mut engine, refreshes) = counted_engine();
        engine.add_item(1);
        engine.add_item(3);
        engine.apply_promo("ostad10");
        let expected = engine.totals();
        let refreshes_before = refreshes.get();

        let CheckoutOutcome::Completed(summary) = engine.checkout() else {
            panic!("expected a completed checkout");
        };

        assert_eq!(summary.totals, expected);
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.promo_code.as_deref(), Some("ostad10"));
        assert_eq!(summary.totals.subtotal.cents(), 27998);
        assert_eq!(summary.totals.discount.cents(), 2800);
        assert_eq!(summary.totals.final_total.cents(), 25198);

        assert!(engine.is_empty());
        assert!(engine.active_promo().is_none());
        assert_eq!(refreshes.get(), refreshes_before + 1);
    }

    #[test]
    fn test_listener_sees_post_mutation_state() {
        let seen = Rc::new(Cell::new(0i64));
        let sink = Rc::clone(&seen);
        let mut engine = CartEngine::default().with_listener(move |cart: &Cart| {
            sink.set(cart.total_quantity());
        });

        engine.add_item(1);
        engine.add_item(1);
        assert_eq!(seen.get(), 2);

        engine.set_quantity(1, 9);
        assert_eq!(seen.get(), 9);

        engine.clear();
        assert_eq!(seen.get(), 0);
    }

    #[test]
    fn test_huge_quantity_saturates() {
        let mut engine = CartEngine::default();
        engine.add_item(1);
        engine.set_quantity(1, i64::MAX);
        engine.add_item(1);

        assert_eq!(engine.total_quantity(), i64::MAX);
        assert_eq!(engine.totals().subtotal.cents(), i64::MAX);
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    #[derive(Debug, Clone)]
    enum Op {
        Add(ProductId),
        SetQuantity(ProductId, i64),
        Promo(String),
        Clear,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u32..5).prop_map(Op::Add),
            (0u32..5, -10i64..50).prop_map(|(id, q)| Op::SetQuantity(id, q)),
            prop::sample::select(vec!["ostad10", "ostad5", " ostad5 ", "bogus", " ", ""])
                .prop_map(|code| Op::Promo(code.to_string())),
            Just(Op::Clear),
        ]
    }

    fn run(engine: &mut CartEngine, op: &Op) {
        match op {
            Op::Add(id) => engine.add_item(*id),
            Op::SetQuantity(id, q) => engine.set_quantity(*id, *q),
            Op::Promo(code) => {
                engine.apply_promo(code);
            }
            Op::Clear => engine.clear(),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: after any sequence of operations, lines are unique by
        /// product and every quantity is at least 1.
        #[test]
        fn lines_unique_and_positive(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut engine = CartEngine::default();
            for op in &ops {
                run(&mut engine, op);
            }

            let mut ids: Vec<_> = engine.lines().iter().map(|l| l.product_id).collect();
            let before = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), before);
            prop_assert!(engine.lines().iter().all(|l| l.quantity >= 1));
        }

        /// Property: set_quantity gives q for q > 0 and 1 otherwise.
        #[test]
        fn set_quantity_clamp_law(q in any::<i64>()) {
            let mut engine = CartEngine::default();
            engine.add_item(2);
            engine.set_quantity(2, q);

            let expected = if q > 0 { q } else { 1 };
            prop_assert_eq!(engine.cart().line(2).map(|l| l.quantity), Some(expected));
        }

        /// Property: totals() is idempotent and never changes the cart.
        #[test]
        fn totals_is_pure(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut engine = CartEngine::default();
            for op in &ops {
                run(&mut engine, op);
            }

            let before = engine.cart().clone();
            let first = engine.totals();
            let second = engine.totals();
            prop_assert_eq!(first, second);
            prop_assert_eq!(engine.cart(), &before);
            prop_assert_eq!(first.final_total, first.subtotal - first.discount);
        }

        /// Property: clear() always zeroes the totals and drops the promo.
        #[test]
        fn clear_resets(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut engine = CartEngine::default();
            for op in &ops {
                run(&mut engine, op);
            }

            engine.clear();
            let totals = engine.totals();
            prop_assert!(totals.subtotal.is_zero());
            prop_assert!(totals.discount.is_zero());
            prop_assert!(engine.active_promo().is_none());
        }

        /// Property: an unregistered code never changes the active promo.
        #[test]
        fn unknown_code_never_mutates_promo(
            applied in prop::sample::select(vec![None, Some("ostad10"), Some("ostad5")]),
            code in "[a-z0-9 ]{0,12}",
        ) {
            let mut engine = CartEngine::default();
            if let Some(applied) = applied {
                engine.apply_promo(applied);
            }
            prop_assume!(!engine.promos().contains(code.trim()));

            let before = engine.active_promo().cloned();
            engine.apply_promo(&code);
            prop_assert_eq!(engine.active_promo().cloned(), before);
        }
    }
}
