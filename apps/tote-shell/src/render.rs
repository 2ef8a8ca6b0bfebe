//! # Rendering
//!
//! Turns engine state and outcomes into terminal output.
//!
//! Two formats share one event model:
//! - `Text`: human-readable blocks
//! - `Json`: one JSON object per line, tagged by `event`, built from the
//!   core's serde types so a script sees the same shapes a web UI would

use std::io::Write;

use serde::Serialize;
use tote_core::{AppliedPromo, Cart, CartLine, CartTotals, CheckoutOutcome, Product, PromoOutcome};

use crate::config::ShellConfig;
use crate::error::ShellResult;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One rendered event in `--json` mode.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ShellEvent<'a> {
    Products {
        products: &'a [Product],
    },
    #[serde(rename_all = "camelCase")]
    Cart {
        lines: &'a [CartLine],
        active_promo: Option<&'a AppliedPromo>,
        totals: CartTotals,
    },
    Promo {
        outcome: &'a PromoOutcome,
        message: String,
    },
    Checkout {
        outcome: &'a CheckoutOutcome,
        message: String,
    },
    Notice {
        message: &'a str,
    },
    Error {
        message: &'a str,
    },
}

pub const HELP: &str = "\
Commands:
  products            list the catalog
  add <id>            add one unit of a product
  qty <id> <n>        set a line's quantity (values below 1 become 1)
  promo <code>        apply a promo code
  cart                show the cart
  totals              show subtotal, discount and total
  clear               empty the cart and drop the promo
  checkout            complete the purchase
  help                show this message
  quit                leave";

/// Writes events in the configured format.
#[derive(Debug, Clone)]
pub struct Renderer {
    format: OutputFormat,
    config: ShellConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat, config: ShellConfig) -> Self {
        Renderer { format, config }
    }

    pub fn banner(&self, out: &mut impl Write) -> ShellResult<()> {
        if self.format == OutputFormat::Text {
            writeln!(out, "Welcome to {}! Type `help` for commands.", self.config.store_name)?;
        }
        Ok(())
    }

    pub fn products(&self, out: &mut impl Write, products: &[Product]) -> ShellResult<()> {
        if self.format == OutputFormat::Json {
            return emit(out, &ShellEvent::Products { products });
        }

        writeln!(out, "Products:")?;
        for product in products {
            writeln!(
                out,
                "  [{}] {} - {}",
                product.id,
                product.name,
                self.config.format_money(product.price)
            )?;
            if !product.description.is_empty() {
                writeln!(out, "      {}", product.description)?;
            }
        }
        Ok(())
    }

    /// The cart view: badge count, lines, totals.
    pub fn cart(&self, out: &mut impl Write, cart: &Cart) -> ShellResult<()> {
        let totals = cart.totals();

        if self.format == OutputFormat::Json {
            return emit(
                out,
                &ShellEvent::Cart {
                    lines: cart.lines(),
                    active_promo: cart.active_promo(),
                    totals,
                },
            );
        }

        writeln!(out, "Cart ({} items):", totals.total_quantity)?;
        if cart.is_empty() {
            writeln!(out, "  (empty)")?;
        }
        for line in cart.lines() {
            writeln!(
                out,
                "  [{}] {}  {} x {}  {}",
                line.product_id,
                line.name,
                self.config.format_money(line.unit_price),
                line.quantity,
                self.config.format_money(line.line_total())
            )?;
        }
        self.write_totals(out, &totals, cart.active_promo())
    }

    pub fn totals(&self, out: &mut impl Write, cart: &Cart) -> ShellResult<()> {
        if self.format == OutputFormat::Json {
            return self.cart(out, cart);
        }
        self.write_totals(out, &cart.totals(), cart.active_promo())
    }

    pub fn promo(&self, out: &mut impl Write, outcome: &PromoOutcome) -> ShellResult<()> {
        if self.format == OutputFormat::Json {
            return emit(
                out,
                &ShellEvent::Promo {
                    outcome,
                    message: outcome.to_string(),
                },
            );
        }

        writeln!(out, "{}", outcome)?;
        Ok(())
    }

    pub fn checkout(&self, out: &mut impl Write, outcome: &CheckoutOutcome) -> ShellResult<()> {
        if self.format == OutputFormat::Json {
            return emit(
                out,
                &ShellEvent::Checkout {
                    outcome,
                    message: outcome.to_string(),
                },
            );
        }

        match outcome {
            CheckoutOutcome::EmptyCart => writeln!(out, "{}", outcome)?,
            CheckoutOutcome::Completed(summary) => {
                writeln!(out, "Checkout successful!")?;
                writeln!(out, "  Order:       {}", summary.order_id)?;
                writeln!(
                    out,
                    "  Subtotal:    {}",
                    self.config.format_money(summary.totals.subtotal)
                )?;
                writeln!(
                    out,
                    "  Discount:    -{}",
                    self.config.format_money(summary.totals.discount)
                )?;
                writeln!(
                    out,
                    "  Final Total: {}",
                    self.config.format_money(summary.totals.final_total)
                )?;
            }
        }
        Ok(())
    }

    /// Informational message that is not an error.
    pub fn notice(&self, out: &mut impl Write, message: &str) -> ShellResult<()> {
        if self.format == OutputFormat::Json {
            return emit(out, &ShellEvent::Notice { message });
        }
        writeln!(out, "{}", message)?;
        Ok(())
    }

    pub fn error(&self, out: &mut impl Write, message: &str) -> ShellResult<()> {
        if self.format == OutputFormat::Json {
            return emit(out, &ShellEvent::Error { message });
        }
        writeln!(out, "error: {}", message)?;
        Ok(())
    }

    fn write_totals(
        &self,
        out: &mut impl Write,
        totals: &CartTotals,
        promo: Option<&AppliedPromo>,
    ) -> ShellResult<()> {
        writeln!(out, "  Subtotal: {}", self.config.format_money(totals.subtotal))?;
        match promo {
            Some(promo) => writeln!(
                out,
                "  Discount ({} {}): -{}",
                promo.code,
                promo.rate,
                self.config.format_money(totals.discount)
            )?,
            None => writeln!(out, "  Discount: -{}", self.config.format_money(totals.discount))?,
        }
        writeln!(out, "  Total:    {}", self.config.format_money(totals.final_total))?;
        Ok(())
    }
}

fn emit(out: &mut impl Write, event: &ShellEvent<'_>) -> ShellResult<()> {
    serde_json::to_writer(&mut *out, event)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tote_core::CartEngine;

    fn render_cart(format: OutputFormat, engine: &CartEngine) -> String {
        let renderer = Renderer::new(format, ShellConfig::default());
        let mut out = Vec::new();
        renderer.cart(&mut out, engine.cart()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_cart() {
        let mut engine = CartEngine::default();
        engine.add_item(1);
        engine.add_item(1);
        engine.apply_promo("ostad10");

        let text = render_cart(OutputFormat::Text, &engine);
        assert!(text.starts_with("Cart (2 items):"));
        assert!(text.contains("[1] Wireless Headphones  $199.99 x 2  $399.98"));
        assert!(text.contains("Subtotal: $399.98"));
        assert!(text.contains("Discount (ostad10 10%): -$40.00"));
        assert!(text.contains("Total:    $359.98"));
    }

    #[test]
    fn test_text_empty_cart() {
        let text = render_cart(OutputFormat::Text, &CartEngine::default());
        assert!(text.contains("(empty)"));
        assert!(text.contains("Total:    $0.00"));
    }

    #[test]
    fn test_json_cart_event() {
        let mut engine = CartEngine::default();
        engine.add_item(3);

        let line = render_cart(OutputFormat::Json, &engine);
        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["event"], "cart");
        assert_eq!(value["lines"][0]["productId"], 3);
        assert_eq!(value["activePromo"], serde_json::Value::Null);
        assert_eq!(value["totals"]["subtotal"], 7999);
        assert_eq!(value["totals"]["finalTotal"], 7999);
    }

    #[test]
    fn test_json_promo_event() {
        let renderer = Renderer::new(OutputFormat::Json, ShellConfig::default());
        let mut out = Vec::new();
        renderer.promo(&mut out, &PromoOutcome::EmptyInput).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["event"], "promo");
        assert_eq!(value["outcome"]["status"], "emptyInput");
        assert_eq!(value["message"], "Please enter a promo code");
    }

    #[test]
    fn test_text_products() {
        let renderer = Renderer::new(OutputFormat::Text, ShellConfig::default());
        let mut out = Vec::new();
        renderer
            .products(&mut out, CartEngine::default().catalog().products())
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[2] Smart Watch - $149.99"));
        assert!(text.contains("Portable waterproof speaker with 20h battery life."));
    }
}
