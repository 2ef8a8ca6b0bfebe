//! # Interactive Shell
//!
//! The presentation adapter: reads commands, calls the engine, renders.
//!
//! ## Command Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin line ──► Command::from_str ──► engine call ──► outcome rendered │
//! │                      │                     │                            │
//! │                 parse error           refresh signal                    │
//! │                      │                     │ (sets `dirty`)             │
//! │                      ▼                     ▼                            │
//! │                 error rendered      cart view re-rendered from          │
//! │                 (engine untouched)  engine.cart() after the command     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::Cell;
use std::io::{BufRead, Write};
use std::num::{IntErrorKind, ParseIntError};
use std::rc::Rc;
use std::str::FromStr;

use thiserror::Error;
use tote_core::{Cart, CartEngine, ProductId};
use tracing::{debug, info};

use crate::error::ShellResult;
use crate::render::{Renderer, HELP};

// =============================================================================
// Commands
// =============================================================================

/// A parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Products,
    Add(ProductId),
    Quantity(ProductId, i64),
    /// Raw promo input; the engine trims it.
    Promo(String),
    Cart,
    Totals,
    Clear,
    Checkout,
    Help,
    Quit,
}

/// Why a line could not be turned into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),

    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{argument} must be a whole number, got `{value}`")]
    InvalidNumber {
        argument: &'static str,
        value: String,
    },

    #[error("{argument} is out of range, got `{value}`")]
    OutOfRange {
        argument: &'static str,
        value: String,
    },
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (line.trim_end(), ""),
        };
        let mut args = rest.split_whitespace();

        match word.to_ascii_lowercase().as_str() {
            "" => Err(ParseCommandError::Empty),
            "products" | "ls" => Ok(Command::Products),
            "add" => Ok(Command::Add(parse_arg(args.next(), "add", "a product id")?)),
            "qty" | "quantity" => {
                let id = parse_arg(args.next(), "qty", "a product id")?;
                let quantity = parse_arg(args.next(), "qty", "a quantity")?;
                Ok(Command::Quantity(id, quantity))
            }
            "promo" => Ok(Command::Promo(rest.to_string())),
            "cart" => Ok(Command::Cart),
            "totals" => Ok(Command::Totals),
            "clear" => Ok(Command::Clear),
            "checkout" => Ok(Command::Checkout),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_arg<T>(
    value: Option<&str>,
    command: &'static str,
    argument: &'static str,
) -> Result<T, ParseCommandError>
where
    T: FromStr<Err = ParseIntError>,
{
    let value = value.ok_or(ParseCommandError::MissingArgument { command, argument })?;
    value.parse().map_err(|err: ParseIntError| {
        let value = value.to_string();
        match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                ParseCommandError::OutOfRange { argument, value }
            }
            _ => ParseCommandError::InvalidNumber { argument, value },
        }
    })
}

// =============================================================================
// Shell
// =============================================================================

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal adapter around one [`CartEngine`].
pub struct Shell<W: Write> {
    engine: CartEngine,
    renderer: Renderer,
    out: W,
    dirty: Rc<Cell<bool>>,
}

impl<W: Write> Shell<W> {
    /// Wraps an engine and subscribes to its refresh signal.
    pub fn new(mut engine: CartEngine, renderer: Renderer, out: W) -> Self {
        let dirty = Rc::new(Cell::new(false));
        let flag = Rc::clone(&dirty);
        engine.set_listener(move |_: &Cart| flag.set(true));

        Shell {
            engine,
            renderer,
            out,
            dirty,
        }
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self, mut input: impl BufRead) -> ShellResult<()> {
        self.renderer.banner(&mut self.out)?;
        self.renderer
            .products(&mut self.out, self.engine.catalog().products())?;
        self.out.flush()?;

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let flow = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.execute_line(line.trim_end_matches(['\n', '\r']))?,
                Err(err) => {
                    debug!(error = %err, "undecodable input rejected");
                    self.renderer.error(&mut self.out, "input is not valid UTF-8")?;
                    Flow::Continue
                }
            };
            self.out.flush()?;
            if flow == Flow::Quit {
                break;
            }
        }

        info!(
            lines = self.engine.cart().item_count(),
            "shell session ended"
        );
        Ok(())
    }

    /// Parses and executes one input line.
    pub fn execute_line(&mut self, line: &str) -> ShellResult<Flow> {
        match line.parse::<Command>() {
            Ok(command) => self.execute(command),
            Err(ParseCommandError::Empty) => Ok(Flow::Continue),
            Err(err) => {
                debug!(input = line, error = %err, "command rejected");
                self.renderer.error(&mut self.out, &err.to_string())?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Executes a command and re-renders the cart if the engine refreshed.
    pub fn execute(&mut self, command: Command) -> ShellResult<Flow> {
        debug!(?command, "executing command");

        match command {
            Command::Products => self
                .renderer
                .products(&mut self.out, self.engine.catalog().products())?,
            Command::Add(id) => {
                if !self.engine.catalog().contains(id) {
                    self.renderer
                        .error(&mut self.out, &format!("Unknown product: {}", id))?;
                }
                self.engine.add_item(id);
            }
            Command::Quantity(id, quantity) => {
                if self.engine.cart().line(id).is_none() {
                    self.renderer
                        .error(&mut self.out, &format!("Product {} is not in the cart", id))?;
                }
                self.engine.set_quantity(id, quantity);
            }
            Command::Promo(code) => {
                let outcome = self.engine.apply_promo(&code);
                self.renderer.promo(&mut self.out, &outcome)?;
            }
            Command::Cart => self.renderer.cart(&mut self.out, self.engine.cart())?,
            Command::Totals => self.renderer.totals(&mut self.out, self.engine.cart())?,
            Command::Clear => self.engine.clear(),
            Command::Checkout => {
                let outcome = self.engine.checkout();
                self.renderer.checkout(&mut self.out, &outcome)?;
            }
            Command::Help => self.renderer.notice(&mut self.out, HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        if self.dirty.replace(false) {
            self.renderer.cart(&mut self.out, self.engine.cart())?;
        }

        Ok(Flow::Continue)
    }

    pub fn engine(&self) -> &CartEngine {
        &self.engine
    }

    /// The writer everything has been rendered to.
    pub fn output(&self) -> &W {
        &self.out
    }
}
