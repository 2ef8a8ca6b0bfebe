//! # tote-shell: Terminal Front End for Tote
//!
//! A thin presentation adapter over `tote-core`. It owns one
//! [`CartEngine`](tote_core::CartEngine), turns typed lines into engine
//! calls and re-renders the cart whenever the engine signals a refresh.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Parse arguments (clap) ───────────────────────────────────────────► │
//! │  2. Initialize logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: warn,tote_core=info,tote_shell=info, RUST_LOG wins       │
//! │       (crate levels raised to debug with --verbose)                     │
//! │  3. Load configuration ───────────────────────────────────────────────► │
//! │     • --config / $TOTE_CONFIG / platform dir / defaults                 │
//! │  4. Build the engine (validated catalog + promo registry) ────────────► │
//! │  5. Run the shell over stdin/stdout until `quit` or EOF ──────────────► │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod shell;

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Args;
use config::ShellConfig;
use error::ShellResult;
use render::Renderer;
use shell::Shell;

/// Runs the shell with the given arguments over stdin/stdout.
pub fn run(args: Args) -> ShellResult<()> {
    let config = ShellConfig::load(args.config.as_deref())?;
    let engine = config.build_engine()?;
    info!(store = %config.store_name, "starting tote shell");

    let renderer = Renderer::new(args.output_format(), config);
    let mut shell = Shell::new(engine, renderer, io::stdout().lock());
    shell.run(io::stdin().lock())
}

/// Filter directive used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,tote_core=debug,tote_shell=debug"
    } else {
        "warn,tote_core=info,tote_shell=info"
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tote_core=trace` - Show trace for the engine only
/// - Default: `warn,tote_core=info,tote_shell=info`, or debug with `--verbose`
///
/// Logs go to stderr so they never mix with shell output.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
