//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::render::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "tote")]
#[command(about = "Interactive shopping cart: browse, add items, apply a promo code, check out")]
#[command(version)]
pub struct Args {
    /// Configuration file (JSON). Defaults to $TOTE_CONFIG, then the
    /// platform config directory.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Emit one JSON object per event instead of text
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}
