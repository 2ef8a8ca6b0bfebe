//! # Shell Configuration
//!
//! Store settings, catalog and promo table loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TOTE_STORE_NAME`, `TOTE_CURRENCY_SYMBOL`)
//! 2. Config file: `--config <path>`, else `$TOTE_CONFIG`, else
//!    `shop.json` in the platform config directory if it exists
//! 3. Defaults (this file): demo catalog and the built-in promo codes
//!
//! ## File Format
//! ```json
//! {
//!   "storeName": "Corner Shop",
//!   "currencySymbol": "€",
//!   "products": [
//!     { "id": 1, "name": "Mug", "description": "", "price": 1250, "image": "/img/mug.jpg" }
//!   ],
//!   "promos": { "spring20": 0.20 }
//! }
//! ```
//! Prices are in cents, promo rates are fractions in `[0, 1]`.
//!
//! Read-only after startup, like the engine's catalog.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tote_core::{Catalog, CartEngine, DiscountRate, Money, Product, PromoRegistry};
use tracing::{debug, info};

use crate::error::{ShellError, ShellResult};

/// Name of the config file looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "shop.json";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShellConfig {
    /// Store name (shown in the banner)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Catalog override. `None` keeps the demo catalog.
    pub products: Option<Vec<Product>>,

    /// Promo table override: code → fraction. `None` keeps the defaults.
    pub promos: Option<BTreeMap<String, f64>>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            store_name: "Tote Demo Store".to_string(),
            currency_symbol: "$".to_string(),
            products: None,
            promos: None,
        }
    }
}

impl ShellConfig {
    /// Loads configuration from every source.
    ///
    /// An explicit `path` must exist. The fallback locations are optional.
    pub fn load(path: Option<&Path>) -> ShellResult<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("TOTE_CONFIG").map(PathBuf::from));

        let config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("no config file found, using defaults");
                    ShellConfig::default()
                }
            },
        };

        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Reads and parses a JSON config file.
    pub fn from_file(path: &Path) -> ShellResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ShellError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = serde_json::from_str(&raw).map_err(|source| ShellError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Applies `TOTE_*` overrides through `lookup`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(store_name) = lookup("TOTE_STORE_NAME") {
            self.store_name = store_name;
        }

        if let Some(symbol) = lookup("TOTE_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        self
    }

    /// Builds the catalog, falling back to the demo catalog.
    pub fn catalog(&self) -> ShellResult<Catalog> {
        match &self.products {
            Some(products) => Ok(Catalog::new(products.iter().cloned())?),
            None => Ok(Catalog::default()),
        }
    }

    /// Builds the promo registry, falling back to the built-in codes.
    pub fn promo_registry(&self) -> ShellResult<PromoRegistry> {
        match &self.promos {
            Some(promos) => Ok(PromoRegistry::new(
                promos
                    .iter()
                    .map(|(code, fraction)| (code.as_str(), DiscountRate::from_fraction(*fraction))),
            )?),
            None => Ok(PromoRegistry::default()),
        }
    }

    /// Builds a cart engine over this configuration's data.
    pub fn build_engine(&self) -> ShellResult<CartEngine> {
        let catalog = self.catalog()?;
        let promos = self.promo_registry()?;
        info!(
            products = catalog.len(),
            promo_codes = promos.len(),
            "cart engine ready"
        );
        Ok(CartEngine::new(catalog, promos))
    }

    /// Formats an amount for display, e.g. `$12.34` or `-$5.50`.
    pub fn format_money(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }
}

/// `shop.json` inside the platform config directory.
///
/// - **Linux**: `~/.config/tote/shop.json`
/// - **macOS**: `~/Library/Application Support/com.tote.tote/shop.json`
/// - **Windows**: `%APPDATA%\tote\tote\config\shop.json`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "tote", "tote").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
