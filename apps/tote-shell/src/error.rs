//! # Shell Error Type
//!
//! Everything that can stop the shell. Cart conditions (bad promo code,
//! empty checkout) are never errors; they arrive as engine outcomes and
//! are rendered like any other result.
//!
//! ```text
//! startup:  config file ──► ConfigRead / ConfigParse
//!           catalog/promo data ──► Core(CoreError)
//! runtime:  stdin/stdout ──► Io
//!           --json encoding ──► Json
//! ```

use std::path::PathBuf;

use thiserror::Error;
use tote_core::CoreError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid catalog or promo data: {0}")]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ShellResult<T> = Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_read_message_includes_path() {
        let err = ShellError::ConfigRead {
            path: PathBuf::from("/etc/tote/shop.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read config /etc/tote/shop.json: not found"
        );
    }

    #[test]
    fn test_core_error_converts() {
        let err: ShellError = CoreError::DuplicateProduct(3).into();
        assert_eq!(
            err.to_string(),
            "Invalid catalog or promo data: Duplicate product id: 3"
        );
    }
}
