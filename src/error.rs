//! Error types for the fallible library boundaries
//!
//! Absent or malformed page data is not an error anywhere in this crate; it
//! resolves to empty results. These variants cover storage, configuration
//! and caller-supplied input.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TradeToolsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse config: {0}")]
    Config(#[from] json5::Error),

    #[error("invalid profile URL '{url}': {reason}")]
    InvalidProfileUrl { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, TradeToolsError>;
