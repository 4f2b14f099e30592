//! Error types for configuration loading.

use std::path::PathBuf;

use lendrate_model::RateModelError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while loading or converting a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration is not valid JSON for the expected shape.
    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A field that must be non-negative was negative.
    #[error("{field} must not be negative (got {value})")]
    NegativeValue { field: &'static str, value: Decimal },

    /// Reserve factor outside `[0, 1]`.
    #[error("reserve_factor must be between 0 and 1 (got {0})")]
    ReserveFactorOutOfRange(Decimal),

    /// `blocks_per_year` of zero.
    #[error("blocks_per_year must be positive")]
    InvalidBlocksPerYear,

    /// Conversion to per-block values failed.
    #[error("Invalid model parameters: {0}")]
    Model(#[from] RateModelError),
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
