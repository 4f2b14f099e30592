//! Configuration for lendrate models and markets.
//!
//! This crate turns human-readable, annualized descriptions of rate models
//! and markets (typically JSON files) into the per-block fixed-point values
//! used by `lendrate-model`.

mod error;
mod types;
pub mod wad;

pub use error::{ConfigError, Result};
pub use types::*;
