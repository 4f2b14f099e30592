//! Lending Market Interest Rate Models
//!
//! This crate computes per-block borrow and supply rates for pooled lending
//! markets from their cash, borrows and reserves, using exact 1e18 fixed-point
//! arithmetic on 256-bit integers.
//!
//! # Overview
//!
//! - [`WhitePaperRateModel`]: borrow rate linear in utilization
//! - [`JumpRateModel`]: linear up to a kink, steeper slope beyond it
//! - [`ReactiveJumpRateModel`]: jump rate model whose slope adapts to the
//!   borrow rates it observes at each accrual
//! - [`RateModel`]: the closed set of models a ledger can install
//! - [`Market`]: a reference ledger that accrues interest through a model
//!
//! Every arithmetic step is checked. Overflow and division by zero are
//! reported as [`RateModelError`] values, never wrapped or saturated.
//!
//! # Example
//!
//! ```rust
//! use lendrate_model::{JumpRateModel, RateModel, WAD, BLOCKS_PER_YEAR, math::rate_to_apr};
//! use alloy_primitives::U256;
//!
//! let pct = |p: u64| U256::from(p) * WAD / U256::from(100);
//!
//! // 10% base, 20% slope, 100% jump above a 90% kink
//! let model: RateModel = JumpRateModel::new(pct(10), pct(20), pct(100), pct(90))
//!     .unwrap()
//!     .into();
//!
//! // 310 borrowed out of 1000
//! let rate = model
//!     .borrow_rate(U256::from(690) * WAD, U256::from(310) * WAD, U256::ZERO)
//!     .unwrap();
//! let apr = rate_to_apr(rate, BLOCKS_PER_YEAR);
//! assert!((apr - 0.162).abs() < 1e-6);
//! ```

pub mod checkpoint;
pub mod error;
pub mod jump;
pub mod market;
pub mod math;
pub mod model;
pub mod reactive;
pub mod supply;
pub mod utilization;
pub mod white_paper;

// Re-export commonly used types
pub use error::RateModelError;

// Math exports
pub use math::{MathOperation, BLOCKS_PER_YEAR, WAD};

// Model exports
pub use checkpoint::{CheckpointRing, RateCheckpoint, CHECKPOINT_CAPACITY};
pub use jump::{JumpRateModel, RateModelConfig};
pub use model::{ModelKind, RateModel};
pub use reactive::{
    AccrualContext, Binding, ReactiveJumpRateModel, ReactivePolicy, ReactiveState,
    DEFAULT_SENSITIVITY,
};
pub use supply::derive_supply_rate;
pub use utilization::{utilization_rate, UtilizationSnapshot};
pub use white_paper::WhitePaperRateModel;

// Ledger exports
pub use market::{AccrualOutcome, Market, BORROW_RATE_MAX_PER_BLOCK};
