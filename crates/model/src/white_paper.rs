//! White paper interest rate model.
//!
//! The borrow rate grows linearly with utilization and has no kink:
//!
//! ```text
//! borrow_rate = utilization * multiplier_per_block + base_rate_per_block
//! ```

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::RateModelError;
use crate::math::{add, mul_fixed, per_block, BLOCKS_PER_YEAR};
use crate::supply::derive_supply_rate;
use crate::utilization::utilization_rate;

/// Linear borrow rate at `utilization`.
///
/// Shared with the below-kink branch of the jump rate model.
pub(crate) fn linear_borrow_rate(
    utilization: U256,
    multiplier_per_block: U256,
    base_rate_per_block: U256,
) -> Result<U256, RateModelError> {
    add(mul_fixed(utilization, multiplier_per_block)?, base_rate_per_block)
}

/// Linear rate model parameters (per block, WAD-scaled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitePaperRateModel {
    /// Borrow rate at zero utilization
    pub base_rate_per_block: U256,
    /// Slope of the borrow rate over utilization
    pub multiplier_per_block: U256,
}

impl WhitePaperRateModel {
    /// Builds a model from annualized parameters, assuming [`BLOCKS_PER_YEAR`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use lendrate_model::{WhitePaperRateModel, WAD};
    /// use alloy_primitives::U256;
    ///
    /// // 10% base, 45% slope
    /// let model = WhitePaperRateModel::new(
    ///     U256::from(100_000_000_000_000_000u64),
    ///     U256::from(450_000_000_000_000_000u64),
    /// )
    /// .unwrap();
    ///
    /// let idle = model.borrow_rate(U256::from(1000), U256::ZERO, U256::ZERO).unwrap();
    /// assert_eq!(idle, model.base_rate_per_block);
    /// ```
    pub fn new(base_rate_per_year: U256, multiplier_per_year: U256) -> Result<Self, RateModelError> {
        Self::with_blocks_per_year(base_rate_per_year, multiplier_per_year, BLOCKS_PER_YEAR)
    }

    /// Builds a model from annualized parameters and a custom block rate.
    pub fn with_blocks_per_year(
        base_rate_per_year: U256,
        multiplier_per_year: U256,
        blocks_per_year: u64,
    ) -> Result<Self, RateModelError> {
        Ok(Self {
            base_rate_per_block: per_block(base_rate_per_year, blocks_per_year)?,
            multiplier_per_block: per_block(multiplier_per_year, blocks_per_year)?,
        })
    }

    /// Builds a model from per-block parameters.
    pub fn from_per_block(base_rate_per_block: U256, multiplier_per_block: U256) -> Self {
        Self {
            base_rate_per_block,
            multiplier_per_block,
        }
    }

    /// Per-block borrow rate for the given market balances.
    pub fn borrow_rate(&self, cash: U256, borrows: U256, reserves: U256) -> Result<U256, RateModelError> {
        let utilization = utilization_rate(cash, borrows, reserves)?;
        linear_borrow_rate(utilization, self.multiplier_per_block, self.base_rate_per_block)
    }

    /// Per-block supply rate for the given market balances.
    pub fn supply_rate(
        &self,
        cash: U256,
        borrows: U256,
        reserves: U256,
        reserve_factor: U256,
    ) -> Result<U256, RateModelError> {
        let utilization = utilization_rate(cash, borrows, reserves)?;
        let borrow_rate =
            linear_borrow_rate(utilization, self.multiplier_per_block, self.base_rate_per_block)?;
        derive_supply_rate(utilization, borrow_rate, reserve_factor)
    }
}
