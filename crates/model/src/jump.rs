//! Jump rate model.
//!
//! Below the kink the borrow rate follows the white paper line. Above it the
//! slope switches to `jump_multiplier_per_block`:
//!
//! ```text
//! if utilization <= kink:
//!     rate = utilization * multiplier + base
//! else:
//!     rate = (utilization - kink) * jump_multiplier + kink * multiplier + base
//! ```
//!
//! Both branches agree at `utilization == kink`, so the curve is continuous.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::RateModelError;
use crate::math::{add, mul_fixed, per_block, sub, BLOCKS_PER_YEAR};
use crate::supply::derive_supply_rate;
use crate::utilization::utilization_rate;
use crate::white_paper::linear_borrow_rate;

/// Parameters of a kinked rate curve (per block, WAD-scaled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateModelConfig {
    /// Borrow rate at zero utilization
    pub base_rate_per_block: U256,
    /// Slope below the kink
    pub multiplier_per_block: U256,
    /// Slope above the kink
    pub jump_multiplier_per_block: U256,
    /// Utilization at which the jump slope takes over (WAD-scaled, may exceed WAD)
    pub kink: U256,
}

impl RateModelConfig {
    /// Converts annualized inputs into per-block parameters.
    ///
    /// The kink is a utilization fraction and is not scaled by the block rate.
    pub fn from_annual(
        base_rate_per_year: U256,
        multiplier_per_year: U256,
        jump_multiplier_per_year: U256,
        kink: U256,
        blocks_per_year: u64,
    ) -> Result<Self, RateModelError> {
        Ok(Self {
            base_rate_per_block: per_block(base_rate_per_year, blocks_per_year)?,
            multiplier_per_block: per_block(multiplier_per_year, blocks_per_year)?,
            jump_multiplier_per_block: per_block(jump_multiplier_per_year, blocks_per_year)?,
            kink,
        })
    }

    /// Borrow rate at `utilization` using `multiplier_per_block` as the
    /// below-kink slope.
    ///
    /// The reactive model passes its current multiplier here instead of the
    /// configured one.
    pub fn borrow_rate_with_multiplier(
        &self,
        utilization: U256,
        multiplier_per_block: U256,
    ) -> Result<U256, RateModelError> {
        if utilization <= self.kink {
            return linear_borrow_rate(utilization, multiplier_per_block, self.base_rate_per_block);
        }

        let normal_rate = linear_borrow_rate(self.kink, multiplier_per_block, self.base_rate_per_block)?;
        let excess_util = sub(utilization, self.kink)?;
        add(mul_fixed(excess_util, self.jump_multiplier_per_block)?, normal_rate)
    }
}

/// Piecewise-linear rate model with a kink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpRateModel {
    pub config: RateModelConfig,
}

impl JumpRateModel {
    /// Builds a model from annualized parameters, assuming [`BLOCKS_PER_YEAR`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use lendrate_model::{JumpRateModel, WAD, BLOCKS_PER_YEAR, math::rate_to_apr};
    /// use alloy_primitives::U256;
    ///
    /// let pct = |p: u64| U256::from(p) * WAD / U256::from(100);
    /// let model = JumpRateModel::new(pct(10), pct(20), pct(100), pct(90)).unwrap();
    ///
    /// // 100% utilization: 10% + 0.9 * 20% + 0.1 * 100% = 38%
    /// let rate = model.borrow_rate(U256::ZERO, U256::from(1000), U256::ZERO).unwrap();
    /// assert!((rate_to_apr(rate, BLOCKS_PER_YEAR) - 0.38).abs() < 1e-2);
    /// ```
    pub fn new(
        base_rate_per_year: U256,
        multiplier_per_year: U256,
        jump_multiplier_per_year: U256,
        kink: U256,
    ) -> Result<Self, RateModelError> {
        let config = RateModelConfig::from_annual(
            base_rate_per_year,
            multiplier_per_year,
            jump_multiplier_per_year,
            kink,
            BLOCKS_PER_YEAR,
        )?;
        Ok(Self { config })
    }

    pub fn from_config(config: RateModelConfig) -> Self {
        Self { config }
    }

    /// Per-block borrow rate at a given utilization
    pub fn borrow_rate_at(&self, utilization: U256) -> Result<U256, RateModelError> {
        self.config
            .borrow_rate_with_multiplier(utilization, self.config.multiplier_per_block)
    }

    /// Per-block borrow rate for the given market balances
    pub fn borrow_rate(&self, cash: U256, borrows: U256, reserves: U256) -> Result<U256, RateModelError> {
        self.borrow_rate_at(utilization_rate(cash, borrows, reserves)?)
    }

    /// Per-block supply rate for the given market balances
    pub fn supply_rate(
        &self,
        cash: U256,
        borrows: U256,
        reserves: U256,
        reserve_factor: U256,
    ) -> Result<U256, RateModelError> {
        let utilization = utilization_rate(cash, borrows, reserves)?;
        let borrow_rate = self.borrow_rate_at(utilization)?;
        derive_supply_rate(utilization, borrow_rate, reserve_factor)
    }
}
