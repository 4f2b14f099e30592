//! Market utilization.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::RateModelError;
use crate::math::{add, div, mul, sub, WAD};

/// Market balances observed at the moment a rate is computed.
///
/// All amounts are in the asset's native fixed-point unit. Callers are
/// expected to keep `cash + borrows >= reserves`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UtilizationSnapshot {
    pub cash: U256,
    pub borrows: U256,
    pub reserves: U256,
}

impl UtilizationSnapshot {
    pub fn new(cash: U256, borrows: U256, reserves: U256) -> Self {
        Self {
            cash,
            borrows,
            reserves,
        }
    }

    /// Utilization of this snapshot (WAD-scaled)
    pub fn utilization(&self) -> Result<U256, RateModelError> {
        utilization_rate(self.cash, self.borrows, self.reserves)
    }
}

/// Calculates the utilization rate of a market (WAD-scaled).
///
/// ```text
/// utilization = borrows * 1e18 / (cash + borrows - reserves)
/// ```
///
/// An idle market (`borrows == 0`) has zero utilization without touching the
/// denominator. The denominator is evaluated first, so an overflowing
/// `cash + borrows` surfaces as an addition overflow even when the numerator
/// would overflow too.
pub fn utilization_rate(cash: U256, borrows: U256, reserves: U256) -> Result<U256, RateModelError> {
    if borrows.is_zero() {
        return Ok(U256::ZERO);
    }

    let liquidity = sub(add(cash, borrows)?, reserves)?;
    div(mul(borrows, WAD)?, liquidity)
}
