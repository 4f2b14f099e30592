//! Supply rate derivation shared by every model variant.

use alloy_primitives::U256;

use crate::error::RateModelError;
use crate::math::{mul_fixed, sub, WAD};

/// Derives the per-block supply rate from a borrow rate.
///
/// ```text
/// supply_rate = utilization * (borrow_rate * (1 - reserve_factor))
/// ```
///
/// `reserve_factor` is expected in `[0, WAD]`; a larger value fails on the
/// `1 - reserve_factor` subtraction.
pub fn derive_supply_rate(
    utilization: U256,
    borrow_rate: U256,
    reserve_factor: U256,
) -> Result<U256, RateModelError> {
    let one_minus_reserve_factor = sub(WAD, reserve_factor)?;
    let rate_to_pool = mul_fixed(borrow_rate, one_minus_reserve_factor)?;
    mul_fixed(utilization, rate_to_pool)
}
