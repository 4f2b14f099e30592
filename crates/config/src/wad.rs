//! Exact conversion from decimals to 1e18 fixed point.

use alloy_primitives::U256;
use rust_decimal::Decimal;

use crate::error::{ConfigError, Result};

const WAD_DECIMALS: u32 = 18;

/// Converts a non-negative decimal to a WAD-scaled integer.
///
/// Digits beyond the 18th fractional place are truncated toward zero.
pub fn decimal_to_wad(field: &'static str, value: Decimal) -> Result<U256> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ConfigError::NegativeValue { field, value });
    }

    let truncated = value.trunc_with_scale(WAD_DECIMALS);
    let mantissa = truncated.mantissa().unsigned_abs();
    let exponent = WAD_DECIMALS - truncated.scale();

    // |mantissa| < 2^96, so scaling by at most 1e18 stays far below 2^256
    Ok(U256::from(mantissa) * U256::from(10u64).pow(U256::from(exponent)))
}

/// Converts a reserve factor, which must lie between 0 and 1, to WAD.
pub fn reserve_factor_to_wad(value: Decimal) -> Result<U256> {
    if value > Decimal::ONE {
        return Err(ConfigError::ReserveFactorOutOfRange(value));
    }
    decimal_to_wad("reserve_factor", value)
}
