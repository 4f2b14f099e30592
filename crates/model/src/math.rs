//! Fixed-point arithmetic on 1e18-scaled `U256` values.
//!
//! Every operation is checked: a result that does not fit in 256 bits is an
//! [`RateModelError::ArithmeticOverflow`] naming the failing operation, and a
//! zero divisor is a [`RateModelError::DivisionByZero`]. Divisions truncate
//! toward zero.

use std::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::RateModelError;

/// WAD (1e18) - the fixed-point scale used for all rates and fractions
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Blocks per year assuming ~15 second blocks
pub const BLOCKS_PER_YEAR: u64 = 2_102_400;

/// The arithmetic step that produced an overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathOperation {
    Addition,
    Subtraction,
    Multiplication,
}

impl fmt::Display for MathOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
            Self::Multiplication => "multiplication",
        };
        f.write_str(name)
    }
}

/// Checked `a + b`.
pub fn add(a: U256, b: U256) -> Result<U256, RateModelError> {
    a.checked_add(b).ok_or(RateModelError::ArithmeticOverflow {
        operation: MathOperation::Addition,
    })
}

/// Checked `a - b`. Going below zero is an overflow of the unsigned range.
pub fn sub(a: U256, b: U256) -> Result<U256, RateModelError> {
    a.checked_sub(b).ok_or(RateModelError::ArithmeticOverflow {
        operation: MathOperation::Subtraction,
    })
}

/// Checked `a * b`.
pub fn mul(a: U256, b: U256) -> Result<U256, RateModelError> {
    a.checked_mul(b).ok_or(RateModelError::ArithmeticOverflow {
        operation: MathOperation::Multiplication,
    })
}

/// Checked `a / b`, rounded down.
pub fn div(a: U256, b: U256) -> Result<U256, RateModelError> {
    if b.is_zero() {
        return Err(RateModelError::DivisionByZero);
    }
    Ok(a / b)
}

/// `(a * b) / WAD` rounded down.
///
/// The intermediate product must fit in 256 bits; there is no wide
/// multiplication fallback.
pub fn mul_fixed(a: U256, b: U256) -> Result<U256, RateModelError> {
    div(mul(a, b)?, WAD)
}

/// `(a * WAD) / b` rounded down.
pub fn div_fixed(a: U256, b: U256) -> Result<U256, RateModelError> {
    div(mul(a, WAD)?, b)
}

/// Converts an annualized WAD value into a per-block value (floor division).
pub fn per_block(annual: U256, blocks_per_year: u64) -> Result<U256, RateModelError> {
    div(annual, U256::from(blocks_per_year))
}

/// Returns the minimum of two values
pub fn min(a: U256, b: U256) -> U256 {
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the maximum of two values
pub fn max(a: U256, b: U256) -> U256 {
    if a > b {
        a
    } else {
        b
    }
}

/// Converts a WAD-scaled value to f64 (lossy, for display only)
pub fn wad_to_f64(value: U256) -> f64 {
    let whole = value / WAD;
    let frac = value % WAD;
    whole.saturating_to::<u128>() as f64 + frac.saturating_to::<u128>() as f64 / 1e18
}

/// Converts a per-block rate to a simple annual rate (APR), as f64.
pub fn rate_to_apr(rate_per_block: U256, blocks_per_year: u64) -> f64 {
    wad_to_f64(rate_per_block) * blocks_per_year as f64
}
