//! Command implementations.

pub mod curve;
pub mod rates;
pub mod simulate;

pub use curve::run_curve;
pub use rates::run_rates;
pub use simulate::run_simulate;

use anyhow::Result;
use lendrate_config::{MarketSpec, RateModelSpec};
use rust_decimal::Decimal;

use crate::cli::MarketArgs;

/// Combines market flags with a resolved model spec.
pub(crate) fn market_spec(args: &MarketArgs, model: RateModelSpec) -> MarketSpec {
    MarketSpec {
        reserve_factor: args.reserve_factor,
        cash: args.cash,
        borrows: args.borrows,
        reserves: args.reserves,
        model,
    }
}

/// Percent step from the CLI as a utilization fraction.
pub(crate) fn percent_to_fraction(percent: Decimal) -> Result<Decimal> {
    if percent <= Decimal::ZERO {
        anyhow::bail!("Step must be greater than zero, got {}", percent);
    }
    Ok(percent / Decimal::ONE_HUNDRED)
}
