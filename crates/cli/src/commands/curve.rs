//! Rate curve command.

use alloy_primitives::U256;
use anyhow::Result;
use lendrate_config::wad::{decimal_to_wad, reserve_factor_to_wad};
use lendrate_model::math::rate_to_apr;
use lendrate_model::WAD;

use crate::cli::{CurveArgs, OutputFormat};
use crate::commands::percent_to_fraction;
use crate::output::{format_curve_table, CurvePoint};

/// Utilization points from 0 to 100% inclusive, `step` apart.
///
/// 100% is always the last point, even when `step` does not divide it.
fn utilization_points(step: U256) -> Vec<U256> {
    let mut points = Vec::new();
    let mut utilization = U256::ZERO;
    while utilization < WAD {
        points.push(utilization);
        utilization += step;
    }
    points.push(WAD);
    points
}

pub fn run_curve(args: &CurveArgs, format: OutputFormat) -> Result<()> {
    let spec = args.model.spec()?;
    let model = spec.build()?;
    let step = decimal_to_wad("step", percent_to_fraction(args.step)?)?;
    if step.is_zero() {
        anyhow::bail!("Step {} is below the 18-decimal resolution", args.step);
    }
    let reserve_factor = reserve_factor_to_wad(args.reserve_factor)?;
    let kink = model.kink();

    let mut points = Vec::new();
    for utilization in utilization_points(step) {
        // cash + borrows = 1 so the model observes exactly `utilization`
        let cash = WAD - utilization;
        let borrow_rate = model.borrow_rate(cash, utilization, U256::ZERO)?;
        let supply_rate = model.supply_rate(cash, utilization, U256::ZERO, reserve_factor)?;

        points.push(CurvePoint {
            utilization,
            borrow_apr: rate_to_apr(borrow_rate, spec.blocks_per_year),
            supply_apr: rate_to_apr(supply_rate, spec.blocks_per_year),
            above_kink: kink.is_some_and(|k| utilization > k),
        });
    }

    match format {
        OutputFormat::Table => {
            println!("{}", format_curve_table(&points));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&points)?;
            println!("{}", json);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(p: u64) -> U256 {
        U256::from(p) * WAD / U256::from(100)
    }

    #[test]
    fn test_points_even_step() {
        assert_eq!(utilization_points(pct(50)), vec![U256::ZERO, pct(50), WAD]);
    }

    #[test]
    fn test_points_uneven_step_ends_at_full() {
        assert_eq!(
            utilization_points(pct(30)),
            vec![U256::ZERO, pct(30), pct(60), pct(90), WAD]
        );
    }

    #[test]
    fn test_points_step_above_full() {
        assert_eq!(utilization_points(pct(150)), vec![U256::ZERO, WAD]);
    }
}
