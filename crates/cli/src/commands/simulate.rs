//! Accrual simulation command.

use alloy_primitives::{address, Address};
use anyhow::{Context, Result};
use lendrate_model::math::{rate_to_apr, wad_to_f64};
use tracing::debug;

use crate::cli::{OutputFormat, SimulateArgs};
use crate::commands::market_spec;
use crate::output::{format_simulation_table, SimulationStep};

/// Identity the simulated market binds its model to.
const SIMULATED_MARKET: Address = address!("0x00000000000000000000000000000000000000aa");

pub fn run_simulate(args: &SimulateArgs, format: OutputFormat) -> Result<()> {
    if args.blocks == 0 {
        anyhow::bail!("--blocks must be at least 1");
    }

    let model_spec = args.model.spec()?;
    let blocks_per_year = model_spec.blocks_per_year;
    let mut market = market_spec(&args.market, model_spec).build_market(SIMULATED_MARKET, 0)?;

    let mut steps = Vec::with_capacity(args.accruals as usize);
    for step in 1..=args.accruals {
        let block_number = u64::from(step)
            .checked_mul(args.blocks)
            .context("Block number overflow")?;
        let outcome = market
            .accrue_interest(block_number)
            .with_context(|| format!("Accrual {} at block {} failed", step, block_number))?;
        debug!(step, block_number, "accrued");

        let model = market.model();
        steps.push(SimulationStep {
            step,
            block_number,
            borrow_apr: rate_to_apr(outcome.borrow_rate, blocks_per_year),
            multiplier_apr: rate_to_apr(model.multiplier_per_block(), blocks_per_year),
            checkpoints: model.interest_checkpoint_count(),
            borrow_index: wad_to_f64(outcome.borrow_index),
            total_borrows: wad_to_f64(market.total_borrows),
            total_reserves: wad_to_f64(market.total_reserves),
        });
    }

    match format {
        OutputFormat::Table => {
            println!("{}", format_simulation_table(&steps));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&steps)?;
            println!("{}", json);
        }
    }

    Ok(())
}
