//! Point-in-time rate command.

use alloy_primitives::Address;
use anyhow::Result;
use lendrate_model::math::rate_to_apr;

use crate::cli::{OutputFormat, RatesArgs};
use crate::commands::market_spec;
use crate::output::{format_rates_detail, RatesReport};

pub fn run_rates(args: &RatesArgs, format: OutputFormat) -> Result<()> {
    let model_spec = args.model.spec()?;
    let blocks_per_year = model_spec.blocks_per_year;
    let market = market_spec(&args.market, model_spec).build_market(Address::ZERO, 0)?;

    let borrow_rate = market.borrow_rate_per_block()?;
    let supply_rate = market.supply_rate_per_block()?;
    let model = market.model();

    let report = RatesReport {
        kind: model.kind(),
        utilization: market.utilization()?,
        borrow_rate_per_block: borrow_rate,
        supply_rate_per_block: supply_rate,
        borrow_apr: rate_to_apr(borrow_rate, blocks_per_year),
        supply_apr: rate_to_apr(supply_rate, blocks_per_year),
        kink: model.kink(),
    };

    match format {
        OutputFormat::Table => {
            println!("{}", format_rates_detail(&report));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
    }

    Ok(())
}
