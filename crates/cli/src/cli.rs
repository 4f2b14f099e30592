//! CLI argument definitions using clap.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use lendrate_config::{RateModelSpec, ReactiveSpec};
use lendrate_model::{ModelKind, BLOCKS_PER_YEAR};
use rust_decimal::Decimal;

/// lendrate CLI - Inspect and simulate interest rate models
#[derive(Parser, Debug)]
#[command(name = "lendrate")]
#[command(about = "CLI tool for inspecting lending interest rate models", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show utilization, borrow and supply rates for a market
    Rates(RatesArgs),
    /// Print the borrow and supply curve across utilization
    Curve(CurveArgs),
    /// Run repeated accruals against a market and show how the model evolves
    Simulate(SimulateArgs),
}

/// Rate model selection, either from a JSON file or from flags.
#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Path to a JSON rate model file (overrides the model flags)
    #[arg(long, env = "LENDRATE_MODEL")]
    pub model: Option<PathBuf>,

    /// Model kind (white-paper, jump-rate, reactive-jump-rate)
    #[arg(long, env = "LENDRATE_KIND", default_value = "jump-rate")]
    pub kind: ModelKind,

    /// Base borrow rate per year (e.g., 0.02 for 2%)
    #[arg(long = "base", env = "LENDRATE_BASE_RATE", default_value = "0")]
    pub base_rate: Decimal,

    /// Slope per year below the kink
    #[arg(long, env = "LENDRATE_MULTIPLIER", default_value = "0")]
    pub multiplier: Decimal,

    /// Slope per year above the kink
    #[arg(long = "jump", env = "LENDRATE_JUMP_MULTIPLIER", default_value = "0")]
    pub jump_multiplier: Decimal,

    /// Utilization where the jump slope starts (e.g., 0.8)
    #[arg(long, env = "LENDRATE_KINK", default_value = "0")]
    pub kink: Decimal,

    /// Blocks per year used to derive per-block rates
    #[arg(long, env = "LENDRATE_BLOCKS_PER_YEAR", default_value_t = BLOCKS_PER_YEAR)]
    pub blocks_per_year: u64,

    /// Reactive model: fraction of the rate deviation applied per accrual
    #[arg(long)]
    pub sensitivity: Option<Decimal>,

    /// Reactive model: cap for the adapted multiplier, per year
    #[arg(long)]
    pub max_multiplier: Option<Decimal>,
}

impl ModelArgs {
    /// Resolves the rate model from the file or the flags.
    pub fn spec(&self) -> Result<RateModelSpec> {
        if let Some(path) = &self.model {
            return RateModelSpec::load(path)
                .with_context(|| format!("Failed to load rate model from {}", path.display()));
        }

        let reactive = if self.sensitivity.is_some() || self.max_multiplier.is_some() {
            Some(ReactiveSpec {
                sensitivity: self.sensitivity,
                max_multiplier: self.max_multiplier,
            })
        } else {
            None
        };

        Ok(RateModelSpec {
            kind: self.kind,
            base_rate: self.base_rate,
            multiplier: self.multiplier,
            jump_multiplier: self.jump_multiplier,
            kink: self.kink,
            blocks_per_year: self.blocks_per_year,
            reactive,
        })
    }
}

/// Market balances in whole token units.
#[derive(Args, Debug)]
pub struct MarketArgs {
    /// Available cash in the market
    #[arg(long)]
    pub cash: Decimal,

    /// Outstanding borrows
    #[arg(long)]
    pub borrows: Decimal,

    /// Protocol reserves
    #[arg(long, default_value = "0")]
    pub reserves: Decimal,

    /// Share of interest kept as reserves (e.g., 0.1 for 10%)
    #[arg(long, default_value = "0")]
    pub reserve_factor: Decimal,
}

#[derive(Args, Debug)]
pub struct RatesArgs {
    #[command(flatten)]
    pub market: MarketArgs,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Args, Debug)]
pub struct CurveArgs {
    /// Utilization step in percent
    #[arg(long, default_value = "10")]
    pub step: Decimal,

    /// Share of interest kept as reserves (e.g., 0.1 for 10%)
    #[arg(long, default_value = "0")]
    pub reserve_factor: Decimal,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub market: MarketArgs,

    /// Blocks between accruals
    #[arg(long, default_value = "1")]
    pub blocks: u64,

    /// Number of accruals to run
    #[arg(long, default_value = "10")]
    pub accruals: u32,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
