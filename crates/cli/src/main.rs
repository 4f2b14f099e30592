//! lendrate CLI - Inspect and simulate interest rate models.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{run_curve, run_rates, run_simulate};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Rates(args) => run_rates(&args, cli.format)?,
        Commands::Curve(args) => run_curve(&args, cli.format)?,
        Commands::Simulate(args) => run_simulate(&args, cli.format)?,
    }

    Ok(())
}
