//! Detailed output for a single market's rates.

use alloy_primitives::U256;
use colored::Colorize;
use lendrate_model::math::wad_to_f64;
use lendrate_model::ModelKind;
use serde::Serialize;

/// Rates for one market snapshot.
#[derive(Debug, Serialize)]
pub struct RatesReport {
    pub kind: ModelKind,
    pub utilization: U256,
    pub borrow_rate_per_block: U256,
    pub supply_rate_per_block: U256,
    pub borrow_apr: f64,
    pub supply_apr: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kink: Option<U256>,
}

fn format_percent(value: f64) -> String {
    format!("{:.4}%", value * 100.0)
}

pub fn format_rates_detail(report: &RatesReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", "=".repeat(60)));
    output.push_str(&format!("{}\n", report.kind.as_str().bold()));
    output.push_str(&format!("{}\n\n", "=".repeat(60)));

    output.push_str(&format!("{}\n", "Market".cyan().bold()));
    let utilization = wad_to_f64(report.utilization);
    let utilization = match report.kink {
        Some(kink) if report.utilization > kink => {
            format!("{} (above kink)", format_percent(utilization)).yellow().to_string()
        }
        _ => format_percent(utilization),
    };
    output.push_str(&format!("  Utilization: {}\n", utilization));
    if let Some(kink) = report.kink {
        output.push_str(&format!("  Kink:        {}\n", format_percent(wad_to_f64(kink))));
    }
    output.push('\n');

    output.push_str(&format!("{}\n", "Rates".cyan().bold()));
    output.push_str(&format!(
        "  Borrow:      {} APR ({} per block)\n",
        format_percent(report.borrow_apr).green(),
        report.borrow_rate_per_block
    ));
    output.push_str(&format!(
        "  Supply:      {} APR ({} per block)\n",
        format_percent(report.supply_apr).green(),
        report.supply_rate_per_block
    ));

    output
}
