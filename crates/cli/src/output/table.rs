//! Table formatting for curves and simulations.

use alloy_primitives::U256;
use lendrate_model::math::wad_to_f64;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

/// One utilization point on a rate curve.
#[derive(Debug, Serialize)]
pub struct CurvePoint {
    pub utilization: U256,
    pub borrow_apr: f64,
    pub supply_apr: f64,
    pub above_kink: bool,
}

/// State after one simulated accrual.
#[derive(Debug, Serialize)]
pub struct SimulationStep {
    pub step: u32,
    pub block_number: u64,
    pub borrow_apr: f64,
    pub multiplier_apr: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpoints: Option<usize>,
    pub borrow_index: f64,
    pub total_borrows: f64,
    pub total_reserves: f64,
}

#[derive(Tabled)]
struct CurveRow {
    #[tabled(rename = "Utilization")]
    utilization: String,
    #[tabled(rename = "Borrow APR")]
    borrow_apr: String,
    #[tabled(rename = "Supply APR")]
    supply_apr: String,
    #[tabled(rename = "Regime")]
    regime: String,
}

#[derive(Tabled)]
struct SimulationRow {
    #[tabled(rename = "Step")]
    step: u32,
    #[tabled(rename = "Block")]
    block_number: u64,
    #[tabled(rename = "Borrow APR")]
    borrow_apr: String,
    #[tabled(rename = "Multiplier")]
    multiplier_apr: String,
    #[tabled(rename = "Checkpoints")]
    checkpoints: String,
    #[tabled(rename = "Borrow Index")]
    borrow_index: String,
    #[tabled(rename = "Total Borrows")]
    total_borrows: String,
}

fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
        .to_string()
}

pub fn format_curve_table(points: &[CurvePoint]) -> String {
    if points.is_empty() {
        return "No curve points.".to_string();
    }

    let rows: Vec<CurveRow> = points
        .iter()
        .map(|p| CurveRow {
            utilization: format_percent(wad_to_f64(p.utilization)),
            borrow_apr: format_percent(p.borrow_apr),
            supply_apr: format_percent(p.supply_apr),
            regime: if p.above_kink { "jump" } else { "normal" }.to_string(),
        })
        .collect();

    render(rows)
}

pub fn format_simulation_table(steps: &[SimulationStep]) -> String {
    if steps.is_empty() {
        return "No accruals run.".to_string();
    }

    let rows: Vec<SimulationRow> = steps
        .iter()
        .map(|s| SimulationRow {
            step: s.step,
            block_number: s.block_number,
            borrow_apr: format_percent(s.borrow_apr),
            multiplier_apr: format_percent(s.multiplier_apr),
            checkpoints: s
                .checkpoints
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            borrow_index: format!("{:.10}", s.borrow_index),
            total_borrows: format!("{:.4}", s.total_borrows),
        })
        .collect();

    render(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lendrate_model::WAD;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.05), "5.00%");
        assert_eq!(format_percent(1.2345), "123.45%");
    }

    #[test]
    fn test_empty_tables() {
        assert_eq!(format_curve_table(&[]), "No curve points.");
        assert_eq!(format_simulation_table(&[]), "No accruals run.");
    }

    #[test]
    fn test_curve_table_regime() {
        let points = [
            CurvePoint {
                utilization: WAD / U256::from(2),
                borrow_apr: 0.1,
                supply_apr: 0.05,
                above_kink: false,
            },
            CurvePoint {
                utilization: WAD,
                borrow_apr: 0.9,
                supply_apr: 0.8,
                above_kink: true,
            },
        ];
        let table = format_curve_table(&points);
        assert!(table.contains("Utilization"));
        assert!(table.contains("50.00%"));
        assert!(table.contains("normal"));
        assert!(table.contains("jump"));
    }

    #[test]
    fn test_simulation_table_without_checkpoints() {
        let steps = [SimulationStep {
            step: 1,
            block_number: 10,
            borrow_apr: 0.1,
            multiplier_apr: 0.2,
            checkpoints: None,
            borrow_index: 1.0,
            total_borrows: 310.0,
            total_reserves: 0.0,
        }];
        let table = format_simulation_table(&steps);
        assert!(table.contains("Checkpoints"));
        assert!(table.contains("310.0000"));
    }
}
