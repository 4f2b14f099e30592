//! Output formatting for CLI results.

pub mod detail;
pub mod table;

pub use detail::{format_rates_detail, RatesReport};
pub use table::{format_curve_table, format_simulation_table, CurvePoint, SimulationStep};
