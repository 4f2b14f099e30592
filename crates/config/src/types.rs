//! Configuration types.
//!
//! Rates are given per year as decimals (e.g. `0.05` = 5%) and converted to
//! the per-block WAD values the models work with.

use std::path::Path;

use alloy_primitives::{Address, U256};
use lendrate_model::{
    JumpRateModel, Market, ModelKind, RateModel, RateModelConfig, ReactiveJumpRateModel,
    ReactivePolicy, UtilizationSnapshot, WhitePaperRateModel, BLOCKS_PER_YEAR,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::wad::{decimal_to_wad, reserve_factor_to_wad};

fn default_blocks_per_year() -> u64 {
    BLOCKS_PER_YEAR
}

/// Tuning for the reactive model; omitted fields use the model defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactiveSpec {
    /// Fraction of the rate deviation applied per accrual (e.g. 0.5).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<Decimal>,
    /// Annualized cap for the adapted multiplier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_multiplier: Option<Decimal>,
}

/// Annualized description of a rate model.
///
/// ```json
/// {
///   "kind": "jump-rate",
///   "base_rate": "0.02",
///   "multiplier": "0.2",
///   "jump_multiplier": "3",
///   "kink": "0.8"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateModelSpec {
    pub kind: ModelKind,
    /// Borrow rate per year at zero utilization.
    pub base_rate: Decimal,
    /// Slope per year below the kink.
    pub multiplier: Decimal,
    /// Slope per year above the kink.
    #[serde(default)]
    pub jump_multiplier: Decimal,
    /// Utilization threshold (0.0 to 1.0, may exceed 1.0).
    #[serde(default)]
    pub kink: Decimal,
    #[serde(default = "default_blocks_per_year")]
    pub blocks_per_year: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactive: Option<ReactiveSpec>,
}

impl RateModelSpec {
    /// Parses a rate model description from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a rate model description from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded rate model");
        Self::from_json(&contents)
    }

    /// Per-block curve parameters.
    pub fn rate_config(&self) -> Result<RateModelConfig> {
        if self.blocks_per_year == 0 {
            return Err(ConfigError::InvalidBlocksPerYear);
        }

        Ok(RateModelConfig::from_annual(
            decimal_to_wad("base_rate", self.base_rate)?,
            decimal_to_wad("multiplier", self.multiplier)?,
            decimal_to_wad("jump_multiplier", self.jump_multiplier)?,
            decimal_to_wad("kink", self.kink)?,
            self.blocks_per_year,
        )?)
    }

    /// Builds the described model.
    pub fn build(&self) -> Result<RateModel> {
        let config = self.rate_config()?;

        let model = match self.kind {
            ModelKind::WhitePaper => RateModel::WhitePaper(WhitePaperRateModel::from_per_block(
                config.base_rate_per_block,
                config.multiplier_per_block,
            )),
            ModelKind::JumpRate => RateModel::Jump(JumpRateModel::from_config(config)),
            ModelKind::ReactiveJumpRate => {
                let policy = self.reactive_policy(&config)?;
                RateModel::ReactiveJump(ReactiveJumpRateModel::new(config, policy))
            }
        };

        debug!(kind = %self.kind, "built rate model");
        Ok(model)
    }

    fn reactive_policy(&self, config: &RateModelConfig) -> Result<ReactivePolicy> {
        let mut policy = ReactivePolicy::for_config(config);
        let Some(spec) = &self.reactive else {
            return Ok(policy);
        };

        if let Some(sensitivity) = spec.sensitivity {
            policy = policy.with_sensitivity(decimal_to_wad("sensitivity", sensitivity)?);
        }
        if let Some(max_multiplier) = spec.max_multiplier {
            let per_year = decimal_to_wad("max_multiplier", max_multiplier)?;
            policy = policy
                .with_max_multiplier_per_block(per_year / U256::from(self.blocks_per_year));
        }
        Ok(policy)
    }
}

/// A market's balances and model, in whole token units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSpec {
    /// Share of interest kept as reserves (0.0 to 1.0).
    pub reserve_factor: Decimal,
    pub cash: Decimal,
    pub borrows: Decimal,
    #[serde(default)]
    pub reserves: Decimal,
    pub model: RateModelSpec,
}

impl MarketSpec {
    /// Parses a market description from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a market description from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Reserve factor as a WAD fraction.
    pub fn reserve_factor_wad(&self) -> Result<U256> {
        reserve_factor_to_wad(self.reserve_factor)
    }

    /// Balances scaled to 18 decimals.
    pub fn snapshot(&self) -> Result<UtilizationSnapshot> {
        Ok(UtilizationSnapshot::new(
            decimal_to_wad("cash", self.cash)?,
            decimal_to_wad("borrows", self.borrows)?,
            decimal_to_wad("reserves", self.reserves)?,
        ))
    }

    /// Builds a [`Market`] with these balances and the configured model bound to `id`.
    pub fn build_market(&self, id: Address, block_number: u64) -> Result<Market> {
        let snapshot = self.snapshot()?;
        Ok(Market::with_balances(
            id,
            self.model.build()?,
            self.reserve_factor_wad()?,
            block_number,
            snapshot.cash,
            snapshot.borrows,
            snapshot.reserves,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lendrate_model::WAD;
    use rust_decimal_macros::dec;

    fn jump_spec() -> RateModelSpec {
        RateModelSpec {
            kind: ModelKind::JumpRate,
            base_rate: dec!(0.1),
            multiplier: dec!(0.2),
            jump_multiplier: dec!(1),
            kink: dec!(0.9),
            blocks_per_year: BLOCKS_PER_YEAR,
            reactive: None,
        }
    }

    #[test]
    fn test_parse_minimal_json() {
        let spec = RateModelSpec::from_json(
            r#"{"kind": "white-paper", "base_rate": "0.025", "multiplier": "0.2"}"#,
        )
        .unwrap();

        assert_eq!(spec.kind, ModelKind::WhitePaper);
        assert_eq!(spec.base_rate, dec!(0.025));
        assert_eq!(spec.jump_multiplier, Decimal::ZERO);
        assert_eq!(spec.kink, Decimal::ZERO);
        assert_eq!(spec.blocks_per_year, BLOCKS_PER_YEAR);
        assert!(spec.reactive.is_none());
    }

    #[test]
    fn test_parse_unknown_kind() {
        let result = RateModelSpec::from_json(
            r#"{"kind": "harnessed", "base_rate": "0", "multiplier": "0"}"#,
        );
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_rate_config_per_block() {
        let config = jump_spec().rate_config().unwrap();
        assert_eq!(config.base_rate_per_block, U256::from(47_564_687_975u64));
        assert_eq!(config.kink, U256::from(900_000_000_000_000_000u64));
    }

    #[test]
    fn test_build_each_kind() {
        let mut spec = jump_spec();
        assert_eq!(spec.build().unwrap().kind(), ModelKind::JumpRate);

        spec.kind = ModelKind::WhitePaper;
        assert_eq!(spec.build().unwrap().kind(), ModelKind::WhitePaper);

        spec.kind = ModelKind::ReactiveJumpRate;
        let model = spec.build().unwrap();
        assert_eq!(model.kind(), ModelKind::ReactiveJumpRate);
        assert_eq!(model.interest_checkpoint_count(), Some(0));
    }

    #[test]
    fn test_reactive_overrides() {
        let mut spec = jump_spec();
        spec.kind = ModelKind::ReactiveJumpRate;
        spec.reactive = Some(ReactiveSpec {
            sensitivity: Some(dec!(0.25)),
            max_multiplier: Some(dec!(2)),
        });

        let config = spec.rate_config().unwrap();
        let policy = spec.reactive_policy(&config).unwrap();
        assert_eq!(policy.sensitivity, WAD / U256::from(4));
        assert_eq!(
            policy.max_multiplier_per_block,
            U256::from(2) * WAD / U256::from(BLOCKS_PER_YEAR)
        );
    }

    #[test]
    fn test_zero_blocks_per_year() {
        let mut spec = jump_spec();
        spec.blocks_per_year = 0;
        assert!(matches!(spec.build(), Err(ConfigError::InvalidBlocksPerYear)));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut spec = jump_spec();
        spec.base_rate = dec!(-0.1);
        assert!(matches!(
            spec.build(),
            Err(ConfigError::NegativeValue { field: "base_rate", .. })
        ));
    }

    #[test]
    fn test_market_spec() {
        let json = r#"{
            "reserve_factor": "0.1",
            "cash": "690",
            "borrows": "310",
            "model": {"kind": "jump-rate", "base_rate": "0.1", "multiplier": "0.2", "jump_multiplier": "1", "kink": "0.9"}
        }"#;
        let spec = MarketSpec::from_json(json).unwrap();
        assert_eq!(spec.reserves, Decimal::ZERO);

        let market = spec.build_market(Address::ZERO, 0).unwrap();
        assert_eq!(market.cash, U256::from(690) * WAD);
        assert_eq!(
            market.utilization().unwrap(),
            U256::from(310_000_000_000_000_000u64)
        );
        assert_eq!(market.reserve_factor, WAD / U256::from(10));
    }

    #[test]
    fn test_reserve_factor_out_of_range() {
        let spec = MarketSpec {
            reserve_factor: dec!(1.5),
            cash: dec!(1),
            borrows: dec!(1),
            reserves: Decimal::ZERO,
            model: jump_spec(),
        };
        assert!(matches!(
            spec.reserve_factor_wad(),
            Err(ConfigError::ReserveFactorOutOfRange(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = RateModelSpec::load("/nonexistent/lendrate-model.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
