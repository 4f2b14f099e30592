//! The closed set of rate models a ledger can install.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::RateModelError;
use crate::jump::JumpRateModel;
use crate::reactive::{AccrualContext, ReactiveJumpRateModel};
use crate::white_paper::WhitePaperRateModel;

/// Model variant tag, as used in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    WhitePaper,
    JumpRate,
    ReactiveJumpRate,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhitePaper => "white-paper",
            Self::JumpRate => "jump-rate",
            Self::ReactiveJumpRate => "reactive-jump-rate",
        }
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "white-paper" | "whitepaper" | "linear" => Ok(Self::WhitePaper),
            "jump-rate" | "jump" => Ok(Self::JumpRate),
            "reactive-jump-rate" | "reactive" => Ok(Self::ReactiveJumpRate),
            _ => Err(format!("Unknown model kind: {}", s)),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An installed interest rate model.
///
/// The variant is chosen at construction and never changes. Every method a
/// ledger needs is available on this type regardless of the variant; the
/// stateless variants treat the binding and checkpoint operations as no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateModel {
    WhitePaper(WhitePaperRateModel),
    Jump(JumpRateModel),
    ReactiveJump(ReactiveJumpRateModel),
}

impl RateModel {
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::WhitePaper(_) => ModelKind::WhitePaper,
            Self::Jump(_) => ModelKind::JumpRate,
            Self::ReactiveJump(_) => ModelKind::ReactiveJumpRate,
        }
    }

    /// Capability marker; every installable model answers `true`
    pub fn is_interest_rate_model(&self) -> bool {
        true
    }

    /// Read-only borrow rate per block. Never records a checkpoint.
    pub fn borrow_rate(&self, cash: U256, borrows: U256, reserves: U256) -> Result<U256, RateModelError> {
        match self {
            Self::WhitePaper(model) => model.borrow_rate(cash, borrows, reserves),
            Self::Jump(model) => model.borrow_rate(cash, borrows, reserves),
            Self::ReactiveJump(model) => model.borrow_rate(cash, borrows, reserves),
        }
    }

    /// Borrow rate per block for a ledger accrual.
    ///
    /// For the reactive variant this records a checkpoint and may adapt the
    /// multiplier, and it fails with [`RateModelError::Unauthorized`] when
    /// `ctx.caller` is not the bound ledger.
    pub fn accrue_borrow_rate(
        &mut self,
        ctx: AccrualContext,
        cash: U256,
        borrows: U256,
        reserves: U256,
    ) -> Result<U256, RateModelError> {
        match self {
            Self::WhitePaper(model) => model.borrow_rate(cash, borrows, reserves),
            Self::Jump(model) => model.borrow_rate(cash, borrows, reserves),
            Self::ReactiveJump(model) => model.accrue_borrow_rate(ctx, cash, borrows, reserves),
        }
    }

    /// Supply rate per block
    pub fn supply_rate(
        &self,
        cash: U256,
        borrows: U256,
        reserves: U256,
        reserve_factor: U256,
    ) -> Result<U256, RateModelError> {
        match self {
            Self::WhitePaper(model) => model.supply_rate(cash, borrows, reserves, reserve_factor),
            Self::Jump(model) => model.supply_rate(cash, borrows, reserves, reserve_factor),
            Self::ReactiveJump(model) => model.supply_rate(cash, borrows, reserves, reserve_factor),
        }
    }

    /// Binds the model to `ledger` on installation.
    pub fn bind(&mut self, ledger: Address) -> Result<(), RateModelError> {
        match self {
            Self::WhitePaper(_) | Self::Jump(_) => Ok(()),
            Self::ReactiveJump(model) => model.bind(ledger),
        }
    }

    /// Reset hook invoked by `caller` when it replaces this model.
    pub fn reset_interest_checkpoints(&mut self, caller: Address) -> Result<(), RateModelError> {
        match self {
            Self::WhitePaper(_) | Self::Jump(_) => Ok(()),
            Self::ReactiveJump(model) => model.reset_interest_checkpoints(caller),
        }
    }

    /// Number of recorded checkpoints; `None` for stateless variants.
    pub fn interest_checkpoint_count(&self) -> Option<usize> {
        match self {
            Self::WhitePaper(_) | Self::Jump(_) => None,
            Self::ReactiveJump(model) => Some(model.interest_checkpoint_count()),
        }
    }

    /// Current below-kink multiplier per block
    pub fn multiplier_per_block(&self) -> U256 {
        match self {
            Self::WhitePaper(model) => model.multiplier_per_block,
            Self::Jump(model) => model.config.multiplier_per_block,
            Self::ReactiveJump(model) => model.multiplier_per_block(),
        }
    }

    pub fn base_rate_per_block(&self) -> U256 {
        match self {
            Self::WhitePaper(model) => model.base_rate_per_block,
            Self::Jump(model) => model.config.base_rate_per_block,
            Self::ReactiveJump(model) => model.base_rate_per_block(),
        }
    }

    /// Kink of the curve, `None` for the linear model.
    pub fn kink(&self) -> Option<U256> {
        match self {
            Self::WhitePaper(_) => None,
            Self::Jump(model) => Some(model.config.kink),
            Self::ReactiveJump(model) => Some(model.config().kink),
        }
    }
}

impl From<WhitePaperRateModel> for RateModel {
    fn from(model: WhitePaperRateModel) -> Self {
        Self::WhitePaper(model)
    }
}

impl From<JumpRateModel> for RateModel {
    fn from(model: JumpRateModel) -> Self {
        Self::Jump(model)
    }
}

impl From<ReactiveJumpRateModel> for RateModel {
    fn from(model: ReactiveJumpRateModel) -> Self {
        Self::ReactiveJump(model)
    }
}
