//! Reactive jump rate model.
//!
//! A [`JumpRateModel`](crate::JumpRateModel) whose below-kink slope adapts to
//! the rates it observes. Every accrual made by the owning ledger records a
//! [`RateCheckpoint`] and recomputes the multiplier from the checkpoint window.
//!
//! # Multiplier Recomputation
//!
//! ```text
//! observed = utilization * borrow_rate            (recorded per accrual)
//! avg      = mean(observed over the window)
//! delta    = sensitivity * |avg - base_rate_per_block|
//!
//! avg <  base: multiplier = max(0, multiplier - delta)
//! avg >= base: multiplier = min(max_multiplier, multiplier + delta)
//! ```
//!
//! An idle market observes zero, so a sustained idle period walks the
//! multiplier down to zero. It never goes negative.
//!
//! # Binding
//!
//! ```text
//! Unbound --bind / first accrual--> Active(ledger)
//! Active(ledger) --reset_interest_checkpoints--> Superseded(ledger)
//! Superseded(ledger) --bind--> Active(ledger')
//! ```
//!
//! Only the active ledger may record checkpoints or reset them. A superseded
//! model still answers rate queries with its last multiplier.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::checkpoint::{CheckpointRing, RateCheckpoint};
use crate::error::RateModelError;
use crate::jump::RateModelConfig;
use crate::math::{add, max, min, mul_fixed, sub};
use crate::supply::derive_supply_rate;
use crate::utilization::utilization_rate;

/// Default sensitivity of the multiplier to the observed rate (0.5 in WAD)
pub const DEFAULT_SENSITIVITY: U256 = U256::from_limbs([500_000_000_000_000_000, 0, 0, 0]);

/// Which ledger, if any, the model currently serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Binding {
    /// Constructed, not yet used by any ledger
    Unbound,
    /// Installed on the given ledger
    Active(Address),
    /// Replaced on the given ledger; history has been cleared
    Superseded(Address),
}

/// Tuning of the multiplier adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactivePolicy {
    /// Fraction of the rate deviation applied per accrual (WAD-scaled)
    pub sensitivity: U256,
    /// Upper bound for the adapted multiplier (per block)
    pub max_multiplier_per_block: U256,
}

impl ReactivePolicy {
    /// Default policy for a curve: half the deviation per accrual, capped at
    /// the steeper of the two configured slopes.
    pub fn for_config(config: &RateModelConfig) -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
            max_multiplier_per_block: max(
                config.jump_multiplier_per_block,
                config.multiplier_per_block,
            ),
        }
    }

    pub fn with_sensitivity(mut self, sensitivity: U256) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_max_multiplier_per_block(mut self, max_multiplier_per_block: U256) -> Self {
        self.max_multiplier_per_block = max_multiplier_per_block;
        self
    }
}

/// Caller identity and block height of an accrual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualContext {
    pub caller: Address,
    pub block_number: u64,
}

impl AccrualContext {
    pub fn new(caller: Address, block_number: u64) -> Self {
        Self {
            caller,
            block_number,
        }
    }
}

/// Mutable part of a reactive model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactiveState {
    pub checkpoints: CheckpointRing,
    pub multiplier_per_block: U256,
}

/// Jump rate model with a history-driven multiplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactiveJumpRateModel {
    /// Curve parameters; `multiplier_per_block` here is the starting multiplier
    config: RateModelConfig,
    policy: ReactivePolicy,
    state: ReactiveState,
    binding: Binding,
}

impl ReactiveJumpRateModel {
    /// Creates an unbound model. The first ledger to accrue through it, or to
    /// call [`bind`](Self::bind), becomes its owner.
    pub fn new(config: RateModelConfig, policy: ReactivePolicy) -> Self {
        Self {
            config,
            policy,
            state: ReactiveState {
                checkpoints: CheckpointRing::new(),
                multiplier_per_block: config.multiplier_per_block,
            },
            binding: Binding::Unbound,
        }
    }

    /// Creates a model already bound to `ledger`.
    pub fn bound_to(config: RateModelConfig, policy: ReactivePolicy, ledger: Address) -> Self {
        let mut model = Self::new(config, policy);
        model.binding = Binding::Active(ledger);
        model
    }

    pub fn config(&self) -> &RateModelConfig {
        &self.config
    }

    pub fn policy(&self) -> &ReactivePolicy {
        &self.policy
    }

    pub fn binding(&self) -> Binding {
        self.binding
    }

    /// The ledger the model is active on
    pub fn owner(&self) -> Option<Address> {
        match self.binding {
            Binding::Active(ledger) => Some(ledger),
            Binding::Unbound | Binding::Superseded(_) => None,
        }
    }

    pub fn base_rate_per_block(&self) -> U256 {
        self.config.base_rate_per_block
    }

    /// Current (adapted) multiplier
    pub fn multiplier_per_block(&self) -> U256 {
        self.state.multiplier_per_block
    }

    pub fn interest_checkpoint_count(&self) -> usize {
        self.state.checkpoints.len()
    }

    /// Checkpoints from oldest to newest
    pub fn checkpoints(&self) -> impl Iterator<Item = &RateCheckpoint> + '_ {
        self.state.checkpoints.iter()
    }

    /// Borrow rate at `utilization` with the current multiplier.
    pub fn borrow_rate_at(&self, utilization: U256) -> Result<U256, RateModelError> {
        self.config
            .borrow_rate_with_multiplier(utilization, self.state.multiplier_per_block)
    }

    /// Read-only borrow rate query; records nothing.
    pub fn borrow_rate(&self, cash: U256, borrows: U256, reserves: U256) -> Result<U256, RateModelError> {
        self.borrow_rate_at(utilization_rate(cash, borrows, reserves)?)
    }

    pub fn supply_rate(
        &self,
        cash: U256,
        borrows: U256,
        reserves: U256,
        reserve_factor: U256,
    ) -> Result<U256, RateModelError> {
        let utilization = utilization_rate(cash, borrows, reserves)?;
        let borrow_rate = self.borrow_rate_at(utilization)?;
        derive_supply_rate(utilization, borrow_rate, reserve_factor)
    }

    /// Installs the model on `ledger`.
    ///
    /// A superseded model may be re-bound and starts from an empty history.
    /// A model active on a different ledger cannot be taken over.
    pub fn bind(&mut self, ledger: Address) -> Result<(), RateModelError> {
        match self.binding {
            Binding::Active(owner) if owner == ledger => Ok(()),
            Binding::Active(owner) => {
                warn!(%ledger, %owner, "rejected bind of a model active on another ledger");
                Err(RateModelError::Unauthorized {
                    caller: ledger,
                    owner: Some(owner),
                })
            }
            Binding::Unbound | Binding::Superseded(_) => {
                debug!(%ledger, "reactive rate model bound");
                self.binding = Binding::Active(ledger);
                Ok(())
            }
        }
    }

    /// Borrow rate for an accrual by `ctx.caller`.
    ///
    /// The rate is computed with the multiplier in effect before the call.
    /// Afterwards a checkpoint is recorded and the multiplier recomputed from
    /// the window. On error nothing changes.
    pub fn accrue_borrow_rate(
        &mut self,
        ctx: AccrualContext,
        cash: U256,
        borrows: U256,
        reserves: U256,
    ) -> Result<U256, RateModelError> {
        let binding = match self.binding {
            Binding::Unbound => Binding::Active(ctx.caller),
            Binding::Active(owner) if owner == ctx.caller => self.binding,
            Binding::Active(owner) | Binding::Superseded(owner) => {
                warn!(caller = %ctx.caller, %owner, "rejected accrual from non-owner");
                return Err(RateModelError::Unauthorized {
                    caller: ctx.caller,
                    owner: self.owner(),
                });
            }
        };

        let utilization = utilization_rate(cash, borrows, reserves)?;
        let borrow_rate = self.borrow_rate_at(utilization)?;
        let observed = mul_fixed(utilization, borrow_rate)?;

        let mut checkpoints = self.state.checkpoints;
        checkpoints.push(RateCheckpoint {
            observed_borrow_rate_per_block: observed,
            block_number: ctx.block_number,
        });
        let multiplier = self.next_multiplier(&checkpoints)?;

        trace!(%utilization, %borrow_rate, %observed, "accrual borrow rate");
        debug!(
            ledger = %ctx.caller,
            block_number = ctx.block_number,
            count = checkpoints.len(),
            multiplier_per_block = %multiplier,
            "recorded interest checkpoint"
        );

        self.binding = binding;
        self.state = ReactiveState {
            checkpoints,
            multiplier_per_block: multiplier,
        };

        Ok(borrow_rate)
    }

    /// Clears the checkpoint history on behalf of the owning ledger.
    ///
    /// The ledger calls this on the outgoing model when it installs another
    /// one, which moves the model to [`Binding::Superseded`]. The multiplier
    /// keeps its last value.
    pub fn reset_interest_checkpoints(&mut self, caller: Address) -> Result<(), RateModelError> {
        match self.binding {
            Binding::Active(owner) if owner == caller => {
                debug!(
                    ledger = %caller,
                    cleared = self.state.checkpoints.len(),
                    "interest checkpoints reset"
                );
                self.state.checkpoints.clear();
                self.binding = Binding::Superseded(caller);
                Ok(())
            }
            Binding::Superseded(owner) if owner == caller => Ok(()),
            _ => {
                warn!(%caller, owner = ?self.owner(), "rejected checkpoint reset from non-owner");
                Err(RateModelError::Unauthorized {
                    caller,
                    owner: self.owner(),
                })
            }
        }
    }

    fn next_multiplier(&self, checkpoints: &CheckpointRing) -> Result<U256, RateModelError> {
        let current = self.state.multiplier_per_block;
        let Some(average) = checkpoints.average_observed_rate()? else {
            return Ok(current);
        };

        let base = self.config.base_rate_per_block;
        if average < base {
            let delta = mul_fixed(self.policy.sensitivity, sub(base, average)?)?;
            // clamp at zero
            if delta >= current {
                return Ok(U256::ZERO);
            }
            return sub(current, delta);
        }

        let delta = mul_fixed(self.policy.sensitivity, sub(average, base)?)?;
        Ok(min(add(current, delta)?, self.policy.max_multiplier_per_block))
    }
}
