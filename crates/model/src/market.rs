//! Reference ledger that drives a rate model.
//!
//! A [`Market`] holds the balances of one pooled asset and the rate model
//! installed on it. It is the caller the models expect: it asks for a borrow
//! rate once per accrual, grows the borrow index with simple interest over
//! the elapsed blocks, and invokes the reset hook of a model it replaces.
//!
//! # Interest Accrual
//!
//! ```text
//! simple_interest_factor = borrow_rate * block_delta
//! interest               = simple_interest_factor * total_borrows
//! total_borrows         += interest
//! total_reserves        += reserve_factor * interest
//! borrow_index          += simple_interest_factor * borrow_index
//! ```
//!
//! # Example
//!
//! ```rust
//! use lendrate_model::{JumpRateModel, Market, WAD};
//! use alloy_primitives::{Address, U256};
//!
//! let pct = |p: u64| U256::from(p) * WAD / U256::from(100);
//! let model = JumpRateModel::new(pct(2), pct(20), pct(300), pct(80)).unwrap();
//!
//! let mut market = Market::new(Address::ZERO, model.into(), pct(10), 100).unwrap();
//! market.supply(U256::from(1_000_000) * WAD, 100).unwrap();
//! market.borrow(U256::from(500_000) * WAD, 100).unwrap();
//!
//! let outcome = market.accrue_interest(200).unwrap();
//! assert!(outcome.interest_accumulated > U256::ZERO);
//! assert!(market.borrow_index > WAD);
//! ```

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::RateModelError;
use crate::math::{add, mul, mul_fixed, sub, WAD};
use crate::model::RateModel;
use crate::reactive::AccrualContext;
use crate::utilization::utilization_rate;

/// Maximum borrow rate a model may return (0.0005% per block)
pub const BORROW_RATE_MAX_PER_BLOCK: U256 = U256::from_limbs([5_000_000_000_000, 0, 0, 0]);

/// Result of a single accrual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualOutcome {
    /// Blocks since the previous accrual (zero when already accrued)
    pub block_delta: u64,
    /// Borrow rate charged over the period (per block)
    pub borrow_rate: U256,
    /// Interest added to total borrows
    pub interest_accumulated: U256,
    /// Borrow index after the accrual
    pub borrow_index: U256,
}

/// Balances and rate model of one lending market.
#[derive(Debug, Clone)]
pub struct Market {
    /// Identity the market presents to its rate model
    pub id: Address,
    /// Underlying held by the market
    pub cash: U256,
    /// Outstanding borrows including accrued interest
    pub total_borrows: U256,
    /// Interest set aside for the protocol
    pub total_reserves: U256,
    /// Cumulative borrow interest index (starts at WAD)
    pub borrow_index: U256,
    /// Block of the last accrual
    pub accrual_block_number: u64,
    /// Share of interest kept as reserves (WAD-scaled)
    pub reserve_factor: U256,
    model: RateModel,
}

impl Market {
    /// Creates an empty market and binds `model` to it.
    pub fn new(
        id: Address,
        mut model: RateModel,
        reserve_factor: U256,
        block_number: u64,
    ) -> Result<Self, RateModelError> {
        model.bind(id)?;
        Ok(Self {
            id,
            cash: U256::ZERO,
            total_borrows: U256::ZERO,
            total_reserves: U256::ZERO,
            borrow_index: WAD,
            accrual_block_number: block_number,
            reserve_factor,
            model,
        })
    }

    /// Creates a market with pre-existing balances.
    pub fn with_balances(
        id: Address,
        model: RateModel,
        reserve_factor: U256,
        block_number: u64,
        cash: U256,
        total_borrows: U256,
        total_reserves: U256,
    ) -> Result<Self, RateModelError> {
        let mut market = Self::new(id, model, reserve_factor, block_number)?;
        market.cash = cash;
        market.total_borrows = total_borrows;
        market.total_reserves = total_reserves;
        Ok(market)
    }

    /// The installed rate model
    pub fn model(&self) -> &RateModel {
        &self.model
    }

    /// Current utilization (WAD-scaled)
    pub fn utilization(&self) -> Result<U256, RateModelError> {
        utilization_rate(self.cash, self.total_borrows, self.total_reserves)
    }

    /// Borrow rate per block at current balances, without accruing
    pub fn borrow_rate_per_block(&self) -> Result<U256, RateModelError> {
        self.model
            .borrow_rate(self.cash, self.total_borrows, self.total_reserves)
    }

    /// Supply rate per block at current balances, without accruing
    pub fn supply_rate_per_block(&self) -> Result<U256, RateModelError> {
        self.model.supply_rate(
            self.cash,
            self.total_borrows,
            self.total_reserves,
            self.reserve_factor,
        )
    }

    /// Accrues interest up to `block_number`.
    ///
    /// Accruing twice in the same block is a no-op. The market state is only
    /// updated once every step has succeeded.
    pub fn accrue_interest(&mut self, block_number: u64) -> Result<AccrualOutcome, RateModelError> {
        let (accrued, outcome) = self.accrued(block_number)?;
        *self = accrued;
        Ok(outcome)
    }

    /// Returns a copy of this market accrued up to `block_number`.
    ///
    /// The installed model is asked for its borrow rate on the copy, so a
    /// failure anywhere leaves `self` and its model untouched.
    fn accrued(&self, block_number: u64) -> Result<(Market, AccrualOutcome), RateModelError> {
        if block_number < self.accrual_block_number {
            return Err(RateModelError::InvalidAccrualBlock {
                block_number,
                accrual_block_number: self.accrual_block_number,
            });
        }

        let mut market = self.clone();
        if block_number == self.accrual_block_number {
            let outcome = AccrualOutcome {
                block_delta: 0,
                borrow_rate: U256::ZERO,
                interest_accumulated: U256::ZERO,
                borrow_index: self.borrow_index,
            };
            return Ok((market, outcome));
        }

        let block_delta = block_number - self.accrual_block_number;

        let borrow_rate = market.model.accrue_borrow_rate(
            AccrualContext::new(self.id, block_number),
            self.cash,
            self.total_borrows,
            self.total_reserves,
        )?;
        if borrow_rate > BORROW_RATE_MAX_PER_BLOCK {
            return Err(RateModelError::BorrowRateTooHigh {
                rate: borrow_rate,
                max: BORROW_RATE_MAX_PER_BLOCK,
            });
        }

        let simple_interest_factor = mul(borrow_rate, U256::from(block_delta))?;
        let interest_accumulated = mul_fixed(simple_interest_factor, self.total_borrows)?;
        market.total_borrows = add(interest_accumulated, self.total_borrows)?;
        market.total_reserves = add(
            mul_fixed(self.reserve_factor, interest_accumulated)?,
            self.total_reserves,
        )?;
        market.borrow_index = add(
            mul_fixed(simple_interest_factor, self.borrow_index)?,
            self.borrow_index,
        )?;
        market.accrual_block_number = block_number;

        debug!(
            market = %self.id,
            block_number,
            block_delta,
            %borrow_rate,
            %interest_accumulated,
            borrow_index = %market.borrow_index,
            "accrued interest"
        );

        let outcome = AccrualOutcome {
            block_delta,
            borrow_rate,
            interest_accumulated,
            borrow_index: market.borrow_index,
        };
        Ok((market, outcome))
    }

    /// Replaces the installed rate model and returns the outgoing one.
    ///
    /// Interest is accrued under the outgoing model first. The new model is
    /// bound to this market, then the outgoing model's checkpoint history is
    /// reset. Nothing changes if any of these steps fails.
    pub fn set_interest_rate_model(
        &mut self,
        mut new_model: RateModel,
        block_number: u64,
    ) -> Result<RateModel, RateModelError> {
        let (mut market, _) = self.accrued(block_number)?;

        new_model.bind(self.id)?;
        let mut old_model = std::mem::replace(&mut market.model, new_model);
        old_model.reset_interest_checkpoints(self.id)?;

        info!(
            market = %self.id,
            old = %old_model.kind(),
            new = %market.model.kind(),
            "interest rate model replaced"
        );

        *self = market;
        Ok(old_model)
    }

    /// Deposits underlying into the market.
    pub fn supply(&mut self, amount: U256, block_number: u64) -> Result<AccrualOutcome, RateModelError> {
        let (mut market, outcome) = self.accrued(block_number)?;
        market.cash = add(market.cash, amount)?;
        *self = market;
        Ok(outcome)
    }

    /// Borrows underlying out of the market.
    pub fn borrow(&mut self, amount: U256, block_number: u64) -> Result<AccrualOutcome, RateModelError> {
        let (mut market, outcome) = self.accrued(block_number)?;
        if amount > market.cash {
            return Err(RateModelError::InsufficientCash {
                requested: amount,
                available: market.cash,
            });
        }
        market.total_borrows = add(market.total_borrows, amount)?;
        market.cash -= amount;
        *self = market;
        Ok(outcome)
    }

    /// Repays borrowed underlying.
    pub fn repay(&mut self, amount: U256, block_number: u64) -> Result<AccrualOutcome, RateModelError> {
        let (mut market, outcome) = self.accrued(block_number)?;
        if amount > market.total_borrows {
            return Err(RateModelError::RepayExceedsBorrows {
                requested: amount,
                outstanding: market.total_borrows,
            });
        }
        market.cash = add(market.cash, amount)?;
        market.total_borrows = sub(market.total_borrows, amount)?;
        *self = market;
        Ok(outcome)
    }
}
