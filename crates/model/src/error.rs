//! Error types for the rate model library.

use alloy_primitives::{Address, U256};
use thiserror::Error;

use crate::math::MathOperation;

/// Errors that can occur while computing rates or accruing interest.
///
/// Every error leaves the model and ledger state exactly as it was before
/// the failing call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateModelError {
    /// A fixed-point operation produced a value outside the 256-bit range
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow { operation: MathOperation },

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// A state-mutating call came from a ledger that does not own the model
    #[error("Unauthorized caller {caller} (bound ledger: {owner:?})")]
    Unauthorized {
        caller: Address,
        owner: Option<Address>,
    },

    /// Interest accrual was attempted for a block before the last accrual
    #[error("Invalid accrual: block {block_number} is before last accrual block {accrual_block_number}")]
    InvalidAccrualBlock {
        block_number: u64,
        accrual_block_number: u64,
    },

    /// The model returned a borrow rate above the ledger's ceiling
    #[error("Borrow rate {rate} per block exceeds maximum {max}")]
    BorrowRateTooHigh { rate: U256, max: U256 },

    /// Not enough cash in the market
    #[error("Insufficient cash: requested {requested}, available {available}")]
    InsufficientCash { requested: U256, available: U256 },

    /// Repayment larger than the outstanding borrows
    #[error("Repay amount {requested} exceeds outstanding borrows {outstanding}")]
    RepayExceedsBorrows { requested: U256, outstanding: U256 },
}
