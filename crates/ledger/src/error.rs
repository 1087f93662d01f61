use crate::session::SessionPhase;
use crate::Amount;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Operation is restricted to the ledger owner.")]
    NotOwner,

    #[error("Operation requires session phase {expected:?}, but the ledger is {actual:?}.")]
    InvalidPhase {
        expected: SessionPhase,
        actual: SessionPhase,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No investment record exists for address '{0}'.")]
    UnknownInvestor(String),

    #[error("Withdrawal of {requested} exceeds the recorded balance of {available}.")]
    InsufficientBalance {
        requested: Amount,
        available: Amount,
    },

    #[error("Profit cannot be distributed while total investment is zero.")]
    NoInvestmentPool,
}
