//! Error types for a single operation invocation.
//!
//! None of these halt a simulation. Each one ends only the invocation that
//! produced it and is reported to the caller as a failed outcome.

use nft_sim_types::{Address, Coins};

/// Why an invocation ended in failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// The acting address is not a simulation account, or the ledger has no
    /// record of it.
    AccountNotFound {
        address: Address,
    },

    /// No affordable fee exists for the acting account.
    InsufficientFunds {
        address: Address,
        /// Fee computation failure text
        detail: String,
    },

    /// The transaction could not be encoded for signing.
    Encoding {
        message: String,
    },

    /// The ledger rejected the transaction.
    Rejected {
        /// Ledger result code (non-zero)
        code: u32,
        /// Diagnostic log from the execution engine, verbatim
        log: String,
    },
}

impl OperationError {
    /// Short stable label for grouping in reports.
    pub fn category(&self) -> &'static str {
        match self {
            OperationError::AccountNotFound { .. } => "account_not_found",
            OperationError::InsufficientFunds { .. } => "insufficient_funds",
            OperationError::Encoding { .. } => "encoding",
            OperationError::Rejected { .. } => "rejected",
        }
    }
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationError::AccountNotFound { address } => {
                write!(f, "account {} not found", address)
            }
            OperationError::InsufficientFunds { address, detail } => {
                write!(f, "insufficient funds for fee on {}: {}", address, detail)
            }
            OperationError::Encoding { message } => {
                write!(f, "failed to encode transaction: {}", message)
            }
            OperationError::Rejected { log, .. } => write!(f, "{}", log),
        }
    }
}

impl std::error::Error for OperationError {}

/// Failure of random fee selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeeError {
    /// Spendable balance holds no non-zero coin.
    InsufficientFunds { spendable: Coins },
}

impl std::fmt::Display for FeeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeeError::InsufficientFunds { spendable } if spendable.is_empty() => {
                write!(f, "no spendable balance to pay fees")
            }
            FeeError::InsufficientFunds { spendable } => {
                write!(f, "spendable balance {} cannot cover a fee", spendable)
            }
        }
    }
}

impl std::error::Error for FeeError {}
