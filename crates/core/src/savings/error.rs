//! Savings error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during savings operations.
#[derive(Debug, Error)]
pub enum SavingsError {
    /// Deposit and withdrawal amounts must be strictly positive.
    #[error("Amount must be strictly positive, got {0}")]
    InvalidAmount(Decimal),

    /// Withdrawal would overdraw the account. The balance is left
    /// unchanged and no record is appended.
    #[error("Insufficient funds: requested {requested}, balance is {balance}")]
    InsufficientFunds {
        /// Amount the caller asked to withdraw.
        requested: Decimal,
        /// Balance at the time of the check.
        balance: Decimal,
    },

    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SavingsError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "invalid_amount",
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::Store(StoreError::NotFound(_)) => "not_found",
            Self::Store(StoreError::Conflict(_)) => "conflict",
            Self::Store(StoreError::Unavailable(_)) => "store_unavailable",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount(_) => 400,
            // A failed funds check is a state conflict, not bad input.
            Self::InsufficientFunds { .. } => 409,
            Self::Store(StoreError::NotFound(_)) => 404,
            Self::Store(StoreError::Conflict(_)) => 409,
            Self::Store(StoreError::Unavailable(_)) => 503,
        }
    }
}
