//! Loan error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use super::types::LoanStatus;
use crate::store::StoreError;

/// Errors that can occur during loan operations.
#[derive(Debug, Error)]
pub enum LoanError {
    // ========== Validation Errors ==========
    /// Principal is outside the allowed range.
    #[error("Principal {0} is outside the allowed range 1000..=50000")]
    PrincipalOutOfRange(Decimal),

    /// Duration is not in the enumerated set.
    #[error("Unsupported loan duration: {0} months")]
    UnsupportedDuration(u32),

    // ========== Authorization Errors ==========
    /// The acting user does not own the loan.
    ///
    /// Distinct from authentication failure so clients can tell
    /// "log in again" from "not your resource".
    #[error("Loan {0} belongs to another user")]
    NotOwner(Uuid),

    // ========== State Errors ==========
    /// The requested edge is not part of the state machine.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: LoanStatus,
        /// Requested status.
        to: LoanStatus,
    },

    /// Fields other than repayment bookkeeping can only change while the
    /// loan is still submitted.
    #[error("Loan {0} can no longer be edited")]
    NoLongerEditable(Uuid),

    /// Deletion is a terminal-state-only administrative action.
    #[error("Loan {0} is not in a terminal state and cannot be deleted")]
    NotTerminal(Uuid),

    // ========== Lookup / Store Errors ==========
    /// Loan not found.
    #[error("Loan not found: {0}")]
    NotFound(Uuid),

    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LoanError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::PrincipalOutOfRange(_) | Self::UnsupportedDuration(_) => "invalid_loan_terms",
            Self::NotOwner(_) => "not_owner",
            Self::InvalidTransition { .. } | Self::NoLongerEditable(_) | Self::NotTerminal(_) => {
                "invalid_transition"
            }
            Self::NotFound(_) => "not_found",
            Self::Store(StoreError::NotFound(_)) => "not_found",
            Self::Store(StoreError::Conflict(_)) => "conflict",
            Self::Store(StoreError::Unavailable(_)) => "store_unavailable",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::PrincipalOutOfRange(_) | Self::UnsupportedDuration(_) => 400,
            Self::NotOwner(_) => 403,
            // State errors leave the entity exactly as it was.
            Self::InvalidTransition { .. } | Self::NoLongerEditable(_) | Self::NotTerminal(_) => 409,
            Self::NotFound(_) | Self::Store(StoreError::NotFound(_)) => 404,
            Self::Store(StoreError::Conflict(_)) => 409,
            Self::Store(StoreError::Unavailable(_)) => 503,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LoanError::PrincipalOutOfRange(dec!(500)).error_code(),
            "invalid_loan_terms"
        );
        assert_eq!(
            LoanError::UnsupportedDuration(7).error_code(),
            "invalid_loan_terms"
        );
        assert_eq!(LoanError::NotOwner(Uuid::nil()).error_code(), "not_owner");
        assert_eq!(
            LoanError::InvalidTransition {
                from: LoanStatus::Submitted,
                to: LoanStatus::Closed,
            }
            .error_code(),
            "invalid_transition"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(LoanError::PrincipalOutOfRange(dec!(500)).http_status_code(), 400);
        assert_eq!(LoanError::NotOwner(Uuid::nil()).http_status_code(), 403);
        assert_eq!(LoanError::NotFound(Uuid::nil()).http_status_code(), 404);
        assert_eq!(
            LoanError::InvalidTransition {
                from: LoanStatus::Rejected,
                to: LoanStatus::UnderReview,
            }
            .http_status_code(),
            409
        );
        assert_eq!(
            LoanError::Store(StoreError::Unavailable("down".to_string())).http_status_code(),
            503
        );
    }

    #[test]
    fn test_transition_error_display_names_both_states() {
        let err = LoanError::InvalidTransition {
            from: LoanStatus::Submitted,
            to: LoanStatus::Disbursed,
        };
        assert_eq!(
            err.to_string(),
            "Invalid status transition: submitted -> disbursed"
        );
    }
}
