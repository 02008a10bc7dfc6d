//! Loan domain types and the status state machine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a loan application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// Freshly created by the owner; awaiting review.
    Submitted,
    /// Picked up by the administrative review process.
    UnderReview,
    /// Review decided in favour; awaiting disbursement.
    Approved,
    /// Review decided against. Terminal.
    Rejected,
    /// Principal has been paid out.
    Disbursed,
    /// Repayment instalments are being collected.
    Repaying,
    /// Fully repaid. Terminal.
    Closed,
}

impl LoanStatus {
    /// Returns true if no further transition is permitted from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Closed)
    }

    /// Returns true if `next` is reachable from this status along an
    /// allowed edge. Skipping a state or leaving a terminal state is
    /// never allowed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Submitted, Self::UnderReview)
                | (Self::UnderReview, Self::Approved | Self::Rejected)
                | (Self::Approved, Self::Disbursed)
                | (Self::Disbursed, Self::Repaying)
                | (Self::Repaying, Self::Closed)
        )
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Disbursed => "disbursed",
            Self::Repaying => "repaying",
            Self::Closed => "closed",
        };
        write!(f, "{s}")
    }
}

/// A loan application. Belongs to exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    /// Loan ID.
    pub id: Uuid,
    /// Owning user's ID. Referenced, never duplicated.
    pub owner_id: Uuid,
    /// Principal amount.
    pub amount: Decimal,
    /// Free-text purpose.
    pub purpose: String,
    /// Duration in months, one of the enumerated set.
    pub duration_months: u32,
    /// Current status.
    pub status: LoanStatus,
    /// Computed monthly payment.
    pub monthly_payment: Decimal,
    /// Flat processing fee, collected upfront and reported in the terms,
    /// not deducted from the disbursed principal.
    pub processing_fee: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for submitting a loan application.
#[derive(Debug, Clone, Deserialize)]
pub struct LoanApplication {
    /// Requested principal.
    pub amount: Decimal,
    /// Free-text purpose.
    pub purpose: String,
    /// Duration in months.
    pub duration_months: u32,
}

/// Fields that may change on an existing loan.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoanUpdate {
    /// Requested status transition.
    pub status: Option<LoanStatus>,
    /// Amended purpose; only editable while the loan is still submitted.
    pub purpose: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LoanStatus::Submitted, LoanStatus::UnderReview)]
    #[case(LoanStatus::UnderReview, LoanStatus::Approved)]
    #[case(LoanStatus::UnderReview, LoanStatus::Rejected)]
    #[case(LoanStatus::Approved, LoanStatus::Disbursed)]
    #[case(LoanStatus::Disbursed, LoanStatus::Repaying)]
    #[case(LoanStatus::Repaying, LoanStatus::Closed)]
    fn test_allowed_edges(#[case] from: LoanStatus, #[case] to: LoanStatus) {
        assert!(from.can_transition_to(to));
    }

    #[rstest]
    // Skipping a state
    #[case(LoanStatus::Submitted, LoanStatus::Approved)]
    #[case(LoanStatus::Submitted, LoanStatus::Disbursed)]
    #[case(LoanStatus::UnderReview, LoanStatus::Disbursed)]
    #[case(LoanStatus::Approved, LoanStatus::Repaying)]
    // Moving backwards
    #[case(LoanStatus::UnderReview, LoanStatus::Submitted)]
    #[case(LoanStatus::Disbursed, LoanStatus::Approved)]
    // Leaving a terminal state
    #[case(LoanStatus::Rejected, LoanStatus::UnderReview)]
    #[case(LoanStatus::Closed, LoanStatus::Repaying)]
    // Self-loops
    #[case(LoanStatus::Submitted, LoanStatus::Submitted)]
    fn test_forbidden_edges(#[case] from: LoanStatus, #[case] to: LoanStatus) {
        assert!(!from.can_transition_to(to));
    }

    #[test]
    fn test_terminal_states() {
        assert!(LoanStatus::Rejected.is_terminal());
        assert!(LoanStatus::Closed.is_terminal());
        assert!(!LoanStatus::Submitted.is_terminal());
        assert!(!LoanStatus::UnderReview.is_terminal());
        assert!(!LoanStatus::Approved.is_terminal());
        assert!(!LoanStatus::Disbursed.is_terminal());
        assert!(!LoanStatus::Repaying.is_terminal());
    }

    #[test]
    fn test_status_serde_uses_snake_case() {
        let json = serde_json::to_string(&LoanStatus::UnderReview).unwrap();
        assert_eq!(json, "\"under_review\"");
    }
}
