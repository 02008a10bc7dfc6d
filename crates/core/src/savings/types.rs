//! Savings domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's savings account. Exactly one per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsAccount {
    /// Account ID.
    pub id: Uuid,
    /// Owning user's ID.
    pub owner_id: Uuid,
    /// Current balance. Never negative.
    pub balance: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl SavingsAccount {
    /// Creates a fresh zero-balance account for the given owner.
    #[must_use]
    pub fn open(owner_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            balance: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }
}

/// Direction of a ledger movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Money in.
    Deposit,
    /// Money out.
    Withdrawal,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deposit => write!(f, "deposit"),
            Self::Withdrawal => write!(f, "withdrawal"),
        }
    }
}

/// One immutable entry in an account's ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Record ID.
    pub id: Uuid,
    /// Account the record belongs to.
    pub account_id: Uuid,
    /// Movement direction.
    pub kind: TransactionKind,
    /// Amount moved. Strictly positive.
    pub amount: Decimal,
    /// Balance snapshot after applying this record.
    pub balance_after: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
