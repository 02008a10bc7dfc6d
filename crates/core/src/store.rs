//! Domain store contracts.
//!
//! The engines read and write through these traits; the concrete durable
//! store is out of scope and pluggable. Every call is expected to complete
//! or fail within a bounded timeout - a timed-out or unreachable store
//! surfaces as [`StoreError::Unavailable`] and is never retried by the core.

use async_trait::async_trait;
use uuid::Uuid;

use crate::identity::UserIdentity;
use crate::loan::Loan;
use crate::savings::{SavingsAccount, TransactionRecord};

/// Errors surfaced by the domain store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The requested record does not exist.
    #[error("record not found: {0}")]
    NotFound(Uuid),

    /// A conditional write lost against a concurrent update.
    #[error("conflicting concurrent update for record {0}")]
    Conflict(Uuid),

    /// The store is unreachable or timed out.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract for loan applications.
#[async_trait]
pub trait LoanStore: Send + Sync {
    /// Looks up a loan by id.
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Loan>>;

    /// Lists a user's loans ordered by creation time, most recent first.
    ///
    /// The ordering is a contract: the dashboard view depends on it.
    async fn list_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Loan>>;

    /// Persists a new loan and returns the stored record.
    async fn insert(&self, loan: Loan) -> StoreResult<Loan>;

    /// Replaces the stored loan with the given record, matched by id.
    async fn update(&self, loan: Loan) -> StoreResult<Loan>;

    /// Removes a loan by id.
    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

/// Persistence contract for savings accounts and their transaction logs.
#[async_trait]
pub trait SavingsStore: Send + Sync {
    /// Looks up the savings account owned by the given user.
    async fn find_account(&self, owner_id: Uuid) -> StoreResult<Option<SavingsAccount>>;

    /// Persists a new savings account.
    async fn create_account(&self, account: SavingsAccount) -> StoreResult<SavingsAccount>;

    /// Replaces the stored account with the given record, matched by id.
    async fn update_account(&self, account: SavingsAccount) -> StoreResult<SavingsAccount>;

    /// Appends a transaction record to an account's log.
    ///
    /// The log is append-only: records are never edited or reordered.
    async fn append_transaction(&self, record: TransactionRecord) -> StoreResult<TransactionRecord>;

    /// Lists an account's transaction records in chronological order,
    /// oldest first. Each call re-derives the full ordered view.
    async fn list_transactions(&self, account_id: Uuid) -> StoreResult<Vec<TransactionRecord>>;
}

/// Identity provider contract consumed by the token verifier.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Resolves a user id to an identity record, if one exists.
    async fn resolve_user(&self, id: Uuid) -> StoreResult<Option<UserIdentity>>;
}
