//! DashMap-backed store.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use kredia_core::identity::UserIdentity;
use kredia_core::loan::Loan;
use kredia_core::savings::{SavingsAccount, TransactionRecord};
use kredia_core::store::{
    IdentityStore, LoanStore, SavingsStore, StoreError, StoreResult,
};

/// In-memory domain store.
///
/// Record-level atomicity comes from the engines' per-record locks; this
/// store only guarantees that individual map operations are consistent.
#[derive(Debug, Default)]
pub struct MemoryStore {
    loans: DashMap<Uuid, Loan>,
    accounts: DashMap<Uuid, SavingsAccount>,
    account_ids_by_owner: DashMap<Uuid, Uuid>,
    transactions: DashMap<Uuid, Vec<TransactionRecord>>,
    users: DashMap<Uuid, UserIdentity>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an identity record. Identity provisioning is out of scope
    /// for the core; this is how the server binary and tests register
    /// known users.
    pub fn seed_user(&self, user: UserIdentity) {
        self.users.insert(user.id, user);
    }
}

#[async_trait]
impl LoanStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Loan>> {
        Ok(self.loans.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Loan>> {
        let mut loans: Vec<Loan> = self
            .loans
            .iter()
            .filter(|entry| entry.owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect();
        // Most recent first: the dashboard ordering contract.
        loans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(loans)
    }

    async fn insert(&self, loan: Loan) -> StoreResult<Loan> {
        if self.loans.contains_key(&loan.id) {
            return Err(StoreError::Conflict(loan.id));
        }
        self.loans.insert(loan.id, loan.clone());
        Ok(loan)
    }

    async fn update(&self, loan: Loan) -> StoreResult<Loan> {
        if !self.loans.contains_key(&loan.id) {
            return Err(StoreError::NotFound(loan.id));
        }
        self.loans.insert(loan.id, loan.clone());
        Ok(loan)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.loans
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}

#[async_trait]
impl SavingsStore for MemoryStore {
    async fn find_account(&self, owner_id: Uuid) -> StoreResult<Option<SavingsAccount>> {
        let Some(account_id) = self.account_ids_by_owner.get(&owner_id).map(|e| *e.value()) else {
            return Ok(None);
        };
        Ok(self
            .accounts
            .get(&account_id)
            .map(|entry| entry.value().clone()))
    }

    async fn create_account(&self, account: SavingsAccount) -> StoreResult<SavingsAccount> {
        if self.account_ids_by_owner.contains_key(&account.owner_id) {
            return Err(StoreError::Conflict(account.owner_id));
        }
        self.account_ids_by_owner.insert(account.owner_id, account.id);
        self.accounts.insert(account.id, account.clone());
        self.transactions.insert(account.id, Vec::new());
        Ok(account)
    }

    async fn update_account(&self, account: SavingsAccount) -> StoreResult<SavingsAccount> {
        if !self.accounts.contains_key(&account.id) {
            return Err(StoreError::NotFound(account.id));
        }
        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn append_transaction(&self, record: TransactionRecord) -> StoreResult<TransactionRecord> {
        let mut log = self.transactions.entry(record.account_id).or_default();
        log.push(record.clone());
        Ok(record)
    }

    async fn list_transactions(&self, account_id: Uuid) -> StoreResult<Vec<TransactionRecord>> {
        let mut records = self
            .transactions
            .get(&account_id)
            .map(|log| log.value().clone())
            .unwrap_or_default();
        // Re-derive the chronological view on every call.
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn resolve_user(&self, id: Uuid) -> StoreResult<Option<UserIdentity>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use kredia_core::loan::LoanStatus;
    use rust_decimal_macros::dec;

    fn loan_created_at(owner_id: Uuid, offset_secs: i64) -> Loan {
        let at = Utc::now() + Duration::seconds(offset_secs);
        Loan {
            id: Uuid::new_v4(),
            owner_id,
            amount: dec!(5000),
            purpose: "test".to_string(),
            duration_months: 12,
            status: LoanStatus::Submitted,
            monthly_payment: dec!(466.67),
            processing_fee: dec!(100.00),
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn test_list_by_owner_is_most_recent_first() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        let oldest = loan_created_at(owner, -30);
        let middle = loan_created_at(owner, -20);
        let newest = loan_created_at(owner, -10);
        for loan in [&middle, &oldest, &newest] {
            store.insert((*loan).clone()).await.unwrap();
        }
        // Another user's loan must not appear.
        store
            .insert(loan_created_at(Uuid::new_v4(), -5))
            .await
            .unwrap();

        let listed = store.list_by_owner(owner).await.unwrap();
        let ids: Vec<Uuid> = listed.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![newest.id, middle.id, oldest.id]);
    }

    #[tokio::test]
    async fn test_update_missing_loan_is_not_found() {
        let store = MemoryStore::new();
        let loan = loan_created_at(Uuid::new_v4(), 0);
        assert!(matches!(
            store.update(loan).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_double_account_creation_conflicts() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        store
            .create_account(SavingsAccount::open(owner))
            .await
            .unwrap();
        assert!(matches!(
            store.create_account(SavingsAccount::open(owner)).await,
            Err(StoreError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_user_resolves_to_none() {
        let store = MemoryStore::new();
        assert!(store.resolve_user(Uuid::new_v4()).await.unwrap().is_none());
    }
}
