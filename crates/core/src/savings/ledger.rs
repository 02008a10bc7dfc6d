//! Savings ledger: balance mutation under per-account serialization.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use super::error::SavingsError;
use super::types::{SavingsAccount, TransactionKind, TransactionRecord};
use crate::identity::UserIdentity;
use crate::store::SavingsStore;
use crate::sync::LockRegistry;

/// Owns one balance per user and its chronological transaction log.
///
/// The whole read-check-amend-append sequence for an account runs under
/// that account's lock. Without it, two concurrent withdrawals could both
/// pass the sufficient-funds check against a stale balance and jointly
/// overdraw the account. Locks are keyed by owner id; operations on
/// different accounts never contend.
pub struct SavingsLedger {
    store: Arc<dyn SavingsStore>,
    locks: LockRegistry,
}

impl SavingsLedger {
    /// Creates a ledger over the given savings store.
    #[must_use]
    pub fn new(store: Arc<dyn SavingsStore>) -> Self {
        Self {
            store,
            locks: LockRegistry::new(),
        }
    }

    /// Returns the user's account, creating it lazily at zero balance.
    ///
    /// # Errors
    ///
    /// Returns a store error if lookup or creation fails.
    pub async fn account(&self, owner: &UserIdentity) -> Result<SavingsAccount, SavingsError> {
        let lock = self.locks.lock_for(owner.id);
        let _guard = lock.lock().await;
        self.get_or_open(owner.id).await
    }

    /// Deposits a strictly positive amount and appends a `deposit` record
    /// carrying the resulting balance.
    ///
    /// # Errors
    ///
    /// Returns `SavingsError::InvalidAmount` for a non-positive amount
    /// (nothing is created or mutated), or a store error.
    pub async fn deposit(
        &self,
        owner: &UserIdentity,
        amount: Decimal,
    ) -> Result<SavingsAccount, SavingsError> {
        if amount <= Decimal::ZERO {
            return Err(SavingsError::InvalidAmount(amount));
        }

        let lock = self.locks.lock_for(owner.id);
        let _guard = lock.lock().await;

        let mut account = self.get_or_open(owner.id).await?;
        account.balance += amount;
        let account = self.store.update_account(account).await?;
        self.append(&account, TransactionKind::Deposit, amount).await?;

        info!(
            account_id = %account.id,
            owner_id = %owner.id,
            %amount,
            balance = %account.balance,
            "Deposit applied"
        );
        Ok(account)
    }

    /// Withdraws a strictly positive amount not exceeding the balance,
    /// appending a `withdrawal` record.
    ///
    /// # Errors
    ///
    /// Returns `SavingsError::InvalidAmount` or
    /// `SavingsError::InsufficientFunds`; in both cases the balance is
    /// left unchanged and no record is appended. No partial withdrawal.
    pub async fn withdraw(
        &self,
        owner: &UserIdentity,
        amount: Decimal,
    ) -> Result<SavingsAccount, SavingsError> {
        if amount <= Decimal::ZERO {
            return Err(SavingsError::InvalidAmount(amount));
        }

        let lock = self.locks.lock_for(owner.id);
        let _guard = lock.lock().await;

        let mut account = self.get_or_open(owner.id).await?;
        if amount > account.balance {
            return Err(SavingsError::InsufficientFunds {
                requested: amount,
                balance: account.balance,
            });
        }

        account.balance -= amount;
        let account = self.store.update_account(account).await?;
        self.append(&account, TransactionKind::Withdrawal, amount)
            .await?;

        info!(
            account_id = %account.id,
            owner_id = %owner.id,
            %amount,
            balance = %account.balance,
            "Withdrawal applied"
        );
        Ok(account)
    }

    /// Returns the account's full transaction history, oldest first.
    /// Each call re-derives the ordered view from the log.
    ///
    /// # Errors
    ///
    /// Returns a store error if the lookup fails.
    pub async fn transactions(
        &self,
        owner: &UserIdentity,
    ) -> Result<Vec<TransactionRecord>, SavingsError> {
        let account = self.account(owner).await?;
        Ok(self.store.list_transactions(account.id).await?)
    }

    async fn get_or_open(&self, owner_id: Uuid) -> Result<SavingsAccount, SavingsError> {
        if let Some(account) = self.store.find_account(owner_id).await? {
            return Ok(account);
        }
        let account = self.store.create_account(SavingsAccount::open(owner_id)).await?;
        info!(account_id = %account.id, %owner_id, "Savings account opened");
        Ok(account)
    }

    async fn append(
        &self,
        account: &SavingsAccount,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<TransactionRecord, SavingsError> {
        let record = TransactionRecord {
            id: Uuid::new_v4(),
            account_id: account.id,
            kind,
            amount,
            balance_after: account.balance,
            created_at: Utc::now(),
        };
        Ok(self.store.append_transaction(record).await?)
    }
}

impl std::fmt::Debug for SavingsLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SavingsLedger").finish_non_exhaustive()
    }
}
