//! Loan engine: creation, listing, and state machine enforcement.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::error::LoanError;
use super::terms::LoanTerms;
use super::types::{Loan, LoanApplication, LoanStatus, LoanUpdate};
use crate::identity::UserIdentity;
use crate::store::LoanStore;
use crate::sync::LockRegistry;

/// Owns loan applications and enforces the lifecycle state machine.
///
/// Transitions are serialized per loan so two concurrent requests cannot
/// both succeed past a terminal-state check. Status decisions themselves
/// come from the administrative review process; the engine only enforces
/// that they move along allowed edges.
pub struct LoanEngine {
    store: Arc<dyn LoanStore>,
    locks: LockRegistry,
}

impl LoanEngine {
    /// Creates an engine over the given loan store.
    #[must_use]
    pub fn new(store: Arc<dyn LoanStore>) -> Self {
        Self {
            store,
            locks: LockRegistry::new(),
        }
    }

    /// Submits a new loan application for the given owner.
    ///
    /// Validates principal bounds and the duration set before any record
    /// is created; on success the loan starts in `submitted` with its
    /// repayment terms computed.
    ///
    /// # Errors
    ///
    /// Returns `LoanError::PrincipalOutOfRange` or
    /// `LoanError::UnsupportedDuration` on invalid terms, or a store error.
    pub async fn submit(
        &self,
        owner: &UserIdentity,
        application: LoanApplication,
    ) -> Result<Loan, LoanError> {
        let terms = LoanTerms::compute(application.amount, application.duration_months)?;

        let now = Utc::now();
        let loan = Loan {
            id: Uuid::new_v4(),
            owner_id: owner.id,
            amount: application.amount,
            purpose: application.purpose,
            duration_months: application.duration_months,
            status: LoanStatus::Submitted,
            monthly_payment: terms.monthly_payment,
            processing_fee: terms.processing_fee,
            created_at: now,
            updated_at: now,
        };

        let stored = self.store.insert(loan).await?;
        info!(
            loan_id = %stored.id,
            owner_id = %owner.id,
            amount = %stored.amount,
            duration_months = stored.duration_months,
            "Loan application submitted"
        );
        Ok(stored)
    }

    /// Lists the owner's loans, most recent first.
    ///
    /// # Errors
    ///
    /// Returns a store error if the lookup fails.
    pub async fn list(&self, owner: &UserIdentity) -> Result<Vec<Loan>, LoanError> {
        Ok(self.store.list_by_owner(owner.id).await?)
    }

    /// Fetches a single loan, enforcing ownership.
    ///
    /// # Errors
    ///
    /// Returns `LoanError::NotFound` if no such loan exists, or
    /// `LoanError::NotOwner` if the actor may not read it.
    pub async fn get(&self, actor: &UserIdentity, id: Uuid) -> Result<Loan, LoanError> {
        let loan = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(LoanError::NotFound(id))?;
        Self::authorize(actor, &loan)?;
        Ok(loan)
    }

    /// Applies an update: a status transition, an amended purpose, or both.
    ///
    /// The read-check-write sequence runs under the loan's lock so a
    /// concurrent transition cannot slip past the state check.
    ///
    /// # Errors
    ///
    /// Returns `LoanError::InvalidTransition` for an off-edge or
    /// from-terminal transition, `LoanError::NoLongerEditable` for a
    /// purpose change after review has started, `LoanError::NotOwner`,
    /// `LoanError::NotFound`, or a store error.
    pub async fn update(
        &self,
        actor: &UserIdentity,
        id: Uuid,
        update: LoanUpdate,
    ) -> Result<Loan, LoanError> {
        let lock = self.locks.lock_for(id);
        let _guard = lock.lock().await;

        let mut loan = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(LoanError::NotFound(id))?;
        Self::authorize(actor, &loan)?;

        if let Some(purpose) = update.purpose {
            if loan.status != LoanStatus::Submitted {
                return Err(LoanError::NoLongerEditable(id));
            }
            loan.purpose = purpose;
        }

        if let Some(next) = update.status {
            if !loan.status.can_transition_to(next) {
                return Err(LoanError::InvalidTransition {
                    from: loan.status,
                    to: next,
                });
            }
            info!(
                loan_id = %id,
                from = %loan.status,
                to = %next,
                actor_id = %actor.id,
                "Loan status transition"
            );
            loan.status = next;
        }

        loan.updated_at = Utc::now();
        Ok(self.store.update(loan).await?)
    }

    /// Deletes a loan. Permitted only in a terminal state.
    ///
    /// # Errors
    ///
    /// Returns `LoanError::NotTerminal` while the loan is live,
    /// `LoanError::NotOwner`, `LoanError::NotFound`, or a store error.
    pub async fn delete(&self, actor: &UserIdentity, id: Uuid) -> Result<(), LoanError> {
        let lock = self.locks.lock_for(id);
        let _guard = lock.lock().await;

        let loan = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(LoanError::NotFound(id))?;
        Self::authorize(actor, &loan)?;

        if !loan.status.is_terminal() {
            return Err(LoanError::NotTerminal(id));
        }

        self.store.delete(id).await?;
        info!(loan_id = %id, actor_id = %actor.id, "Loan deleted");
        Ok(())
    }

    /// Owner may always act on their own loan; administrative reviewers
    /// may act on any loan (review decisions arrive through the same
    /// update path).
    fn authorize(actor: &UserIdentity, loan: &Loan) -> Result<(), LoanError> {
        if loan.owner_id == actor.id || actor.is_admin() {
            Ok(())
        } else {
            Err(LoanError::NotOwner(loan.id))
        }
    }
}

impl std::fmt::Debug for LoanEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoanEngine").finish_non_exhaustive()
    }
}
