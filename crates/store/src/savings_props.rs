//! Property-based tests for the ledger replay invariant.
//!
//! After any sequence of deposits and withdrawals,
//! `balance == sum(deposits) - sum(withdrawals)` computed over the full
//! transaction log. The balance must be independently reconstructable by
//! replaying the log.

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use kredia_core::identity::{Role, UserIdentity};
use kredia_core::savings::{SavingsLedger, TransactionKind, TransactionRecord};

use crate::MemoryStore;

/// One step of an account history: positive = deposit, negative = attempted
/// withdrawal (which may legitimately fail on insufficient funds).
fn step_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![1i64..=100_000, -100_000i64..=-1]
}

fn replay(log: &[TransactionRecord]) -> Decimal {
    log.iter().fold(Decimal::ZERO, |acc, record| match record.kind {
        TransactionKind::Deposit => acc + record.amount,
        TransactionKind::Withdrawal => acc - record.amount,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_balance_equals_log_replay(steps in prop::collection::vec(step_strategy(), 1..40)) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");

        rt.block_on(async move {
            let ledger = SavingsLedger::new(Arc::new(MemoryStore::new()));
            let owner = UserIdentity {
                id: Uuid::new_v4(),
                name: "prop".to_string(),
                email: "prop@example.com".to_string(),
                role: Role::Member,
            };

            for step in steps {
                let amount = Decimal::new(step.abs(), 2);
                if step > 0 {
                    ledger.deposit(&owner, amount).await.unwrap();
                } else {
                    // Overdraws are allowed to fail; they must leave no trace.
                    let _ = ledger.withdraw(&owner, amount).await;
                }
            }

            let balance = ledger.account(&owner).await.unwrap().balance;
            let log = ledger.transactions(&owner).await.unwrap();

            prop_assert_eq!(balance, replay(&log));
            prop_assert!(balance >= Decimal::ZERO);
            // Snapshots are consistent at every prefix of the log, not
            // just at the end.
            let mut running = Decimal::ZERO;
            for record in &log {
                running = match record.kind {
                    TransactionKind::Deposit => running + record.amount,
                    TransactionKind::Withdrawal => running - record.amount,
                };
                prop_assert_eq!(record.balance_after, running);
            }
            Ok(())
        })?;
    }
}
