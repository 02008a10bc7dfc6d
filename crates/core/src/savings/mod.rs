//! Savings accounts and the append-only transaction ledger.
//!
//! Each user owns exactly one savings account, created lazily at zero
//! balance on first access. Every balance mutation appends an immutable
//! transaction record carrying the resulting balance, so the balance can
//! always be reconstructed by replaying the log.

mod error;
mod ledger;
mod types;

pub use error::SavingsError;
pub use ledger::SavingsLedger;
pub use types::{SavingsAccount, TransactionKind, TransactionRecord};
