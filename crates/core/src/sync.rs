//! Per-record mutual exclusion.
//!
//! Both engines serialize their read-check-amend sequences per record:
//! the savings ledger per account, the loan engine per loan. Operations on
//! different records never contend. Locks are created lazily and kept for
//! the process lifetime; the registry is keyed by record id.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Lazily-populated registry of per-record locks.
#[derive(Debug, Default)]
pub(crate) struct LockRegistry {
    inner: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl LockRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the lock guarding the given record id.
    pub(crate) fn lock_for(&self, id: Uuid) -> Arc<Mutex<()>> {
        self.inner
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
