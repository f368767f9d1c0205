//! Per-record write serialization.
//!
//! Every mutation is a whole-record read-modify-write, so two overlapping
//! calls on the same record would lose an update.  Operations hold the locks
//! of every record they touch for the full cycle.  Locks are always taken in
//! [`RecordKey`] order, which rules out deadlocks between multi-record
//! operations.
//!
//! Reads take the same locks as writes, so a read issued after a pending
//! mutation observes its result.  Lookups that gate a write (a blocked check
//! before a call) run under the lock of the record being checked.  Locks are
//! not reentrant: an operation holding a guard must not call another locking
//! operation.

use causerie_store::RecordKey;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct RecordLocks {
    user: Mutex<()>,
    contacts: Mutex<()>,
    messages: Mutex<()>,
    calls: Mutex<()>,
}

/// Held locks; released on drop.
#[must_use = "the records are unlocked as soon as the guard is dropped"]
pub struct RecordGuard<'a> {
    _guards: Vec<MutexGuard<'a, ()>>,
}

impl RecordLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, key: RecordKey) -> &Mutex<()> {
        match key {
            RecordKey::User => &self.user,
            RecordKey::Contacts => &self.contacts,
            RecordKey::Messages => &self.messages,
            RecordKey::Calls => &self.calls,
        }
    }

    /// Lock `keys` (in canonical order, duplicates ignored).
    pub async fn acquire(&self, keys: &[RecordKey]) -> RecordGuard<'_> {
        let mut keys = keys.to_vec();
        keys.sort();
        keys.dedup();

        let mut guards = Vec::with_capacity(keys.len());
        for key in keys {
            guards.push(self.lock_for(key).lock().await);
        }
        RecordGuard { _guards: guards }
    }

    /// Lock all four records.
    pub async fn acquire_all(&self) -> RecordGuard<'_> {
        self.acquire(&RecordKey::ALL).await
    }
}
