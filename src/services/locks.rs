//! Per-group write serialization
//!
//! The group document is the only hot, mutably-shared resource: join,
//! remove, admin changes and payout rotation are all read-modify-write
//! sequences over it. Every mutating operation takes the group's lock for
//! the duration of the request so concurrent writers cannot lose updates.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

/// Registry of per-group async mutexes, shared by all services that mutate
/// groups.
#[derive(Clone, Default)]
pub struct GroupLocks {
    locks: Arc<Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>>,
}

impl GroupLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the exclusive lock for one group, creating it on first use.
    pub async fn acquire(&self, group_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().expect("group lock registry poisoned");
            locks
                .entry(group_id)
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Drop the registry entry after a group is deleted. In-flight holders
    /// keep their guard; later acquires would recreate the entry.
    pub fn forget(&self, group_id: Uuid) {
        let mut locks = self.locks.lock().expect("group lock registry poisoned");
        locks.remove(&group_id);
    }
}
