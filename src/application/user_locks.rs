//! Per-user mutual exclusion.
//!
//! Messages of one user are processed one at a time, in arrival order;
//! different users proceed in parallel. Tokio's mutex is fair, so waiters
//! are served FIFO.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::domain::foundation::UserId;

/// Registry of one lock per user, created on first use.
#[derive(Debug, Default)]
pub struct UserLocks {
    locks: RwLock<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to a user's session.
    ///
    /// The guard releases the lock when dropped.
    pub async fn acquire(&self, user_id: &UserId) -> OwnedMutexGuard<()> {
        self.lock_for(user_id).await.lock_owned().await
    }

    /// Number of users that have been seen.
    pub async fn len(&self) -> usize {
        self.locks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn lock_for(&self, user_id: &UserId) -> Arc<Mutex<()>> {
        if let Some(lock) = self.locks.read().await.get(user_id) {
            return Arc::clone(lock);
        }
        let mut locks = self.locks.write().await;
        Arc::clone(locks.entry(user_id.clone()).or_default())
    }
}
