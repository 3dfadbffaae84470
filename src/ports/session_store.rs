//! Session store port.
//!
//! Maps a stable user identifier to its `Session`. This is the only mutable
//! shared resource of the conversation core.
//!
//! # Design
//!
//! - **No deletion**: sessions live as long as the store
//! - **No locking**: per-user serialization is done by the caller
//!   (`application::UserLocks`), so any backend gets it for free

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::session::Session;

/// Storage port for `Session` records.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Find the session of a user.
    ///
    /// Returns `None` if the user has never written.
    async fn get(&self, user_id: &UserId) -> Result<Option<Session>, DomainError>;

    /// Find the session of a user, creating a fresh one on first contact.
    ///
    /// The new session is persisted before it is returned.
    async fn get_or_create(&self, user_id: &UserId) -> Result<Session, DomainError>;

    /// Persist a session, replacing the stored copy.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &Session) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SessionStore) {}
    }
}
