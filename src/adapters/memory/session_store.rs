//! In-memory session store.
//!
//! Sessions live for the process lifetime. Used when no database is
//! configured and in tests.
//!
//! Each session sits behind its own mutex. The map lock is held only to
//! look up or insert an entry, so writes for different users never wait
//! on each other.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::session::Session;
use crate::ports::SessionStore;

type Entry = Arc<Mutex<Session>>;

/// Session store backed by a map keyed by user.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<UserId, Entry>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Remove every session (useful for tests).
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    async fn entry(&self, user_id: &UserId) -> Option<Entry> {
        self.sessions.read().await.get(user_id).cloned()
    }

    /// Existing entry, or one inserted from `init` under the map write lock.
    async fn entry_or_insert_with(
        &self,
        user_id: &UserId,
        init: impl FnOnce() -> Session,
    ) -> Entry {
        if let Some(entry) = self.entry(user_id).await {
            return entry;
        }
        let mut sessions = self.sessions.write().await;
        Arc::clone(
            sessions
                .entry(user_id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(init()))),
        )
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<Session>, DomainError> {
        match self.entry(user_id).await {
            Some(entry) => Ok(Some(entry.lock().await.clone())),
            None => Ok(None),
        }
    }

    async fn get_or_create(&self, user_id: &UserId) -> Result<Session, DomainError> {
        let entry = self
            .entry_or_insert_with(user_id, || Session::new(user_id.clone()))
            .await;
        let session = entry.lock().await.clone();
        Ok(session)
    }

    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let entry = self
            .entry_or_insert_with(session.user_id(), || session.clone())
            .await;
        *entry.lock().await = session.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::ConversationState;

    fn user() -> UserId {
        UserId::new("5567999990000").unwrap()
    }

    #[tokio::test]
    async fn get_or_create_persists_a_fresh_session() {
        let store = InMemorySessionStore::new();
        assert!(store.get(&user()).await.unwrap().is_none());

        let session = store.get_or_create(&user()).await.unwrap();

        assert_eq!(session.state(), ConversationState::AwaitingLanguageSelection);
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn save_replaces_existing_session() {
        let store = InMemorySessionStore::new();
        let mut session = store.get_or_create(&user()).await.unwrap();
        session
            .transition_to(ConversationState::AwaitingLanguageResponse)
            .unwrap();

        store.save(&session).await.unwrap();

        let loaded = store.get(&user()).await.unwrap().unwrap();
        assert_eq!(loaded.state(), ConversationState::AwaitingLanguageResponse);
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn busy_session_does_not_block_other_users() {
        let store = InMemorySessionStore::new();
        let other = UserId::new("5567988887777").unwrap();
        let busy = store.get_or_create(&user()).await.unwrap();
        let entry = store.entry(busy.user_id()).await.unwrap();
        let _held = entry.lock().await;

        let saved = tokio::time::timeout(
            std::time::Duration::from_millis(100),
            store.save(&Session::new(other.clone())),
        )
        .await;

        assert!(saved.is_ok());
        assert!(store.get(&other).await.unwrap().is_some());
        assert_eq!(store.session_count().await, 2);
    }
}
