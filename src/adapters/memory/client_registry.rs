//! In-memory client registry.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::ClientRegistry;

/// Known contacts and the name they were first seen with.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClientRegistry {
    clients: Arc<RwLock<HashMap<UserId, String>>>,
}

impl InMemoryClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, user_id: &UserId) -> bool {
        self.clients.read().await.contains_key(user_id)
    }

    pub async fn name_of(&self, user_id: &UserId) -> Option<String> {
        self.clients.read().await.get(user_id).cloned()
    }
}

#[async_trait]
impl ClientRegistry for InMemoryClientRegistry {
    async fn ensure_client(&self, user_id: &UserId, display_name: &str) -> Result<(), DomainError> {
        self.clients
            .write()
            .await
            .entry(user_id.clone())
            .or_insert_with(|| display_name.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_client_is_idempotent() {
        let registry = InMemoryClientRegistry::new();
        let user = UserId::new("5567999990000").unwrap();

        registry.ensure_client(&user, "Ana").await.unwrap();
        registry.ensure_client(&user, "Ana Maria").await.unwrap();

        assert_eq!(registry.name_of(&user).await.as_deref(), Some("Ana"));
    }
}
