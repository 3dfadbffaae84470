//! In-memory feedback store. One rating per user; the latest wins.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{FeedbackRecord, FeedbackStore};

#[derive(Debug, Clone, Default)]
pub struct InMemoryFeedbackStore {
    records: Arc<RwLock<HashMap<UserId, FeedbackRecord>>>,
}

impl InMemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl FeedbackStore for InMemoryFeedbackStore {
    async fn upsert(&self, record: &FeedbackRecord) -> Result<(), DomainError> {
        self.records
            .write()
            .await
            .insert(record.user_id.clone(), record.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<FeedbackRecord>, DomainError> {
        Ok(self.records.read().await.get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::FeedbackRating;

    #[tokio::test]
    async fn upsert_keeps_latest_rating() {
        let store = InMemoryFeedbackStore::new();
        let user = UserId::new("5567999990000").unwrap();

        for value in [2, 5] {
            let rating = FeedbackRating::try_new(value).unwrap();
            store
                .upsert(&FeedbackRecord::new(user.clone(), "Ana", rating))
                .await
                .unwrap();
        }

        let stored = store.find_by_user(&user).await.unwrap().unwrap();
        assert_eq!(stored.rating.value(), 5);
        assert_eq!(store.record_count().await, 1);
    }
}
