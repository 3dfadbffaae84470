//! Feedback store port.
//!
//! Keeps the latest service rating of each user.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FeedbackRating, Timestamp, UserId};

/// A user's rating of the service. One record per user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRecord {
    pub user_id: UserId,
    pub display_name: String,
    pub rating: FeedbackRating,
    pub recorded_at: Timestamp,
}

impl FeedbackRecord {
    pub fn new(user_id: UserId, display_name: impl Into<String>, rating: FeedbackRating) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            rating,
            recorded_at: Timestamp::now(),
        }
    }
}

/// Port for persisting feedback.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Insert or replace the user's rating; the latest rating wins.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn upsert(&self, record: &FeedbackRecord) -> Result<(), DomainError>;

    /// The stored rating of a user, if any.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<FeedbackRecord>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn FeedbackStore) {}
    }
}
