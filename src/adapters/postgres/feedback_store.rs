//! PostgreSQL implementation of FeedbackStore over `evaluations`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, FeedbackRating, Timestamp, UserId};
use crate::ports::{FeedbackRecord, FeedbackStore};

use super::database_error;

#[derive(Clone)]
pub struct PostgresFeedbackStore {
    pool: PgPool,
}

impl PostgresFeedbackStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackStore for PostgresFeedbackStore {
    async fn upsert(&self, record: &FeedbackRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO evaluations (phone_number, client_name, rating, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (phone_number) DO UPDATE SET
                client_name = EXCLUDED.client_name,
                rating = EXCLUDED.rating,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(record.user_id.as_str())
        .bind(&record.display_name)
        .bind(record.rating.value() as i16)
        .bind(record.recorded_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("upsert evaluation", e))?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<FeedbackRecord>, DomainError> {
        let row = sqlx::query(
            "SELECT client_name, rating, updated_at FROM evaluations WHERE phone_number = $1",
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("fetch evaluation", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let name: String = row
            .try_get("client_name")
            .map_err(|e| database_error("decode evaluation", e))?;
        let rating: i16 = row
            .try_get("rating")
            .map_err(|e| database_error("decode evaluation", e))?;
        let updated_at: DateTime<Utc> = row
            .try_get("updated_at")
            .map_err(|e| database_error("decode evaluation", e))?;

        let rating = FeedbackRating::try_new(rating as i64).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Stored rating invalid: {}", e))
        })?;

        Ok(Some(FeedbackRecord {
            user_id: user_id.clone(),
            display_name: name,
            rating,
            recorded_at: Timestamp::from_datetime(updated_at),
        }))
    }
}
