//! PostgreSQL implementation of ClientRegistry over `clients`.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::ClientRegistry;

use super::database_error;

#[derive(Clone)]
pub struct PostgresClientRegistry {
    pool: PgPool,
}

impl PostgresClientRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRegistry for PostgresClientRegistry {
    async fn ensure_client(&self, user_id: &UserId, display_name: &str) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO clients (phone_number, name)
            VALUES ($1, $2)
            ON CONFLICT (phone_number) DO NOTHING
            "#,
        )
        .bind(user_id.as_str())
        .bind(display_name)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("register client", e))?;

        Ok(())
    }
}
