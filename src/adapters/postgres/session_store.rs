//! PostgreSQL implementation of SessionStore.
//!
//! One row per user in `chat_sessions`. The cached page is stored as JSON
//! text so a selection resolves against exactly what was displayed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::error;

use crate::domain::catalog::Language;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::place::{Category, Item};
use crate::domain::session::{ConversationState, Session, SessionMode};
use crate::ports::SessionStore;

use super::database_error;

const SELECT_SESSION: &str = r#"
    SELECT user_id, state, language, mode, last_category, page_offset,
           category_total, cached_page, last_activity_at, created_at,
           recent_message_ids
    FROM chat_sessions
    WHERE user_id = $1
"#;

/// PostgreSQL implementation of SessionStore.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(SELECT_SESSION)
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("fetch session", e))?;

        row.map(|row| row_to_session(user_id, row)).transpose()
    }

    async fn get_or_create(&self, user_id: &UserId) -> Result<Session, DomainError> {
        if let Some(session) = self.get(user_id).await? {
            return Ok(session);
        }

        let fresh = Session::new(user_id.clone());
        sqlx::query(
            r#"
            INSERT INTO chat_sessions (
                user_id, state, language, mode, last_category, page_offset,
                category_total, cached_page, last_activity_at, created_at, updated_at
            ) VALUES ($1, $2, NULL, $3, NULL, 0, 0, '[]', NULL, $4, $4)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id.as_str())
        .bind(fresh.state().as_str())
        .bind(fresh.mode().as_str())
        .bind(fresh.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("create session", e))?;

        // A concurrent insert may have won; read back whatever is stored.
        Ok(self.get(user_id).await?.unwrap_or(fresh))
    }

    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let cached_page = serde_json::to_string(session.cached_page()).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to encode cached page: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO chat_sessions (
                user_id, state, language, mode, last_category, page_offset,
                category_total, cached_page, last_activity_at, created_at,
                recent_message_ids, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW())
            ON CONFLICT (user_id) DO UPDATE SET
                state = EXCLUDED.state,
                language = EXCLUDED.language,
                mode = EXCLUDED.mode,
                last_category = EXCLUDED.last_category,
                page_offset = EXCLUDED.page_offset,
                category_total = EXCLUDED.category_total,
                cached_page = EXCLUDED.cached_page,
                last_activity_at = EXCLUDED.last_activity_at,
                recent_message_ids = EXCLUDED.recent_message_ids,
                updated_at = NOW()
            "#,
        )
        .bind(session.user_id().as_str())
        .bind(session.state().as_str())
        .bind(session.language().map(|l| l.code()))
        .bind(session.mode().as_str())
        .bind(session.last_category().map(|c| c.as_str()))
        .bind(session.page_offset() as i32)
        .bind(session.category_total() as i64)
        .bind(cached_page)
        .bind(session.last_activity_at().map(|t| *t.as_datetime()))
        .bind(session.created_at().as_datetime())
        .bind(session.recent_message_ids().to_vec())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("save session", e))?;

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn column<'r, T>(row: &'r sqlx::postgres::PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

/// Rebuild a session from its row.
///
/// A row whose flow fields cannot be understood is logged and loaded as a
/// reset session rather than failing the user's conversation.
fn row_to_session(user_id: &UserId, row: sqlx::postgres::PgRow) -> Result<Session, DomainError> {
    let state: String = column(&row, "state")?;
    let language: Option<String> = column(&row, "language")?;
    let mode: String = column(&row, "mode")?;
    let last_category: Option<String> = column(&row, "last_category")?;
    let page_offset: i32 = column(&row, "page_offset")?;
    let category_total: i64 = column(&row, "category_total")?;
    let cached_page: String = column(&row, "cached_page")?;
    let last_activity_at: Option<DateTime<Utc>> = column(&row, "last_activity_at")?;
    let created_at: DateTime<Utc> = column(&row, "created_at")?;
    let recent_message_ids: Vec<String> = column(&row, "recent_message_ids")?;

    let language = language.and_then(|code| code.parse::<Language>().ok());

    let decoded = (|| {
        let state = state.parse::<ConversationState>().map_err(|e| e.to_string())?;
        let mode = mode.parse::<SessionMode>().map_err(|e| e.to_string())?;
        let last_category = last_category
            .map(|c| c.parse::<Category>())
            .transpose()
            .map_err(|e| e.to_string())?;
        let cached_page: Vec<Item> =
            serde_json::from_str(&cached_page).map_err(|e| e.to_string())?;
        Ok::<_, String>((state, mode, last_category, cached_page))
    })();

    let session = match decoded {
        Ok((state, mode, last_category, cached_page)) => Session::reconstitute(
            user_id.clone(),
            state,
            language,
            mode,
            last_category,
            page_offset.max(0) as u32,
            category_total.max(0) as u64,
            cached_page,
            last_activity_at.map(Timestamp::from_datetime),
            Timestamp::from_datetime(created_at),
        )
        .with_recent_message_ids(recent_message_ids),
        Err(reason) => {
            error!(user_id = %user_id, reason = %reason, "Corrupt session row, resetting");
            let mut session = Session::reconstitute(
                user_id.clone(),
                ConversationState::AwaitingLanguageSelection,
                language,
                SessionMode::Normal,
                None,
                0,
                0,
                Vec::new(),
                last_activity_at.map(Timestamp::from_datetime),
                Timestamp::from_datetime(created_at),
            )
            .with_recent_message_ids(recent_message_ids);
            session.reset();
            session
        }
    };

    Ok(session)
}
