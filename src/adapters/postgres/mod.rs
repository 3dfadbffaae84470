//! PostgreSQL adapters - Database implementations of the storage ports.
//!
//! - `PostgresSessionStore` - per-user conversation sessions
//! - `PostgresItemRepository` - hotels, restaurants and attractions
//! - `PostgresFeedbackStore` - service ratings, one per user
//! - `PostgresClientRegistry` - known contacts

mod client_registry;
mod feedback_store;
mod item_repository;
mod session_store;

pub use client_registry::PostgresClientRegistry;
pub use feedback_store::PostgresFeedbackStore;
pub use item_repository::PostgresItemRepository;
pub use session_store::PostgresSessionStore;

use crate::domain::foundation::{DomainError, ErrorCode};

fn database_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}
