//! In-memory adapters for running without a database and for tests.

mod client_registry;
mod feedback_store;
mod item_repository;
mod session_store;

pub use client_registry::InMemoryClientRegistry;
pub use feedback_store::InMemoryFeedbackStore;
pub use item_repository::InMemoryItemRepository;
pub use session_store::InMemorySessionStore;
