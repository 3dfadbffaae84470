//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the conversation core and the outside world. Adapters implement these ports.
//!
//! ## Conversation State
//!
//! - `SessionStore` - Per-user session records
//!
//! ## Content
//!
//! - `ItemRepository` - Paginated place collections
//! - `CatalogLoader` - Localized menus and strings
//!
//! ## Side Effects
//!
//! - `MessageSender` - Outbound texts and media
//! - `FeedbackStore` - Latest rating per user
//! - `ClientRegistry` - Contact registration

mod catalog_loader;
mod client_registry;
mod feedback_store;
mod item_repository;
mod message_sender;
mod session_store;

pub use catalog_loader::CatalogLoader;
pub use client_registry::ClientRegistry;
pub use feedback_store::{FeedbackRecord, FeedbackStore};
pub use item_repository::ItemRepository;
pub use message_sender::MessageSender;
pub use session_store::SessionStore;
