//! Catalog loader port.
//!
//! Supplies localized menus and system strings. Content is read-only and
//! implementations memoize it for the process lifetime.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::catalog::{Language, MenuEntry, Texts};
use crate::domain::foundation::DomainError;

/// Port for localized conversation content.
#[async_trait]
pub trait CatalogLoader: Send + Sync {
    /// Main menu entries for a language, ordered as displayed.
    ///
    /// # Errors
    ///
    /// - `CatalogUnavailable` if the menu cannot be loaded
    async fn load_menu(&self, language: Language) -> Result<Arc<Vec<MenuEntry>>, DomainError>;

    /// System strings for a language.
    ///
    /// # Errors
    ///
    /// - `CatalogUnavailable` if the strings cannot be loaded
    async fn load_texts(&self, language: Language) -> Result<Arc<Texts>, DomainError>;
}
