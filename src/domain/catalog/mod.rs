//! Catalog - localized menus and system strings.
//!
//! Read-only content the conversation renders. Loading is behind the
//! `CatalogLoader` port; these are the shapes it returns.

mod language;
mod menu;
mod texts;

pub use language::Language;
pub use menu::{MenuAction, MenuEntry};
pub use texts::{Texts, CATEGORY_PLACEHOLDER, NAME_PLACEHOLDER};
