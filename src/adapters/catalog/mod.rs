//! Catalog adapters - localized menus and system strings.

mod builtin;
mod database;

pub use builtin::BuiltinCatalog;
pub use database::DatabaseMenuCatalog;
