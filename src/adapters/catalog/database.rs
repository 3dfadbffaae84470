//! Menu catalog backed by the `menu_options` table.
//!
//! Menus are read once per language and memoized for the process lifetime.
//! System strings always come from the built-in catalog.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::catalog::{Language, MenuEntry, Texts};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CatalogLoader;

use super::BuiltinCatalog;

pub struct DatabaseMenuCatalog {
    pool: PgPool,
    menus: RwLock<HashMap<Language, Arc<Vec<MenuEntry>>>>,
    texts: BuiltinCatalog,
}

impl DatabaseMenuCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            menus: RwLock::new(HashMap::new()),
            texts: BuiltinCatalog::new(),
        }
    }

    async fn fetch_menu(&self, language: Language) -> Result<Vec<MenuEntry>, DomainError> {
        // Exit (0) is listed last.
        let rows: Vec<(i16, String)> = sqlx::query_as(
            r#"
            SELECT option_number, description
            FROM menu_options
            WHERE language = $1
            ORDER BY (option_number = 0), option_number
            "#,
        )
        .bind(language.code())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::CatalogUnavailable,
                format!("Failed to load menu: {}", e),
            )
            .with_detail("language", language.code())
        })?;

        Ok(rows
            .into_iter()
            .filter_map(|(option, description)| {
                u8::try_from(option)
                    .ok()
                    .map(|option| MenuEntry::new(option, description))
            })
            .collect())
    }
}

#[async_trait]
impl CatalogLoader for DatabaseMenuCatalog {
    async fn load_menu(&self, language: Language) -> Result<Arc<Vec<MenuEntry>>, DomainError> {
        if let Some(menu) = self.menus.read().await.get(&language) {
            return Ok(Arc::clone(menu));
        }

        let fetched = self.fetch_menu(language).await?;
        let menu = if fetched.is_empty() {
            warn!(language = language.code(), "No menu rows, using built-in menu");
            self.texts.load_menu(language).await?
        } else {
            info!(language = language.code(), entries = fetched.len(), "Loaded menu");
            Arc::new(fetched)
        };

        let mut menus = self.menus.write().await;
        Ok(Arc::clone(menus.entry(language).or_insert(menu)))
    }

    async fn load_texts(&self, language: Language) -> Result<Arc<Texts>, DomainError> {
        self.texts.load_texts(language).await
    }
}
