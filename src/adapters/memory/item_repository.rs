//! In-memory item repository.
//!
//! Items are loaded once, either from fixtures or from the JSON documents
//! produced by the collectors (`hotels.json`, `restaurants.json`,
//! `attractions.json`), and served in file order.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::place::{Category, Item};
use crate::ports::ItemRepository;

/// Read-only item catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    items: Arc<HashMap<Category, Vec<Item>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one item to a category.
    pub fn with_item(self, category: Category, item: Item) -> Self {
        self.with_items(category, vec![item])
    }

    /// Append items to a category, keeping their order.
    pub fn with_items(self, category: Category, items: Vec<Item>) -> Self {
        let mut map = Arc::try_unwrap(self.items).unwrap_or_else(|shared| (*shared).clone());
        map.entry(category).or_default().extend(items);
        Self {
            items: Arc::new(map),
        }
    }

    /// Load every category from `<dir>/<category>.json`.
    ///
    /// A missing file leaves the category empty.
    ///
    /// # Errors
    ///
    /// - `RepositoryError` if a file exists but cannot be read or parsed
    pub async fn load_dir(dir: &Path) -> Result<Self, DomainError> {
        let mut repository = Self::new();
        for category in Category::ALL {
            let path = dir.join(format!("{}.json", file_stem(category)));
            if !fs::try_exists(&path).await.unwrap_or(false) {
                warn!(path = %path.display(), "Item file missing, category left empty");
                continue;
            }

            let raw = fs::read_to_string(&path).await.map_err(|e| {
                DomainError::new(ErrorCode::RepositoryError, format!("Failed to read items: {}", e))
                    .with_detail("path", path.display().to_string())
            })?;
            let items: Vec<Item> = serde_json::from_str(&raw).map_err(|e| {
                DomainError::new(ErrorCode::RepositoryError, format!("Invalid item file: {}", e))
                    .with_detail("path", path.display().to_string())
            })?;

            info!(category = category.as_str(), count = items.len(), "Loaded items");
            repository = repository.with_items(category, items);
        }
        Ok(repository)
    }
}

fn file_stem(category: Category) -> &'static str {
    match category {
        Category::Hotel => "hotels",
        Category::Restaurant => "restaurants",
        Category::Attraction => "attractions",
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn find_page(
        &self,
        category: Category,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Item>, DomainError> {
        let items = self.items.get(&category).map(Vec::as_slice).unwrap_or_default();
        Ok(items
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, category: Category) -> Result<u64, DomainError> {
        Ok(self.items.get(&category).map_or(0, Vec::len) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[tokio::test]
    async fn find_page_slices_in_insertion_order() {
        let repo = InMemoryItemRepository::new().with_items(
            Category::Restaurant,
            (1..=7).map(|n| Item::named(format!("R{}", n))).collect(),
        );

        let second = repo.find_page(Category::Restaurant, 5, 5).await.unwrap();

        assert_eq!(names(&second), vec!["R6", "R7"]);
        assert_eq!(repo.count(Category::Restaurant).await.unwrap(), 7);
        assert_eq!(repo.count(Category::Hotel).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn load_dir_reads_collector_documents() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("hotels.json"),
            r#"[{"name":"Hotel Azul","address":"Rua 1","phoneNumber":"+55 67 3333-0000",
                "rating":4.5,"user_ratings_total":120,
                "coordinates":{"lat":-19.0,"lng":-57.65},
                "photos":["https://img/1.jpg"]}]"#,
        )
        .unwrap();

        let repo = InMemoryItemRepository::load_dir(dir.path()).await.unwrap();

        let hotels = repo.find_page(Category::Hotel, 0, 5).await.unwrap();
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].rating_count, Some(120));
        assert_eq!(hotels[0].phone_number.as_deref(), Some("+55 67 3333-0000"));
        assert_eq!(repo.count(Category::Attraction).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn load_dir_rejects_malformed_documents() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("restaurants.json"), "{not json").unwrap();

        let err = InMemoryItemRepository::load_dir(dir.path()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::RepositoryError);
    }
}
