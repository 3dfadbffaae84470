//! Item repository port (read side).
//!
//! Paginated access to the hotel, restaurant and attraction collections.
//! The data is owned by the collection pipeline; the conversation only reads.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::place::{Category, Item};

/// Read port over the place collections.
///
/// Implementations must return items in a stable order so that the same
/// offset yields the same slice while the data is unchanged.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Fetch up to `limit` items of a category starting at `offset`.
    ///
    /// # Errors
    ///
    /// - `RepositoryError` if the backing store cannot be queried
    async fn find_page(
        &self,
        category: Category,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Item>, DomainError>;

    /// Total number of items in a category.
    async fn count(&self, category: Category) -> Result<u64, DomainError>;
}
