//! PostgreSQL implementation of ItemRepository.
//!
//! Each category has its own table, filled by the data collectors.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::place::{Category, Coordinates, Item};
use crate::ports::ItemRepository;

#[derive(Clone)]
pub struct PostgresItemRepository {
    pool: PgPool,
}

impl PostgresItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn table(category: Category) -> &'static str {
    match category {
        Category::Hotel => "hotels",
        Category::Restaurant => "restaurants",
        Category::Attraction => "attractions",
    }
}

fn repository_error(action: &str, category: Category, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::RepositoryError,
        format!("Failed to {}: {}", action, e),
    )
    .with_detail("category", category.as_str())
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    async fn find_page(
        &self,
        category: Category,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Item>, DomainError> {
        // Table names come from a closed set, never from input.
        let sql = format!(
            r#"
            SELECT name, address, phone_number, rating, user_ratings_total, lat, lng, photos
            FROM {}
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
            table(category)
        );

        let rows = sqlx::query(&sql)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| repository_error("fetch items", category, e))?;

        rows.into_iter()
            .map(|row| row_to_item(row).map_err(|e| repository_error("decode item", category, e)))
            .collect()
    }

    async fn count(&self, category: Category) -> Result<u64, DomainError> {
        let sql = format!("SELECT COUNT(*) FROM {}", table(category));
        let result: (i64,) = sqlx::query_as(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| repository_error("count items", category, e))?;

        Ok(result.0.max(0) as u64)
    }
}

fn row_to_item(row: sqlx::postgres::PgRow) -> Result<Item, sqlx::Error> {
    let lat: Option<f64> = row.try_get("lat")?;
    let lng: Option<f64> = row.try_get("lng")?;
    let rating_count: Option<i32> = row.try_get("user_ratings_total")?;
    let photos: Option<Vec<String>> = row.try_get("photos")?;

    Ok(Item {
        name: row.try_get("name")?,
        address: row.try_get::<Option<String>, _>("address")?.unwrap_or_default(),
        phone_number: row.try_get("phone_number")?,
        rating: row.try_get("rating")?,
        rating_count: rating_count.map(|n| n.max(0) as u32),
        coordinates: lat.zip(lng).map(|(lat, lng)| Coordinates::new(lat, lng)),
        photo_urls: photos.unwrap_or_default(),
    })
}
