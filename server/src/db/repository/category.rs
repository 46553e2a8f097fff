//! Category Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::Category;

const CATEGORY_TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category ORDER BY name")
            .await?
            .take(0)?;
        Ok(categories)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let thing = parse_record_id(CATEGORY_TABLE, id);
        let category: Option<Category> = self.base.db().select(thing).await?;
        Ok(category)
    }

    pub async fn count(&self) -> RepoResult<u64> {
        #[derive(serde::Deserialize)]
        struct CountRow {
            total: u64,
        }
        let count: Option<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS total FROM category GROUP ALL")
            .await?
            .take(0)?;
        Ok(count.map(|c| c.total).unwrap_or(0))
    }

    /// Used by the startup seed only; categories are immutable afterwards.
    pub async fn create(&self, name: &str) -> RepoResult<Category> {
        let category = Category {
            id: None,
            name: name.to_string(),
        };
        let created: Option<Category> = self
            .base
            .db()
            .create(CATEGORY_TABLE)
            .content(category)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }
}
