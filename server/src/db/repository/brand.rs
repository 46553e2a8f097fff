//! Brand Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::Brand;

const BRAND_TABLE: &str = "brand";

#[derive(Clone)]
pub struct BrandRepository {
    base: BaseRepository,
}

impl BrandRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Brand>> {
        let brands: Vec<Brand> = self
            .base
            .db()
            .query("SELECT * FROM brand ORDER BY name")
            .await?
            .take(0)?;
        Ok(brands)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Brand>> {
        let thing = parse_record_id(BRAND_TABLE, id);
        let brand: Option<Brand> = self.base.db().select(thing).await?;
        Ok(brand)
    }

    pub async fn count(&self) -> RepoResult<u64> {
        #[derive(serde::Deserialize)]
        struct CountRow {
            total: u64,
        }
        let count: Option<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS total FROM brand GROUP ALL")
            .await?
            .take(0)?;
        Ok(count.map(|c| c.total).unwrap_or(0))
    }

    /// Used by the startup seed only; brands are immutable afterwards.
    pub async fn create(&self, name: &str) -> RepoResult<Brand> {
        let brand = Brand {
            id: None,
            name: name.to_string(),
        };
        let created: Option<Brand> = self.base.db().create(BRAND_TABLE).content(brand).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create brand".to_string()))
    }
}
