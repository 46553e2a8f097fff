//! Wishlist Repository

use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{WishlistItem, WishlistItemCreate, WishlistItemExpanded};

const WISHLIST_TABLE: &str = "wishlist_item";
const PRODUCT_TABLE: &str = "product";

#[derive(Clone)]
pub struct WishlistRepository {
    base: BaseRepository,
}

impl WishlistRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(
        &self,
        user: RecordId,
        data: WishlistItemCreate,
    ) -> RepoResult<WishlistItemExpanded> {
        let item = WishlistItem {
            id: None,
            user,
            product: parse_record_id(PRODUCT_TABLE, &data.product),
            note: data.note,
            created_at: Utc::now(),
        };
        let created: Option<WishlistItem> =
            self.base.db().create(WISHLIST_TABLE).content(item).await?;
        let created = created
            .ok_or_else(|| RepoError::Database("Failed to create wishlist item".to_string()))?;
        let id = created
            .id
            .ok_or_else(|| RepoError::Database("Created wishlist item has no id".to_string()))?;

        self.find_by_id(&id.to_string())
            .await?
            .ok_or_else(|| RepoError::Database("Created wishlist item not readable".to_string()))
    }

    pub async fn find_by_user(&self, user: &RecordId) -> RepoResult<Vec<WishlistItemExpanded>> {
        let items: Vec<WishlistItemExpanded> = self
            .base
            .db()
            .query(
                "SELECT * FROM wishlist_item WHERE user = $user ORDER BY createdAt FETCH product",
            )
            .bind(("user", user.clone()))
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<WishlistItemExpanded>> {
        let thing = parse_record_id(WISHLIST_TABLE, id);
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM wishlist_item WHERE id = $id FETCH product")
            .bind(("id", thing))
            .await?;
        let items: Vec<WishlistItemExpanded> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    pub async fn update_note(
        &self,
        id: &str,
        note: Option<String>,
    ) -> RepoResult<WishlistItemExpanded> {
        let thing = parse_record_id(WISHLIST_TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET note = $note RETURN AFTER")
            .bind(("thing", thing.clone()))
            .bind(("note", note))
            .await?;
        let updated: Vec<WishlistItem> = result.take(0)?;
        if updated.is_empty() {
            return Err(RepoError::NotFound(format!(
                "Wishlist item {} not found",
                id
            )));
        }

        self.find_by_id(&thing.to_string())
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Wishlist item {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing = parse_record_id(WISHLIST_TABLE, id);
        let deleted: Option<WishlistItem> = self.base.db().delete(thing).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!(
                "Wishlist item {} not found",
                id
            )));
        }
        Ok(())
    }
}
