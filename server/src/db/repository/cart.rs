//! Cart Repository

use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{CartItem, CartItemCreate, CartItemExpanded};

const CART_TABLE: &str = "cart_item";
const PRODUCT_TABLE: &str = "product";

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(
        &self,
        user: RecordId,
        data: CartItemCreate,
    ) -> RepoResult<CartItemExpanded> {
        if data.quantity == 0 {
            return Err(RepoError::Validation("Quantity must be at least 1".into()));
        }

        let item = CartItem {
            id: None,
            user,
            product: parse_record_id(PRODUCT_TABLE, &data.product),
            quantity: data.quantity,
            created_at: Utc::now(),
        };
        let created: Option<CartItem> = self.base.db().create(CART_TABLE).content(item).await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create cart item".to_string()))?;
        let id = created
            .id
            .ok_or_else(|| RepoError::Database("Created cart item has no id".to_string()))?;

        self.find_by_id(&id.to_string())
            .await?
            .ok_or_else(|| RepoError::Database("Created cart item not readable".to_string()))
    }

    pub async fn find_by_user(&self, user: &RecordId) -> RepoResult<Vec<CartItemExpanded>> {
        let items: Vec<CartItemExpanded> = self
            .base
            .db()
            .query("SELECT * FROM cart_item WHERE user = $user ORDER BY createdAt FETCH product")
            .bind(("user", user.clone()))
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<CartItemExpanded>> {
        let thing = parse_record_id(CART_TABLE, id);
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM cart_item WHERE id = $id FETCH product")
            .bind(("id", thing))
            .await?;
        let items: Vec<CartItemExpanded> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    pub async fn update_quantity(&self, id: &str, quantity: u32) -> RepoResult<CartItemExpanded> {
        if quantity == 0 {
            return Err(RepoError::Validation("Quantity must be at least 1".into()));
        }

        let thing = parse_record_id(CART_TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET quantity = $quantity RETURN AFTER")
            .bind(("thing", thing.clone()))
            .bind(("quantity", quantity))
            .await?;
        let updated: Vec<CartItem> = result.take(0)?;
        if updated.is_empty() {
            return Err(RepoError::NotFound(format!("Cart item {} not found", id)));
        }

        self.find_by_id(&thing.to_string())
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Cart item {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing = parse_record_id(CART_TABLE, id);
        let deleted: Option<CartItem> = self.base.db().delete(thing).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Cart item {} not found", id)));
        }
        Ok(())
    }

    /// Empty a user's cart after checkout
    pub async fn clear_user(&self, user: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE cart_item WHERE user = $user")
            .bind(("user", user.clone()))
            .await?;
        Ok(())
    }
}
