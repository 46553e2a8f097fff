//! Product Repository
//!
//! The catalog query pipeline: conjunctive filtering, pagination,
//! sorting and relational expansion in a single store round-trip,
//! plus a filter-wide count for the pagination header.

use chrono::Utc;
use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Product, ProductCreate, ProductExpanded, ProductUpdate};

const PRODUCT_TABLE: &str = "product";

/// Sort fields callers may request. Anything else degrades to the
/// store's default ordering; the list also keeps user input out of
/// the ORDER BY clause we format into the query text.
const SORTABLE_FIELDS: &[&str] = &[
    "createdAt",
    "updatedAt",
    "price",
    "title",
    "stockQuantity",
    "discountPercentage",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// A catalog list request: every filter optional, conjunctive when
/// present.
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    pub brands: Vec<RecordId>,
    pub categories: Vec<RecordId>,
    pub include_deleted: bool,
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
    pub sort: String,
    pub direction: SortDirection,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            brands: Vec::new(),
            categories: Vec::new(),
            include_deleted: false,
            page: 1,
            limit: 10,
            sort: "createdAt".to_string(),
            direction: SortDirection::Descending,
        }
    }
}

/// One page of catalog results plus the filter-wide total.
#[derive(Debug)]
pub struct CatalogPage {
    pub products: Vec<ProductExpanded>,
    /// Count of all records matching the filter, independent of page/limit.
    pub total: u64,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Build the shared WHERE clause for a catalog query. Each clause
    /// is present only when its input was supplied.
    fn where_clause(query: &CatalogQuery) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if !query.brands.is_empty() {
            parts.push("brand IN $brands");
        }
        if !query.categories.is_empty() {
            parts.push("category IN $categories");
        }
        if !query.include_deleted {
            parts.push("isDeleted = false");
        }
        if parts.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", parts.join(" AND "))
        }
    }

    /// Fetch one page of products matching the filter, expanded and
    /// sorted, plus the total match count.
    pub async fn list(&self, query: &CatalogQuery) -> RepoResult<CatalogPage> {
        let where_clause = Self::where_clause(query);

        let mut sql = format!("SELECT * FROM {}{}", PRODUCT_TABLE, where_clause);
        if SORTABLE_FIELDS.contains(&query.sort.as_str()) {
            sql.push_str(&format!(
                " ORDER BY {} {}",
                query.sort,
                query.direction.as_sql()
            ));
        } else {
            tracing::debug!(field = %query.sort, "Unknown sort field, using store default order");
        }
        sql.push_str(" LIMIT $limit START $start FETCH brand, category");

        let page = query.page.max(1);
        let limit = query.limit.max(1);
        // Offset in u64: extreme page/limit pairs overflow u32
        let start = u64::from(page - 1)
            .saturating_mul(u64::from(limit))
            .min(i64::MAX as u64) as i64;

        let products: Vec<ProductExpanded> = self
            .base
            .db()
            .query(sql)
            .bind(("brands", query.brands.clone()))
            .bind(("categories", query.categories.clone()))
            .bind(("limit", i64::from(limit)))
            .bind(("start", start))
            .await?
            .take(0)?;

        let count_sql = format!(
            "SELECT count() AS total FROM {}{} GROUP ALL",
            PRODUCT_TABLE, where_clause
        );
        let count: Option<CountRow> = self
            .base
            .db()
            .query(count_sql)
            .bind(("brands", query.brands.clone()))
            .bind(("categories", query.categories.clone()))
            .await?
            .take(0)?;

        Ok(CatalogPage {
            products,
            total: count.map(|c| c.total).unwrap_or(0),
        })
    }

    /// Find a product by id with brand/category fetched
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<ProductExpanded>> {
        let thing = parse_record_id(PRODUCT_TABLE, id);
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product WHERE id = $id FETCH brand, category")
            .bind(("id", thing))
            .await?;
        let products: Vec<ProductExpanded> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Create a product. Rejects an empty image list before touching
    /// the store.
    pub async fn create(&self, data: ProductCreate) -> RepoResult<ProductExpanded> {
        if data.images.is_empty() {
            return Err(RepoError::Validation("No images uploaded".into()));
        }

        let now = Utc::now();
        let product = Product {
            id: None,
            title: data.title,
            description: data.description,
            price: data.price,
            discount_percentage: data.discount_percentage,
            stock_quantity: data.stock_quantity,
            category: data.category,
            brand: data.brand,
            thumbnail: data.thumbnail,
            images: data.images,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))?;

        let id = created
            .id
            .ok_or_else(|| RepoError::Database("Created product has no id".to_string()))?;
        self.find_by_id(&id.to_string())
            .await?
            .ok_or_else(|| RepoError::Database("Created product not readable".to_string()))
    }

    /// Apply a partial update, then return the expanded record.
    /// `None` fields are left untouched.
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<ProductExpanded> {
        let thing = parse_record_id(PRODUCT_TABLE, id);

        // Build dynamic SET clauses with typed bindings
        let mut set_parts: Vec<&str> = vec!["updatedAt = $updated_at"];
        if data.title.is_some() {
            set_parts.push("title = $title");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.price.is_some() {
            set_parts.push("price = $price");
        }
        if data.discount_percentage.is_some() {
            set_parts.push("discountPercentage = $discount_percentage");
        }
        if data.stock_quantity.is_some() {
            set_parts.push("stockQuantity = $stock_quantity");
        }
        if data.category.is_some() {
            set_parts.push("category = $category");
        }
        if data.brand.is_some() {
            set_parts.push("brand = $brand");
        }
        if data.thumbnail.is_some() {
            set_parts.push("thumbnail = $thumbnail");
        }
        if data.images.is_some() {
            set_parts.push("images = $images");
        }
        if data.is_deleted.is_some() {
            set_parts.push("isDeleted = $is_deleted");
        }

        let sql = format!(
            "UPDATE $thing SET {} RETURN AFTER",
            set_parts.join(", ")
        );

        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("thing", thing.clone()))
            .bind(("updated_at", Utc::now()));

        if let Some(v) = data.title {
            query = query.bind(("title", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.price {
            query = query.bind(("price", v));
        }
        if let Some(v) = data.discount_percentage {
            query = query.bind(("discount_percentage", v));
        }
        if let Some(v) = data.stock_quantity {
            query = query.bind(("stock_quantity", v));
        }
        if let Some(v) = data.category {
            query = query.bind(("category", v));
        }
        if let Some(v) = data.brand {
            query = query.bind(("brand", v));
        }
        if let Some(v) = data.thumbnail {
            query = query.bind(("thumbnail", v));
        }
        if let Some(v) = data.images {
            query = query.bind(("images", v));
        }
        if let Some(v) = data.is_deleted {
            query = query.bind(("is_deleted", v));
        }

        let mut result = query.await?;
        let updated: Vec<Product> = result.take(0)?;
        if updated.is_empty() {
            return Err(RepoError::NotFound(format!("Product {} not found", id)));
        }

        self.find_by_id(&thing.to_string())
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Hard delete. Returns the expanded record as it was before
    /// removal, or NotFound. Refused while any order still links the
    /// product; past orders must keep resolving their line items, so
    /// retiring an ordered product goes through the soft-delete flag.
    pub async fn delete(&self, id: &str) -> RepoResult<ProductExpanded> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;

        let thing = parse_record_id(PRODUCT_TABLE, id);
        let referenced: Option<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS total FROM order WHERE items.product CONTAINS $thing GROUP ALL")
            .bind(("thing", thing.clone()))
            .await?
            .take(0)?;
        if referenced.map(|c| c.total).unwrap_or(0) > 0 {
            return Err(RepoError::Validation(format!(
                "Product {} is referenced by existing orders; mark it deleted instead",
                id
            )));
        }

        let _: Option<Product> = self.base.db().delete(thing).await?;
        Ok(existing)
    }

    /// Clear the soft-delete flag. Idempotent when already visible.
    pub async fn undelete(&self, id: &str) -> RepoResult<ProductExpanded> {
        self.update(
            id,
            ProductUpdate {
                is_deleted: Some(false),
                ..ProductUpdate::default()
            },
        )
        .await
    }
}
