//! Product Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::{Brand, Category};

pub type ProductId = RecordId;

/// Product record as stored: brand/category are record links,
/// thumbnail/images hold bare relative file paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Option<ProductId>,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub discount_percentage: Decimal,
    pub stock_quantity: u32,
    /// Record link to category
    pub category: RecordId,
    /// Record link to brand
    pub brand: RecordId,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product with brand/category expanded to embedded records (FETCH).
///
/// This is the read shape every product endpoint returns, after the
/// media resolver has rewritten thumbnail/images to public URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductExpanded {
    pub id: Option<ProductId>,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub discount_percentage: Decimal,
    pub stock_quantity: u32,
    pub category: Category,
    pub brand: Brand,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a product. Image/thumbnail values are stored
/// relative paths already written by the image store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub discount_percentage: Decimal,
    pub stock_quantity: u32,
    pub category: RecordId,
    pub brand: RecordId,
    pub thumbnail: Option<String>,
    pub images: Vec<String>,
}

/// Partial update. `None` means "leave unchanged"; `images` replaces
/// the whole list (retained + newly uploaded, merged by the handler).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub discount_percentage: Option<Decimal>,
    pub stock_quantity: Option<u32>,
    pub category: Option<RecordId>,
    pub brand: Option<RecordId>,
    pub thumbnail: Option<String>,
    pub images: Option<Vec<String>>,
    pub is_deleted: Option<bool>,
}
