//! Cart Item Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::Product;

/// Cart line owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: Option<RecordId>,
    pub user: RecordId,
    pub product: RecordId,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
}

/// Cart line with its product fetched, as the cart page consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemExpanded {
    pub id: Option<RecordId>,
    pub user: RecordId,
    pub product: Product,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CartItemCreate {
    pub product: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CartItemUpdate {
    pub quantity: u32,
}
