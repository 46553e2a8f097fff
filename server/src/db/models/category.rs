//! Category Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Category record. Immutable after seed; referenced by products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<RecordId>,
    pub name: String,
}
