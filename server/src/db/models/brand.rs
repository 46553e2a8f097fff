//! Brand Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Brand record. Immutable after seed; referenced by products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    pub id: Option<RecordId>,
    pub name: String,
}
