//! Database Module
//!
//! Embedded SurrealDB connection and startup seeding.

pub mod models;
pub mod repository;
pub mod seed;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "storefront";
const DATABASE: &str = "storefront";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the on-disk store under `<work_dir>/db` and select the
    /// application namespace/database.
    pub async fn new(work_dir: &Path) -> Result<Self, AppError> {
        let db_path = work_dir.join("db");
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!("Database connection established (SurrealDB RocksDB)");

        Ok(Self { db })
    }
}
