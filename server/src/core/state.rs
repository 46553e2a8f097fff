//! Server state
//!
//! Shared, cheap-to-clone handle passed to every handler.

use std::fs;
use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::{DbService, seed};
use crate::media::{ImageStore, MediaResolver};
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// Stored path ↔ public URL mapping
    pub media: MediaResolver,
    /// Uploaded image persistence
    pub images: ImageStore,
}

impl ServerState {
    /// Create the work directory, open the database and seed
    /// reference data.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let work_dir = Path::new(&config.work_dir);
        fs::create_dir_all(work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {}", e)))?;

        let db_service = DbService::new(work_dir).await?;
        seed::seed_reference_data(&db_service.db).await?;

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
            media: MediaResolver::new(&config.public_base_url),
            images: ImageStore::new(&config.work_dir),
        })
    }
}
