//! Brand API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::Brand;
use crate::db::repository::BrandRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/brands - all brands
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Brand>>> {
    let repo = BrandRepository::new(state.db.clone());
    let brands = repo.find_all().await?;
    Ok(Json(brands))
}

/// GET /api/brands/:id - single brand
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Brand>> {
    let repo = BrandRepository::new(state.db.clone());
    let brand = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Brand {} not found", id)))?;
    Ok(Json(brand))
}
