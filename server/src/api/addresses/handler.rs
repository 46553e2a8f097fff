//! Address API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Address, AddressCreate, AddressUpdate};
use crate::db::repository::{AddressRepository, parse_record_id};
use crate::utils::{AppError, AppResult};

/// POST /api/address - add an address for the caller
pub async fn create(
    user: CurrentUser,
    State(state): State<ServerState>,
    Json(payload): Json<AddressCreate>,
) -> AppResult<(StatusCode, Json<Address>)> {
    let repo = AddressRepository::new(state.db.clone());
    let address = repo.create(user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(address)))
}

/// GET /api/address/user/:user_id - one user's addresses, owner or admin
pub async fn list_by_user(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Address>>> {
    let owner = parse_record_id("user", &user_id);
    if !user.can_access(&owner) {
        return Err(AppError::forbidden("Cannot view another user's addresses"));
    }
    let repo = AddressRepository::new(state.db.clone());
    let addresses = repo.find_by_user(&owner).await?;
    Ok(Json(addresses))
}

/// PATCH /api/address/:id - partial update, owner or admin
pub async fn update(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AddressUpdate>,
) -> AppResult<Json<Address>> {
    let repo = AddressRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Address {} not found", id)))?;
    if !user.can_access(&existing.user) {
        return Err(AppError::forbidden("Cannot modify another user's address"));
    }

    let address = repo.update(&id, payload).await?;
    Ok(Json(address))
}

/// DELETE /api/address/:id - remove an address, owner or admin
pub async fn delete(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let repo = AddressRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Address {} not found", id)))?;
    if !user.can_access(&existing.user) {
        return Err(AppError::forbidden("Cannot modify another user's address"));
    }

    repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
