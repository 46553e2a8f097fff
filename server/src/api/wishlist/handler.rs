//! Wishlist API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{WishlistItemCreate, WishlistItemExpanded, WishlistItemUpdate};
use crate::db::repository::{WishlistRepository, parse_record_id};
use crate::utils::{AppError, AppResult};

/// POST /api/wishlist - add a product to the caller's wishlist
pub async fn create(
    user: CurrentUser,
    State(state): State<ServerState>,
    Json(payload): Json<WishlistItemCreate>,
) -> AppResult<(StatusCode, Json<WishlistItemExpanded>)> {
    let repo = WishlistRepository::new(state.db.clone());
    let mut item = repo.create(user.id, payload).await?;
    state.media.rewrite_wishlist_item(&mut item);
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/wishlist/user/:user_id - one user's wishlist, owner or admin
pub async fn list_by_user(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<WishlistItemExpanded>>> {
    let owner = parse_record_id("user", &user_id);
    if !user.can_access(&owner) {
        return Err(AppError::forbidden("Cannot view another user's wishlist"));
    }
    let repo = WishlistRepository::new(state.db.clone());
    let mut items = repo.find_by_user(&owner).await?;
    for item in &mut items {
        state.media.rewrite_wishlist_item(item);
    }
    Ok(Json(items))
}

/// PATCH /api/wishlist/:id - update the note, owner or admin
pub async fn update(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<WishlistItemUpdate>,
) -> AppResult<Json<WishlistItemExpanded>> {
    let repo = WishlistRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Wishlist item {} not found", id)))?;
    if !user.can_access(&existing.user) {
        return Err(AppError::forbidden("Cannot modify another user's wishlist"));
    }

    let mut item = repo.update_note(&id, payload.note).await?;
    state.media.rewrite_wishlist_item(&mut item);
    Ok(Json(item))
}

/// DELETE /api/wishlist/:id - remove an item, owner or admin
pub async fn delete(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let repo = WishlistRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Wishlist item {} not found", id)))?;
    if !user.can_access(&existing.user) {
        return Err(AppError::forbidden("Cannot modify another user's wishlist"));
    }

    repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
