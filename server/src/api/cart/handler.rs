//! Cart API Handlers
//!
//! All cart lines are user-scoped; every read and mutation passes an
//! owner-or-admin check.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{CartItemCreate, CartItemExpanded, CartItemUpdate};
use crate::db::repository::{CartRepository, parse_record_id};
use crate::utils::{AppError, AppResult};

/// POST /api/cart - add a product to the caller's cart
pub async fn create(
    user: CurrentUser,
    State(state): State<ServerState>,
    Json(payload): Json<CartItemCreate>,
) -> AppResult<(StatusCode, Json<CartItemExpanded>)> {
    let repo = CartRepository::new(state.db.clone());
    let mut item = repo.create(user.id, payload).await?;
    state.media.rewrite_cart_item(&mut item);
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/cart/user/:user_id - one user's cart, owner or admin
pub async fn list_by_user(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<CartItemExpanded>>> {
    let owner = parse_record_id("user", &user_id);
    if !user.can_access(&owner) {
        return Err(AppError::forbidden("Cannot view another user's cart"));
    }
    let repo = CartRepository::new(state.db.clone());
    let mut items = repo.find_by_user(&owner).await?;
    for item in &mut items {
        state.media.rewrite_cart_item(item);
    }
    Ok(Json(items))
}

/// PATCH /api/cart/:id - change line quantity, owner or admin
pub async fn update(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CartItemUpdate>,
) -> AppResult<Json<CartItemExpanded>> {
    let repo = CartRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Cart item {} not found", id)))?;
    if !user.can_access(&existing.user) {
        return Err(AppError::forbidden("Cannot modify another user's cart"));
    }

    let mut item = repo.update_quantity(&id, payload.quantity).await?;
    state.media.rewrite_cart_item(&mut item);
    Ok(Json(item))
}

/// DELETE /api/cart/:id - remove one line, owner or admin
pub async fn delete(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let repo = CartRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Cart item {} not found", id)))?;
    if !user.can_access(&existing.user) {
        return Err(AppError::forbidden("Cannot modify another user's cart"));
    }

    repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/cart/user/:user_id - clear a user's cart after checkout
pub async fn clear(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<StatusCode> {
    let owner = parse_record_id("user", &user_id);
    if !user.can_access(&owner) {
        return Err(AppError::forbidden("Cannot clear another user's cart"));
    }
    let repo = CartRepository::new(state.db.clone());
    repo.clear_user(&owner).await?;
    Ok(StatusCode::NO_CONTENT)
}
