//! Review API Handlers
//!
//! Reading reviews for a product is public. Writing is authenticated
//! and a review can only be edited or removed by its author or an
//! admin.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Review, ReviewCreate, ReviewUpdate};
use crate::db::repository::ReviewRepository;
use crate::utils::{AppError, AppResult};

/// POST /api/reviews - author a review
pub async fn create(
    user: CurrentUser,
    State(state): State<ServerState>,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let repo = ReviewRepository::new(state.db.clone());
    let review = repo.create(user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /api/reviews - all reviews, admin only
pub async fn list(
    user: CurrentUser,
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<Review>>> {
    user.require_admin()?;
    let repo = ReviewRepository::new(state.db.clone());
    let reviews = repo.find_all().await?;
    Ok(Json(reviews))
}

/// GET /api/reviews/product/:product_id - public read per product
pub async fn list_by_product(
    State(state): State<ServerState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<Vec<Review>>> {
    let repo = ReviewRepository::new(state.db.clone());
    let reviews = repo.find_by_product(&product_id).await?;
    Ok(Json(reviews))
}

/// PATCH /api/reviews/:id - edit rating/comment, author or admin
pub async fn update(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ReviewUpdate>,
) -> AppResult<Json<Review>> {
    let repo = ReviewRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Review {} not found", id)))?;
    if !user.can_access(&existing.user) {
        return Err(AppError::forbidden("Cannot modify another user's review"));
    }

    let review = repo.update(&id, payload).await?;
    Ok(Json(review))
}

/// DELETE /api/reviews/:id - remove a review, author or admin
pub async fn delete(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let repo = ReviewRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Review {} not found", id)))?;
    if !user.can_access(&existing.user) {
        return Err(AppError::forbidden("Cannot modify another user's review"));
    }

    repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
