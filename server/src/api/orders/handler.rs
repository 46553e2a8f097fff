//! Order API Handlers
//!
//! Checkout computes the order total server side from current product
//! prices. Any total supplied by the client is ignored.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{OrderCreate, OrderExpanded, OrderStatusUpdate};
use crate::db::repository::{OrderRepository, parse_record_id};
use crate::utils::{AppError, AppResult};

/// POST /api/orders - checkout for the authenticated user
pub async fn create(
    user: CurrentUser,
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<OrderExpanded>)> {
    let repo = OrderRepository::new(state.db.clone());
    let mut order = repo.create(user.id, payload).await?;
    state.media.rewrite_order(&mut order);
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders - all orders, admin only
pub async fn list(
    user: CurrentUser,
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<OrderExpanded>>> {
    user.require_admin()?;
    let repo = OrderRepository::new(state.db.clone());
    let mut orders = repo.find_all().await?;
    for order in &mut orders {
        state.media.rewrite_order(order);
    }
    Ok(Json(orders))
}

/// GET /api/orders/user/:user_id - orders for one user, owner or admin
pub async fn list_by_user(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<OrderExpanded>>> {
    let owner = parse_record_id("user", &user_id);
    if !user.can_access(&owner) {
        return Err(AppError::forbidden("Cannot view another user's orders"));
    }
    let repo = OrderRepository::new(state.db.clone());
    let mut orders = repo.find_by_user(&owner).await?;
    for order in &mut orders {
        state.media.rewrite_order(order);
    }
    Ok(Json(orders))
}

/// GET /api/orders/:id - single order, owner or admin
pub async fn get_by_id(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderExpanded>> {
    let repo = OrderRepository::new(state.db.clone());
    let mut order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    if !user.can_access(&order.user) {
        return Err(AppError::forbidden("Cannot view another user's order"));
    }
    state.media.rewrite_order(&mut order);
    Ok(Json(order))
}

/// PATCH /api/orders/:id - update order status, admin only
pub async fn update_status(
    user: CurrentUser,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<OrderExpanded>> {
    user.require_admin()?;
    let repo = OrderRepository::new(state.db.clone());
    let mut order = repo.update_status(&id, payload.status).await?;
    state.media.rewrite_order(&mut order);
    Ok(Json(order))
}
