//! Product API Handlers
//!
//! The catalog pipeline endpoints: every response goes through the
//! media resolver so thumbnails and images always carry public URLs.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{AppendHeaders, IntoResponse},
};
use serde::Deserialize;

use super::form;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::ProductExpanded;
use crate::db::repository::{CatalogQuery, ProductRepository, SortDirection, parse_record_id};
use crate::utils::{AppError, AppResult};

/// Header carrying the filter-wide match count on list responses
const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Query parameters for the catalog list. `brand` and `category` may
/// repeat (`?brand=a&brand=b`).
#[derive(Debug, Deserialize)]
pub struct CatalogListParams {
    #[serde(default)]
    pub brand: Vec<String>,
    #[serde(default)]
    pub category: Vec<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
    pub order: Option<String>,
    #[serde(rename = "includeDeleted", default)]
    pub include_deleted: bool,
}

impl CatalogListParams {
    fn into_query(self) -> CatalogQuery {
        CatalogQuery {
            brands: self
                .brand
                .iter()
                .map(|b| parse_record_id("brand", b))
                .collect(),
            categories: self
                .category
                .iter()
                .map(|c| parse_record_id("category", c))
                .collect(),
            include_deleted: self.include_deleted,
            page: self.page.unwrap_or(1).max(1),
            limit: self.limit.unwrap_or(10).max(1),
            sort: self.sort.unwrap_or_else(|| "createdAt".to_string()),
            direction: match self.order.as_deref() {
                Some("asc") => SortDirection::Ascending,
                _ => SortDirection::Descending,
            },
        }
    }
}

/// GET /api/products - filtered, sorted, paginated catalog page.
/// Total match count travels in the x-total-count header.
pub async fn list(
    State(state): State<ServerState>,
    user: Option<CurrentUser>,
    axum_extra::extract::Query(params): axum_extra::extract::Query<CatalogListParams>,
) -> AppResult<impl IntoResponse> {
    // Soft-deleted products are admin-only
    if params.include_deleted {
        user.ok_or(AppError::Unauthorized)?.require_admin()?;
    }

    let repo = ProductRepository::new(state.db.clone());
    let page = repo.list(&params.into_query()).await?;

    let products: Vec<ProductExpanded> = page
        .products
        .into_iter()
        .map(|p| state.media.rewrite_product(p))
        .collect();

    Ok((
        AppendHeaders([(TOTAL_COUNT_HEADER, page.total.to_string())]),
        Json(products),
    ))
}

/// GET /api/products/:id - single expanded product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductExpanded>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(Json(state.media.rewrite_product(product)))
}

/// POST /api/products - create a product from a multipart form
/// (scalars + image files + optional thumbnail file)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ProductExpanded>)> {
    user.require_admin()?;

    let collected = form::collect_form(multipart, &state.images).await?;
    let payload = match form::build_create(&collected, &state.media) {
        Ok(payload) => payload,
        Err(e) => {
            // Files already hit the disk while draining the stream;
            // a rejected form must not leave them behind
            for path in collected.stored_paths() {
                state.images.remove(&path);
            }
            return Err(e);
        }
    };

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(state.media.rewrite_product(product)),
    ))
}

/// PATCH /api/products/:id - partial update from a multipart form.
/// Retained image URLs come in `existingImages`; new files append
/// after them.
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<ProductExpanded>> {
    user.require_admin()?;

    let collected = form::collect_form(multipart, &state.images).await?;
    let payload = match form::build_update(&collected, &state.media) {
        Ok(payload) => payload,
        Err(e) => {
            for path in collected.stored_paths() {
                state.images.remove(&path);
            }
            return Err(e);
        }
    };

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.update(&id, payload).await?;

    Ok(Json(state.media.rewrite_product(product)))
}

/// DELETE /api/products/:id - hard delete (admin cleanup path);
/// returns the record as it was before removal
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ProductExpanded>> {
    user.require_admin()?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.delete(&id).await?;
    Ok(Json(state.media.rewrite_product(product)))
}

/// PATCH /api/products/undelete/:id - clear the soft-delete flag
pub async fn undelete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ProductExpanded>> {
    user.require_admin()?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.undelete(&id).await?;
    Ok(Json(state.media.rewrite_product(product)))
}
