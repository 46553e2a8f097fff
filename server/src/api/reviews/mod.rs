pub mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/reviews",
        Router::new()
            .route("/", post(handler::create).get(handler::list))
            .route("/product/{product_id}", get(handler::list_by_product))
            .route("/{id}", patch(handler::update).delete(handler::delete)),
    )
}
