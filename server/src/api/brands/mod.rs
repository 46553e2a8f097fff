pub mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/brands",
        Router::new()
            .route("/", get(handler::list))
            .route("/{id}", get(handler::get_by_id)),
    )
}
