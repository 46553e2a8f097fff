pub mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/address",
        Router::new()
            .route("/", post(handler::create))
            .route("/user/{user_id}", get(handler::list_by_user))
            .route("/{id}", patch(handler::update).delete(handler::delete)),
    )
}
