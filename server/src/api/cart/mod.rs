pub mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/cart",
        Router::new()
            .route("/", post(handler::create))
            .route(
                "/user/{user_id}",
                get(handler::list_by_user).delete(handler::clear),
            )
            .route("/{id}", patch(handler::update).delete(handler::delete)),
    )
}
