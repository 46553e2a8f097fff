pub mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/orders",
        Router::new()
            .route("/", post(handler::create).get(handler::list))
            .route("/user/{user_id}", get(handler::list_by_user))
            .route(
                "/{id}",
                get(handler::get_by_id).patch(handler::update_status),
            ),
    )
}
