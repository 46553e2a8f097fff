//! Server Implementation
//!
//! Router assembly and HTTP serving.

use std::path::Path;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::core::{Config, ServerState};
use crate::utils::AppError;

/// HTTP request log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        // Catalog APIs
        .merge(crate::api::products::router())
        .merge(crate::api::brands::router())
        .merge(crate::api::categories::router())
        // Shopping APIs
        .merge(crate::api::cart::router())
        .merge(crate::api::wishlist::router())
        .merge(crate::api::addresses::router())
        .merge(crate::api::reviews::router())
        // Orders and admin dashboard
        .merge(crate::api::orders::router())
        .merge(crate::api::dashboard::router())
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> Result<(), AppError> {
        let uploads_dir = Path::new(&self.config.work_dir).join("uploads");

        let app = build_app()
            // Stored media is plain static files under the work dir
            .nest_service("/uploads", ServeDir::new(uploads_dir))
            .with_state(self.state.clone())
            .layer(CorsLayer::permissive())
            .layer(CompressionLayer::new())
            .layer(middleware::from_fn(log_request));

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Storefront server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await
            .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}
