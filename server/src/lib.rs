//! Storefront Server - embedded e-commerce backend
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/      # config, shared state, router assembly and serving
//! ├── auth/      # trusted gateway identity extraction
//! ├── api/       # HTTP routes and handlers
//! ├── db/        # embedded SurrealDB models and repositories
//! ├── media/     # stored path ↔ public URL mapping, image store
//! └── utils/     # errors, logging
//! ```
//!
//! The catalog pipeline is the heart of the crate: filter, sort and
//! paginate products in one store query, expand brand/category links,
//! and rewrite stored media paths to public URLs on every read.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod media;
pub mod utils;

pub use auth::CurrentUser;
pub use core::{Config, Server, ServerState, build_app};
pub use media::{ImageStore, MediaResolver};
pub use utils::{AppError, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};
