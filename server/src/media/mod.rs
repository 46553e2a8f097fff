//! Media handling
//!
//! - [`MediaResolver`] - stored relative path ↔ public URL mapping
//! - [`ImageStore`] - validates and persists uploaded image files

pub mod resolver;
pub mod store;

pub use resolver::MediaResolver;
pub use store::ImageStore;
