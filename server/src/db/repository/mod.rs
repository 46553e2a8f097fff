//! Repository Module
//!
//! Provides CRUD operations over SurrealDB tables. One repository per
//! entity, all sharing [`BaseRepository`] for the connection handle.
//!
//! ID convention: the full stack uses the `"table:id"` string form.
//! [`parse_record_id`] accepts either that form or a bare key and
//! yields a typed [`RecordId`] for binding.

pub mod address;
pub mod brand;
pub mod cart;
pub mod category;
pub mod order;
pub mod product;
pub mod review;
pub mod wishlist;

pub use address::AddressRepository;
pub use brand::BrandRepository;
pub use cart::CartRepository;
pub use category::CategoryRepository;
pub use order::OrderRepository;
pub use product::{CatalogPage, CatalogQuery, ProductRepository, SortDirection};
pub use review::ReviewRepository;
pub use wishlist::WishlistRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Build a [`RecordId`] for `table` from either a `"table:key"` string
/// or a bare key.
pub fn parse_record_id(table: &str, id: &str) -> RecordId {
    let key = id
        .strip_prefix(&format!("{}:", table))
        .unwrap_or(id)
        .trim_matches(['⟨', '⟩']);
    RecordId::from_table_key(table, key)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_prefixed_and_bare_ids() {
        assert_eq!(
            parse_record_id("product", "product:abc"),
            RecordId::from_table_key("product", "abc")
        );
        assert_eq!(
            parse_record_id("product", "abc"),
            RecordId::from_table_key("product", "abc")
        );
    }
}
