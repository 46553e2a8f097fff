//! API route modules
//!
//! One module per resource, each exposing a `router()` merged by
//! [`crate::core::build_app`].
//!
//! - [`health`] - health check
//! - [`products`] - catalog queries and admin product management
//! - [`brands`] / [`categories`] - reference data reads
//! - [`orders`] - checkout and order management
//! - [`dashboard`] - admin order aggregation view
//! - [`cart`] / [`wishlist`] / [`addresses`] / [`reviews`] - user-scoped CRUD

pub mod health;

pub mod addresses;
pub mod brands;
pub mod cart;
pub mod categories;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod wishlist;
