//! Startup seed data
//!
//! Brands and categories are reference data with no admin endpoints;
//! they are inserted once when their tables are empty.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::{BrandRepository, CategoryRepository, RepoResult};

const BRANDS: &[&str] = &[
    "Honda",
    "Yamaha",
    "Crown Motorcycle Parts",
    "Zxmco Motorcycle Accessories",
    "Hi-speed Bike Parts",
    "United Bike Parts",
    "Road Prince Bike Parts",
    "Union Star Motorcycle Parts",
    "Unique bike spare parts",
    "Ravi motorcycle parts",
];

const CATEGORIES: &[&str] = &[
    "Genuine Honda Bike Parts",
    "Modification Parts",
    "Fuel Tanks",
    "Vendor Parts",
    "Others",
];

/// Seed brands and categories when empty. Idempotent across restarts.
pub async fn seed_reference_data(db: &Surreal<Db>) -> RepoResult<()> {
    let brand_repo = BrandRepository::new(db.clone());
    if brand_repo.count().await? == 0 {
        for name in BRANDS {
            brand_repo.create(name).await?;
        }
        tracing::info!(count = BRANDS.len(), "Brand seeded successfully");
    }

    let category_repo = CategoryRepository::new(db.clone());
    if category_repo.count().await? == 0 {
        for name in CATEGORIES {
            category_repo.create(name).await?;
        }
        tracing::info!(count = CATEGORIES.len(), "Category seeded successfully");
    }

    Ok(())
}
