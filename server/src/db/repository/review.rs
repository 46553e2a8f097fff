//! Review Repository

use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Review, ReviewCreate, ReviewUpdate};

const REVIEW_TABLE: &str = "review";
const PRODUCT_TABLE: &str = "product";

fn validate_rating(rating: u8) -> RepoResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(RepoError::Validation(
            "Rating must be between 1 and 5".into(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct ReviewRepository {
    base: BaseRepository,
}

impl ReviewRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, user: RecordId, data: ReviewCreate) -> RepoResult<Review> {
        validate_rating(data.rating)?;

        let now = Utc::now();
        let review = Review {
            id: None,
            user,
            product: parse_record_id(PRODUCT_TABLE, &data.product),
            rating: data.rating,
            comment: data.comment,
            created_at: now,
            updated_at: now,
        };
        let created: Option<Review> = self.base.db().create(REVIEW_TABLE).content(review).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create review".to_string()))
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Review>> {
        let reviews: Vec<Review> = self
            .base
            .db()
            .query("SELECT * FROM review ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(reviews)
    }

    pub async fn find_by_product(&self, product_id: &str) -> RepoResult<Vec<Review>> {
        let thing = parse_record_id(PRODUCT_TABLE, product_id);
        let reviews: Vec<Review> = self
            .base
            .db()
            .query("SELECT * FROM review WHERE product = $product ORDER BY createdAt DESC")
            .bind(("product", thing))
            .await?
            .take(0)?;
        Ok(reviews)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Review>> {
        let thing = parse_record_id(REVIEW_TABLE, id);
        let review: Option<Review> = self.base.db().select(thing).await?;
        Ok(review)
    }

    pub async fn update(&self, id: &str, data: ReviewUpdate) -> RepoResult<Review> {
        if let Some(rating) = data.rating {
            validate_rating(rating)?;
        }

        let thing = parse_record_id(REVIEW_TABLE, id);
        let mut set_parts: Vec<&str> = vec!["updatedAt = $updated_at"];
        if data.rating.is_some() {
            set_parts.push("rating = $rating");
        }
        if data.comment.is_some() {
            set_parts.push("comment = $comment");
        }

        let sql = format!("UPDATE $thing SET {} RETURN AFTER", set_parts.join(", "));
        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("thing", thing))
            .bind(("updated_at", Utc::now()));
        if let Some(v) = data.rating {
            query = query.bind(("rating", v));
        }
        if let Some(v) = data.comment {
            query = query.bind(("comment", v));
        }

        let mut result = query.await?;
        let updated: Vec<Review> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Review {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing = parse_record_id(REVIEW_TABLE, id);
        let deleted: Option<Review> = self.base.db().delete(thing).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Review {} not found", id)));
        }
        Ok(())
    }
}
