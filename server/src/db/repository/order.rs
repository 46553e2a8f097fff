//! Order Repository
//!
//! Checkout writes and expanded reads. The order total is computed
//! here from authoritative product prices; any client-sent total is a
//! display hint and never persisted.

use chrono::Utc;
use rust_decimal::Decimal;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Order, OrderCreate, OrderExpanded, OrderItem, OrderStatus, Product};

const ORDER_TABLE: &str = "order";
const PRODUCT_TABLE: &str = "product";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create an order at checkout. Every line item's product must
    /// resolve; the total is the sum of discounted unit prices times
    /// quantities, rounded to two decimal places.
    pub async fn create(&self, user: RecordId, data: OrderCreate) -> RepoResult<OrderExpanded> {
        if data.items.is_empty() {
            return Err(RepoError::Validation(
                "Order must contain at least one item".into(),
            ));
        }

        let hundred = Decimal::from(100);
        let mut items = Vec::with_capacity(data.items.len());
        let mut total = Decimal::ZERO;
        for input in &data.items {
            let thing = parse_record_id(PRODUCT_TABLE, &input.product);
            let product: Option<Product> = self.base.db().select(thing.clone()).await?;
            let product = product.ok_or_else(|| {
                RepoError::NotFound(format!("Product {} not found", input.product))
            })?;

            let unit = product.price * (Decimal::ONE - product.discount_percentage / hundred);
            total += unit * Decimal::from(input.quantity);
            items.push(OrderItem {
                product: thing,
                quantity: input.quantity,
            });
        }

        let order = Order {
            id: None,
            user,
            items,
            total: total.round_dp(2),
            address: data.address,
            payment_mode: data.payment_mode,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };

        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(order).await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))?;
        let id = created
            .id
            .ok_or_else(|| RepoError::Database("Created order has no id".to_string()))?;

        self.find_by_id(&id.to_string())
            .await?
            .ok_or_else(|| RepoError::Database("Created order not readable".to_string()))
    }

    /// All orders, newest first, line-item products fetched
    pub async fn find_all(&self) -> RepoResult<Vec<OrderExpanded>> {
        let orders: Vec<OrderExpanded> = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY createdAt DESC FETCH items.product")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// One user's orders, newest first
    pub async fn find_by_user(&self, user: &RecordId) -> RepoResult<Vec<OrderExpanded>> {
        let orders: Vec<OrderExpanded> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE user = $user ORDER BY createdAt DESC FETCH items.product")
            .bind(("user", user.clone()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<OrderExpanded>> {
        let thing = parse_record_id(ORDER_TABLE, id);
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order WHERE id = $id FETCH items.product")
            .bind(("id", thing))
            .await?;
        let orders: Vec<OrderExpanded> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Admin status transition; the only post-checkout mutation.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<OrderExpanded> {
        let thing = parse_record_id(ORDER_TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status RETURN AFTER")
            .bind(("thing", thing.clone()))
            .bind(("status", status))
            .await?;
        let updated: Vec<Order> = result.take(0)?;
        if updated.is_empty() {
            return Err(RepoError::NotFound(format!("Order {} not found", id)));
        }

        self.find_by_id(&thing.to_string())
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
