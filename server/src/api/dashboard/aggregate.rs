//! Dashboard aggregation folds
//!
//! Four independent pure folds over an in-memory order list. Nothing
//! here persists; the dashboard recomputes on every load, which is
//! fine at the order volumes this store sees.

use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::RecordId;

use crate::db::models::{OrderExpanded, OrderStatus, PaymentMode};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyRevenue {
    /// Grouping key in `"{month}-{year}"` form, e.g. `"3-2026"`.
    pub month: String,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductQuantity {
    pub product: Option<RecordId>,
    pub title: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentCount {
    pub payment_mode: PaymentMode,
    pub count: u64,
}

/// Orders per status. Every status appears, zero counts included, so
/// chart axes stay stable.
pub fn status_counts(orders: &[OrderExpanded]) -> Vec<StatusCount> {
    const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Dispatched,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];
    ALL.into_iter()
        .map(|status| StatusCount {
            status,
            count: orders.iter().filter(|o| o.status == status).count() as u64,
        })
        .collect()
}

/// Revenue summed per calendar month of the order creation timestamp.
/// Buckets appear in first-encounter order.
pub fn monthly_revenue(orders: &[OrderExpanded]) -> Vec<MonthlyRevenue> {
    use chrono::Datelike;

    let mut buckets: Vec<MonthlyRevenue> = Vec::new();
    for order in orders {
        let key = format!("{}-{}", order.created_at.month(), order.created_at.year());
        match buckets.iter_mut().find(|b| b.month == key) {
            Some(bucket) => bucket.revenue += order.total,
            None => buckets.push(MonthlyRevenue {
                month: key,
                revenue: order.total,
            }),
        }
    }
    buckets
}

/// Top `n` products by summed quantity across all line items,
/// grouped by product record id so same-titled products stay
/// distinct. Ties keep first-encounter order (stable sort over
/// encounter-ordered accumulation).
pub fn top_products(orders: &[OrderExpanded], n: usize) -> Vec<ProductQuantity> {
    let mut totals: Vec<ProductQuantity> = Vec::new();
    for order in orders {
        for item in &order.items {
            match totals.iter_mut().find(|t| t.product == item.product.id) {
                Some(entry) => entry.quantity += u64::from(item.quantity),
                None => totals.push(ProductQuantity {
                    product: item.product.id.clone(),
                    title: item.product.title.clone(),
                    quantity: u64::from(item.quantity),
                }),
            }
        }
    }
    totals.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    totals.truncate(n);
    totals
}

/// Orders per payment mode, zero counts included.
pub fn payment_counts(orders: &[OrderExpanded]) -> Vec<PaymentCount> {
    const ALL: [PaymentMode; 2] = [PaymentMode::Cod, PaymentMode::Card];
    ALL.into_iter()
        .map(|payment_mode| PaymentCount {
            payment_mode,
            count: orders
                .iter()
                .filter(|o| o.payment_mode == payment_mode)
                .count() as u64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{AddressSnapshot, OrderItemExpanded, Product};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use surrealdb::RecordId;

    fn address() -> AddressSnapshot {
        AddressSnapshot {
            street: "1 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            postal_code: "62701".into(),
            country: "US".into(),
            phone: "555-0100".into(),
        }
    }

    fn product(title: &str) -> Product {
        Product {
            id: Some(RecordId::from_table_key("product", title)),
            title: title.into(),
            description: String::new(),
            price: Decimal::from(10),
            discount_percentage: Decimal::ZERO,
            stock_quantity: 5,
            category: RecordId::from_table_key("category", "c1"),
            brand: RecordId::from_table_key("brand", "b1"),
            thumbnail: None,
            images: Vec::new(),
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn order(
        total: i64,
        status: OrderStatus,
        payment_mode: PaymentMode,
        month: u32,
        items: Vec<(&str, u32)>,
    ) -> OrderExpanded {
        OrderExpanded {
            id: None,
            user: RecordId::from_table_key("user", "u1"),
            items: items
                .into_iter()
                .map(|(title, quantity)| OrderItemExpanded {
                    product: product(title),
                    quantity,
                })
                .collect(),
            total: Decimal::from(total),
            address: address(),
            payment_mode,
            status,
            created_at: Utc.with_ymd_and_hms(2026, month, 15, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn monthly_revenue_sums_within_a_month() {
        let orders = vec![
            order(100, OrderStatus::Pending, PaymentMode::Cod, 3, vec![]),
            order(200, OrderStatus::Delivered, PaymentMode::Card, 3, vec![]),
            order(300, OrderStatus::Pending, PaymentMode::Cod, 3, vec![]),
        ];
        let buckets = monthly_revenue(&orders);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].month, "3-2026");
        assert_eq!(buckets[0].revenue, Decimal::from(600));
    }

    #[test]
    fn monthly_revenue_buckets_in_first_encounter_order() {
        let orders = vec![
            order(50, OrderStatus::Pending, PaymentMode::Cod, 5, vec![]),
            order(70, OrderStatus::Pending, PaymentMode::Cod, 4, vec![]),
            order(30, OrderStatus::Pending, PaymentMode::Cod, 5, vec![]),
        ];
        let buckets = monthly_revenue(&orders);
        assert_eq!(buckets[0].month, "5-2026");
        assert_eq!(buckets[0].revenue, Decimal::from(80));
        assert_eq!(buckets[1].month, "4-2026");
    }

    #[test]
    fn status_counts_cover_all_statuses_and_sum_to_order_count() {
        let orders = vec![
            order(10, OrderStatus::Pending, PaymentMode::Cod, 1, vec![]),
            order(10, OrderStatus::Pending, PaymentMode::Cod, 1, vec![]),
            order(10, OrderStatus::Delivered, PaymentMode::Card, 1, vec![]),
        ];
        let counts = status_counts(&orders);
        assert_eq!(counts.len(), 5);
        let total: u64 = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, orders.len() as u64);
        assert_eq!(
            counts
                .iter()
                .find(|c| c.status == OrderStatus::Pending)
                .unwrap()
                .count,
            2
        );
    }

    #[test]
    fn top_products_sorts_by_quantity_with_stable_ties() {
        let orders = vec![
            order(
                10,
                OrderStatus::Pending,
                PaymentMode::Cod,
                1,
                vec![("spark-plug", 2), ("chain", 5)],
            ),
            order(
                10,
                OrderStatus::Pending,
                PaymentMode::Cod,
                1,
                vec![("mirror", 2), ("spark-plug", 1)],
            ),
        ];
        let top = top_products(&orders, 5);
        assert_eq!(top[0].title, "chain");
        assert_eq!(top[0].quantity, 5);
        // spark-plug (3) beats mirror (2)
        assert_eq!(top[1].title, "spark-plug");
        assert_eq!(top[2].title, "mirror");
    }

    #[test]
    fn top_products_groups_by_record_id_not_title() {
        let mut order = order(
            10,
            OrderStatus::Pending,
            PaymentMode::Cod,
            1,
            vec![("oil-filter", 2), ("oil-filter", 3)],
        );
        // Same display title, different product record
        order.items[1].product.id = Some(RecordId::from_table_key("product", "oil-filter-v2"));

        let top = top_products(&[order], 5);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].quantity, 3);
        assert_eq!(top[1].quantity, 2);
        assert_eq!(top[0].title, "oil-filter");
        assert_eq!(top[1].title, "oil-filter");
    }

    #[test]
    fn top_products_tie_keeps_first_encounter() {
        let orders = vec![order(
            10,
            OrderStatus::Pending,
            PaymentMode::Cod,
            1,
            vec![("a", 2), ("b", 2), ("c", 2)],
        )];
        let top = top_products(&orders, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].title, "a");
        assert_eq!(top[1].title, "b");
    }

    #[test]
    fn payment_counts_cover_both_modes() {
        let orders = vec![
            order(10, OrderStatus::Pending, PaymentMode::Cod, 1, vec![]),
            order(10, OrderStatus::Pending, PaymentMode::Cod, 1, vec![]),
        ];
        let counts = payment_counts(&orders);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].payment_mode, PaymentMode::Cod);
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].count, 0);
    }
}
