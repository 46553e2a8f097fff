//! Order Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::Product;

/// Order status, mutated only by admins after checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Dispatched,
    #[serde(rename = "Out for delivery")]
    OutForDelivery,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMode {
    #[serde(rename = "COD")]
    Cod,
    #[serde(rename = "CARD")]
    Card,
}

/// One line item: product link + quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: RecordId,
    pub quantity: u32,
}

/// Address copied into the order at checkout. An embedded snapshot,
/// not a live reference: later address edits never touch past orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSnapshot {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
}

/// Order record as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Option<RecordId>,
    pub user: RecordId,
    pub items: Vec<OrderItem>,
    /// Computed server-side from line-item prices at creation time.
    pub total: Decimal,
    pub address: AddressSnapshot,
    pub payment_mode: PaymentMode,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Line item with its product fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemExpanded {
    pub product: Product,
    pub quantity: u32,
}

/// Order with line-item products fetched, for order lists and the
/// dashboard aggregation view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderExpanded {
    pub id: Option<RecordId>,
    pub user: RecordId,
    pub items: Vec<OrderItemExpanded>,
    pub total: Decimal,
    pub address: AddressSnapshot,
    pub payment_mode: PaymentMode,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Checkout payload. The client may send a display total but it is
/// never trusted; the repository recomputes from product prices.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderCreate {
    pub items: Vec<OrderItemInput>,
    pub address: AddressSnapshot,
    pub payment_mode: PaymentMode,
    /// Display hint only, ignored by the server.
    #[serde(default)]
    pub total: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemInput {
    pub product: String,
    pub quantity: u32,
}

/// Admin status update; the only mutable field after checkout.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}
