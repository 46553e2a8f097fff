//! Dashboard API Handler

use axum::{Json, extract::State};
use serde::Serialize;

use super::aggregate::{
    self, MonthlyRevenue, PaymentCount, ProductQuantity, StatusCount,
};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::utils::AppResult;

const TOP_PRODUCT_LIMIT: usize = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_orders: u64,
    pub status_counts: Vec<StatusCount>,
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub top_products: Vec<ProductQuantity>,
    pub payment_counts: Vec<PaymentCount>,
}

/// GET /api/dashboard - admin-only order aggregation view
pub async fn summary(
    user: CurrentUser,
    State(state): State<ServerState>,
) -> AppResult<Json<DashboardSummary>> {
    user.require_admin()?;

    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_all().await?;

    Ok(Json(DashboardSummary {
        total_orders: orders.len() as u64,
        status_counts: aggregate::status_counts(&orders),
        monthly_revenue: aggregate::monthly_revenue(&orders),
        top_products: aggregate::top_products(&orders, TOP_PRODUCT_LIMIT),
        payment_counts: aggregate::payment_counts(&orders),
    }))
}
