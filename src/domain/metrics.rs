//! Dashboard summary figures.

use super::order::{Order, OrderStatus};
use super::product::{Product, StockLevel};
use super::user::User;
use serde::{Deserialize, Serialize};

/// Aggregates shown on the dashboard screen.
///
/// Revenue excludes cancelled orders; every other status counts because the
/// payment has been taken at checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub total_users: usize,
    pub total_products: usize,
    pub pending_orders: usize,
    pub delivered_orders: usize,
    pub cancelled_orders: usize,
    pub low_stock_products: usize,
}

impl DashboardMetrics {
    /// Derives the dashboard figures from the three tables.
    ///
    /// # Parameters
    ///
    /// - `users`: all loaded users
    /// - `products`: all loaded products, for the low stock count
    /// - `orders`: all loaded orders, for revenue and status counts
    #[must_use]
    pub fn compute(users: &[User], products: &[Product], orders: &[Order]) -> Self {
        let count_status = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();

        Self {
            total_orders: orders.len(),
            total_revenue: orders
                .iter()
                .filter(|o| o.status != OrderStatus::Cancelled)
                .map(|o| o.total_price)
                .sum(),
            total_users: users.len(),
            total_products: products.len(),
            pending_orders: count_status(OrderStatus::Pending),
            delivered_orders: count_status(OrderStatus::Delivered),
            cancelled_orders: count_status(OrderStatus::Cancelled),
            low_stock_products: products
                .iter()
                .filter(|p| p.stock_level() != StockLevel::Healthy)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed;

    #[test]
    fn demo_data_metrics_are_consistent() {
        let data = seed::demo_data().unwrap();
        let metrics = DashboardMetrics::compute(&data.users, &data.products, &data.orders);

        assert_eq!(metrics.total_users, data.users.len());
        assert_eq!(metrics.total_products, data.products.len());
        assert_eq!(metrics.total_orders, data.orders.len());
        assert!(
            metrics.pending_orders + metrics.delivered_orders + metrics.cancelled_orders
                <= metrics.total_orders
        );

        let cancelled_total: f64 = data
            .orders
            .iter()
            .filter(|o| o.status == OrderStatus::Cancelled)
            .map(|o| o.total_price)
            .sum();
        let all_total: f64 = data.orders.iter().map(|o| o.total_price).sum();
        assert!((metrics.total_revenue - (all_total - cancelled_total)).abs() < 1e-6);
    }

    #[test]
    fn empty_collections_produce_zeroes() {
        let metrics = DashboardMetrics::compute(&[], &[], &[]);
        assert_eq!(metrics, DashboardMetrics::default());
    }
}
