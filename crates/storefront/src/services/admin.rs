//! Admin dashboard data.

use rust_decimal::Decimal;
use serde::Serialize;

use sts_core::Product;

use crate::catalog::Catalog;

/// Demo order count shown on the dashboard.
pub const DEMO_TOTAL_ORDERS: u64 = 42;
/// Demo customer count shown on the dashboard.
pub const DEMO_TOTAL_CUSTOMERS: u64 = 128;
/// Demo revenue in whole dollars.
pub const DEMO_REVENUE: i64 = 12_450;

/// Headline figures. Only the product count is live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_orders: u64,
    pub total_customers: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}

impl DashboardStats {
    #[must_use]
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self {
            total_products: catalog.len(),
            total_orders: DEMO_TOTAL_ORDERS,
            total_customers: DEMO_TOTAL_CUSTOMERS,
            revenue: Decimal::from(DEMO_REVENUE),
        }
    }
}

/// Everything the dashboard page renders.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub products: Vec<Product>,
}

impl Dashboard {
    #[must_use]
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self {
            stats: DashboardStats::for_catalog(catalog),
            products: catalog.products().to_vec(),
        }
    }
}
