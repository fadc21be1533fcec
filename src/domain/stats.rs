use serde::Serialize;

/// Headline counters shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SiteStats {
    pub total_products: usize,
    pub available_products: usize,
    pub low_stock: usize,
    /// `None` while the orders table has not been created.
    pub orders_count: Option<usize>,
    pub users_count: usize,
}
