use diesel::prelude::*;

use crate::domain::stats::SiteStats;
use crate::repository::{DieselRepository, RepositoryError, RepositoryResult, StatsReader};

impl StatsReader for DieselRepository {
    fn site_stats(&self, low_stock_threshold: i32) -> RepositoryResult<SiteStats> {
        use crate::schema::{accounts, orders, products};

        let mut conn = self.conn()?;

        let total_products = products::table.count().get_result::<i64>(&mut conn)?;
        let available_products = products::table
            .filter(products::is_available.eq(true))
            .count()
            .get_result::<i64>(&mut conn)?;
        let low_stock = products::table
            .filter(products::stock.le(low_stock_threshold))
            .count()
            .get_result::<i64>(&mut conn)?;
        let users_count = accounts::table.count().get_result::<i64>(&mut conn)?;

        let orders_count = match orders::table.count().get_result::<i64>(&mut conn) {
            Ok(count) => Some(count as usize),
            Err(err) => match RepositoryError::from(err) {
                RepositoryError::Unprovisioned(_) => None,
                other => return Err(other),
            },
        };

        Ok(SiteStats {
            total_products: total_products as usize,
            available_products: available_products as usize,
            low_stock: low_stock as usize,
            orders_count,
            users_count: users_count as usize,
        })
    }
}
