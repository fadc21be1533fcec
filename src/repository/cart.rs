use diesel::dsl::exists;
use diesel::prelude::*;

use crate::domain::types::ProductId;
use crate::repository::{CartReader, DieselRepository, RepositoryResult};

impl CartReader for DieselRepository {
    fn is_in_cart(&self, cart_id: &str, product_id: ProductId) -> RepositoryResult<bool> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        let found = diesel::select(exists(
            cart_items::table
                .filter(cart_items::cart_id.eq(cart_id))
                .filter(cart_items::product_id.eq(product_id.get()))
                .filter(cart_items::is_active.eq(true)),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(found)
    }
}
