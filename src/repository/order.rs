use diesel::dsl::exists;
use diesel::prelude::*;

use crate::domain::order::{Order, OrderProduct, Payment};
use crate::domain::types::{AccountId, ProductId};
use crate::models::order::{
    Order as DbOrder, OrderProduct as DbOrderProduct, OrderProductRow, Payment as DbPayment,
};
use crate::repository::{
    DieselRepository, OrderListQuery, OrderProductListQuery, OrderReader, PaymentListQuery,
    RepositoryResult, like_pattern,
};

impl OrderReader for DieselRepository {
    fn has_purchased(&self, user_id: AccountId, product_id: ProductId) -> RepositoryResult<bool> {
        use crate::schema::order_products;

        let mut conn = self.conn()?;

        let found = diesel::select(exists(
            order_products::table
                .filter(order_products::user_id.eq(user_id.get()))
                .filter(order_products::product_id.eq(product_id.get())),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(found)
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = orders::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(is_ordered) = query.is_ordered {
                items = items.filter(orders::is_ordered.eq(is_ordered));
            }

            if let Some(status) = query.status {
                items = items.filter(orders::status.eq(status.as_str()));
            }

            if let Some(search) = &query.search {
                let pattern = like_pattern(search);
                items = items.filter(
                    orders::order_number
                        .like(pattern.clone())
                        .escape('\\')
                        .or(orders::first_name.like(pattern.clone()).escape('\\'))
                        .or(orders::last_name.like(pattern.clone()).escape('\\'))
                        .or(orders::phone.like(pattern.clone()).escape('\\'))
                        .or(orders::email.like(pattern).escape('\\')),
                );
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let items = items
            .order((orders::created_at.desc(), orders::id.desc()))
            .load::<DbOrder>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Order>, _>>()?;

        Ok((total, items))
    }

    fn list_order_products(
        &self,
        query: OrderProductListQuery,
    ) -> RepositoryResult<(usize, Vec<OrderProduct>)> {
        use crate::schema::{accounts, order_products, products};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = order_products::table
                .inner_join(products::table)
                .inner_join(accounts::table)
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(ordered) = query.ordered {
                items = items.filter(order_products::ordered.eq(ordered));
            }

            if let Some(search) = &query.search {
                let pattern = like_pattern(search);
                items = items.filter(
                    products::name
                        .like(pattern.clone())
                        .escape('\\')
                        .or(accounts::email.like(pattern).escape('\\')),
                );
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let items = items
            .order((order_products::created_at.desc(), order_products::id.desc()))
            .select((
                DbOrderProduct::as_select(),
                products::name,
                products::image,
                accounts::email,
            ))
            .load::<OrderProductRow>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<OrderProduct>, _>>()?;

        Ok((total, items))
    }

    fn list_payments(&self, query: PaymentListQuery) -> RepositoryResult<(usize, Vec<Payment>)> {
        use crate::schema::{accounts, payments};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = payments::table
                .inner_join(accounts::table)
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(method) = &query.payment_method {
                items = items.filter(payments::payment_method.eq(method.clone()));
            }

            if let Some(status) = query.status {
                items = items.filter(payments::status.eq(status.as_str()));
            }

            if let Some(search) = &query.search {
                let pattern = like_pattern(search);
                items = items.filter(
                    payments::payment_id
                        .like(pattern.clone())
                        .escape('\\')
                        .or(accounts::email.like(pattern).escape('\\')),
                );
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let items = items
            .order((payments::created_at.desc(), payments::id.desc()))
            .select((DbPayment::as_select(), accounts::email))
            .load::<(DbPayment, String)>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Payment>, _>>()?;

        Ok((total, items))
    }
}
