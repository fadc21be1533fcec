use diesel::prelude::*;

use crate::domain::product::Product;
use crate::domain::types::{ProductId, Slug};
use crate::models::category::Category as DbCategory;
use crate::models::product::Product as DbProduct;
use crate::repository::{
    DieselRepository, ProductListQuery, ProductReader, ProductSearchScope, ProductWriter,
    RepositoryResult, like_pattern,
};

impl ProductReader for DieselRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = products::table
                .inner_join(categories::table)
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(category_id) = query.category_id {
                items = items.filter(products::category_id.eq(category_id.get()));
            }

            if let Some(is_available) = query.is_available {
                items = items.filter(products::is_available.eq(is_available));
            }

            if let Some(new) = query.new {
                items = items.filter(products::new.eq(new));
            }

            if let Some(search) = &query.search {
                let pattern = like_pattern(&search.term);
                items = match search.scope {
                    ProductSearchScope::NameOrDescription => items.filter(
                        products::name
                            .like(pattern.clone())
                            .escape('\\')
                            .or(products::description.like(pattern).escape('\\')),
                    ),
                    ProductSearchScope::NameOrCategory => items.filter(
                        products::name
                            .like(pattern.clone())
                            .escape('\\')
                            .or(categories::name.like(pattern).escape('\\')),
                    ),
                    ProductSearchScope::Everything => items.filter(
                        products::name
                            .like(pattern.clone())
                            .escape('\\')
                            .or(products::description.like(pattern.clone()).escape('\\'))
                            .or(categories::name.like(pattern).escape('\\')),
                    ),
                };
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let items = items
            .order((products::created_at.desc(), products::id.desc()))
            .select((DbProduct::as_select(), DbCategory::as_select()))
            .load::<(DbProduct, DbCategory)>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Product>, _>>()?;

        Ok((total, items))
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        let product = products::table
            .inner_join(categories::table)
            .filter(products::id.eq(id.get()))
            .select((DbProduct::as_select(), DbCategory::as_select()))
            .first::<(DbProduct, DbCategory)>(&mut conn)
            .optional()?;

        Ok(product.map(TryInto::try_into).transpose()?)
    }

    fn get_product_by_slugs(
        &self,
        category_slug: &Slug,
        product_slug: &Slug,
    ) -> RepositoryResult<Option<Product>> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        let product = products::table
            .inner_join(categories::table)
            .filter(categories::slug.eq(category_slug.as_str()))
            .filter(products::slug.eq(product_slug.as_str()))
            .select((DbProduct::as_select(), DbCategory::as_select()))
            .first::<(DbProduct, DbCategory)>(&mut conn)
            .optional()?;

        Ok(product.map(TryInto::try_into).transpose()?)
    }
}

impl ProductWriter for DieselRepository {
    fn set_products_available(
        &self,
        ids: &[ProductId],
        available: bool,
    ) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();

        let affected = diesel::update(products::table.filter(products::id.eq_any(ids)))
            .set((
                products::is_available.eq(available),
                products::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn set_products_new(&self, ids: &[ProductId], new: bool) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();

        let affected = diesel::update(products::table.filter(products::id.eq_any(ids)))
            .set((
                products::new.eq(new),
                products::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn apply_discount_percent(&self, ids: &[ProductId], percent: f64) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();
        let factor = percent / 100.0;

        let affected = diesel::update(products::table.filter(products::id.eq_any(ids)))
            .set((
                products::discount.eq(products::price * factor),
                products::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
