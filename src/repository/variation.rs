use diesel::prelude::*;

use crate::domain::variation::Variation;
use crate::models::variation::Variation as DbVariation;
use crate::repository::{
    DieselRepository, RepositoryResult, VariationListQuery, VariationReader, like_pattern,
};

impl VariationReader for DieselRepository {
    fn list_variations(
        &self,
        query: VariationListQuery,
    ) -> RepositoryResult<(usize, Vec<Variation>)> {
        use crate::schema::{products, variations};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = variations::table
                .inner_join(products::table)
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(product_id) = query.product_id {
                items = items.filter(variations::product_id.eq(product_id.get()));
            }

            if let Some(category) = query.category {
                items = items.filter(variations::variation_category.eq(category.as_str()));
            }

            if let Some(is_active) = query.is_active {
                items = items.filter(variations::is_active.eq(is_active));
            }

            if let Some(search) = &query.search {
                let pattern = like_pattern(search);
                items = items.filter(
                    products::name
                        .like(pattern.clone())
                        .escape('\\')
                        .or(variations::variation_value.like(pattern).escape('\\')),
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
            .order((products::name.asc(), variations::id.asc()))
            .select((DbVariation::as_select(), products::name))
            .load::<(DbVariation, String)>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Variation>, _>>()?;

        Ok((total, items))
    }
}
