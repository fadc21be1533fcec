use diesel::prelude::*;

use crate::domain::category::Category;
use crate::domain::types::Slug;
use crate::models::category::Category as DbCategory;
use crate::repository::{
    CategoryListQuery, CategoryReader, DieselRepository, RepositoryResult, like_pattern,
};

impl CategoryReader for DieselRepository {
    fn get_category_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::slug.eq(slug.as_str()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<Category>)> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = categories::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(search) = &query.search {
                items = items.filter(categories::name.like(like_pattern(search)).escape('\\'));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let items = items
            .order(categories::name.asc())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok((total, items))
    }
}
