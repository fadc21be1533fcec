use diesel::prelude::*;

use crate::domain::gallery::GalleryImage;
use crate::models::gallery::GalleryImage as DbGalleryImage;
use crate::repository::{DieselRepository, GalleryListQuery, GalleryReader, RepositoryResult};

impl GalleryReader for DieselRepository {
    fn list_gallery(
        &self,
        query: GalleryListQuery,
    ) -> RepositoryResult<(usize, Vec<GalleryImage>)> {
        use crate::schema::product_gallery;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = product_gallery::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(product_id) = query.product_id {
                items = items.filter(product_gallery::product_id.eq(product_id.get()));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let items = items
            .order(product_gallery::id.asc())
            .load::<DbGalleryImage>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<GalleryImage>, _>>()?;

        Ok((total, items))
    }
}
