use diesel::prelude::*;

use crate::domain::review::{NewReview, Review, ReviewUpdate};
use crate::domain::types::{AccountId, ProductId, ReviewId};
use crate::models::review::{
    NewReview as DbNewReview, Review as DbReview, ReviewChangeset, ReviewRow,
};
use crate::repository::{
    DieselRepository, RepositoryResult, ReviewListQuery, ReviewReader, ReviewWriter,
};

impl ReviewReader for DieselRepository {
    fn get_review(
        &self,
        user_id: AccountId,
        product_id: ProductId,
    ) -> RepositoryResult<Option<Review>> {
        use crate::schema::{accounts, products, review_ratings};

        let mut conn = self.conn()?;

        let review = review_ratings::table
            .inner_join(products::table)
            .inner_join(accounts::table)
            .filter(review_ratings::user_id.eq(user_id.get()))
            .filter(review_ratings::product_id.eq(product_id.get()))
            .select((DbReview::as_select(), products::name, accounts::username))
            .first::<ReviewRow>(&mut conn)
            .optional()?;

        Ok(review.map(TryInto::try_into).transpose()?)
    }

    fn list_reviews(&self, query: ReviewListQuery) -> RepositoryResult<(usize, Vec<Review>)> {
        use crate::schema::{accounts, products, review_ratings};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = review_ratings::table
                .inner_join(products::table)
                .inner_join(accounts::table)
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(product_id) = query.product_id {
                items = items.filter(review_ratings::product_id.eq(product_id.get()));
            }

            if let Some(status) = query.status {
                items = items.filter(review_ratings::status.eq(status));
            }

            if let Some(rating) = query.rating {
                items = items.filter(review_ratings::rating.eq(rating.get()));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let items = items
            .order((review_ratings::updated_at.desc(), review_ratings::id.desc()))
            .select((DbReview::as_select(), products::name, accounts::username))
            .load::<ReviewRow>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Review>, _>>()?;

        Ok((total, items))
    }
}

impl ReviewWriter for DieselRepository {
    fn create_review(&self, review: &NewReview) -> RepositoryResult<usize> {
        use crate::schema::review_ratings;

        let mut conn = self.conn()?;
        let db_review = DbNewReview::from(review);

        let affected = diesel::insert_into(review_ratings::table)
            .values(&db_review)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn update_review(&self, id: ReviewId, update: &ReviewUpdate) -> RepositoryResult<usize> {
        use crate::schema::review_ratings;

        let mut conn = self.conn()?;
        let changeset = ReviewChangeset::from(update);

        let affected = diesel::update(review_ratings::table.filter(review_ratings::id.eq(id.get())))
            .set(&changeset)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
