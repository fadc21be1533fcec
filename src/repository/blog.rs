use diesel::prelude::*;

use crate::domain::blog::BlogPost;
use crate::domain::types::Slug;
use crate::models::blog::BlogPost as DbBlogPost;
use crate::repository::{BlogListQuery, BlogReader, DieselRepository, RepositoryResult, like_pattern};

impl BlogReader for DieselRepository {
    fn count_published_posts(&self) -> RepositoryResult<usize> {
        use crate::schema::blog_posts;

        let mut conn = self.conn()?;

        let total = blog_posts::table
            .filter(blog_posts::is_published.eq(true))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(total as usize)
    }

    fn list_blog_posts(&self, query: BlogListQuery) -> RepositoryResult<(usize, Vec<BlogPost>)> {
        use crate::schema::blog_posts;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = blog_posts::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(is_published) = query.is_published {
                items = items.filter(blog_posts::is_published.eq(is_published));
            }

            if let Some(search) = &query.search {
                let pattern = like_pattern(search);
                items = items.filter(
                    blog_posts::title
                        .like(pattern.clone())
                        .escape('\\')
                        .or(blog_posts::excerpt.like(pattern.clone()).escape('\\'))
                        .or(blog_posts::content.like(pattern.clone()).escape('\\'))
                        .or(blog_posts::author.like(pattern).escape('\\')),
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
            .order((blog_posts::published_at.desc(), blog_posts::id.desc()))
            .load::<DbBlogPost>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<BlogPost>, _>>()?;

        Ok((total, items))
    }

    fn get_published_post_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<BlogPost>> {
        use crate::schema::blog_posts;

        let mut conn = self.conn()?;

        let post = blog_posts::table
            .filter(blog_posts::slug.eq(slug.as_str()))
            .filter(blog_posts::is_published.eq(true))
            .first::<DbBlogPost>(&mut conn)
            .optional()?;

        Ok(post.map(TryInto::try_into).transpose()?)
    }
}
