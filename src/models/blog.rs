use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::blog::BlogPost as DomainBlogPost;
use crate::domain::types::{BlogTitle, ImagePath, Slug, TypeConstraintError};

/// Diesel model representing the `blog_posts` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::blog_posts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BlogPost {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub author: String,
    pub is_published: bool,
    pub published_at: NaiveDateTime,
}

/// Insertable form of [`BlogPost`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::blog_posts)]
pub struct NewBlogPost<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub excerpt: &'a str,
    pub content: &'a str,
    pub featured_image: Option<&'a str>,
    pub author: &'a str,
    pub is_published: bool,
    pub published_at: NaiveDateTime,
}

impl TryFrom<BlogPost> for DomainBlogPost {
    type Error = TypeConstraintError;

    fn try_from(post: BlogPost) -> Result<Self, Self::Error> {
        Ok(Self {
            id: post.id.try_into()?,
            title: BlogTitle::new(post.title)?,
            slug: Slug::new(post.slug)?,
            excerpt: post.excerpt,
            content: post.content,
            featured_image: post.featured_image.and_then(|i| ImagePath::new(i).ok()),
            author: post.author,
            is_published: post.is_published,
            published_at: post.published_at,
        })
    }
}
