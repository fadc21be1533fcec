use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{BlogPostId, BlogTitle, ImagePath, Slug};

/// Editorial blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: BlogTitle,
    pub slug: Slug,
    pub excerpt: String,
    pub content: String,
    pub featured_image: Option<ImagePath>,
    pub author: String,
    pub is_published: bool,
    pub published_at: NaiveDateTime,
}

impl BlogPost {
    pub fn url(&self) -> String {
        format!("/blog/{}/", self.slug)
    }
}
