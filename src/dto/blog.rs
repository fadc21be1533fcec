use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::blog::BlogPost;
use crate::domain::product::Product;

/// Author shown on posts generated from products.
pub const DERIVED_POST_AUTHOR: &str = "E-SHOP";
/// Excerpt used for generated posts of products without a description.
pub const DERIVED_POST_PLACEHOLDER: &str =
    "Discover features, fit and styling tips for this product.";
const EXCERPT_CHARS: usize = 200;

/// A blog entry as rendered on the listing and detail pages, either a stored
/// post or one generated from a product.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostCard {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    /// Media-relative image path.
    pub featured_image: Option<String>,
    pub author: String,
    pub published_at: NaiveDateTime,
    pub url: String,
    /// Whether the card was generated from a product.
    pub derived: bool,
}

impl From<BlogPost> for PostCard {
    fn from(post: BlogPost) -> Self {
        let url = post.url();
        Self {
            title: post.title.into_inner(),
            excerpt: post.excerpt,
            content: post.content,
            featured_image: post.featured_image.map(|i| i.into_inner()),
            author: post.author,
            published_at: post.published_at,
            url,
            derived: false,
        }
    }
}

impl From<Product> for PostCard {
    fn from(product: Product) -> Self {
        let url = product.url();
        let description = product.description.map(|d| d.into_inner());
        let excerpt = match &description {
            Some(description) => {
                let mut excerpt: String = description.chars().take(EXCERPT_CHARS).collect();
                excerpt.push_str("...");
                excerpt
            }
            None => DERIVED_POST_PLACEHOLDER.to_string(),
        };
        Self {
            title: format!("{} — Styling & Care", product.name),
            content: description.unwrap_or_else(|| excerpt.clone()),
            excerpt,
            featured_image: product.image.map(|i| i.into_inner()),
            author: DERIVED_POST_AUTHOR.to_string(),
            published_at: product.created_at,
            url,
            derived: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ImagePath, ProductDescription};
    use crate::repository::test::{blog_post, category, product};

    #[test]
    fn product_post_truncates_description() {
        let shoes = category(1, "Shoes");
        let mut runner = product(1, "Runner", &shoes);
        runner.description = Some(ProductDescription::new("é".repeat(250)).unwrap());
        runner.image = Some(ImagePath::new("photos/products/runner.png").unwrap());

        let card = PostCard::from(runner);
        assert_eq!(card.title, "Runner — Styling & Care");
        assert_eq!(card.excerpt.chars().count(), 203);
        assert!(card.excerpt.ends_with("..."));
        assert_eq!(card.content.chars().count(), 250);
        assert_eq!(card.author, "E-SHOP");
        assert_eq!(card.url, "/shop/shoes/runner/");
        assert_eq!(card.featured_image.as_deref(), Some("photos/products/runner.png"));
        assert!(card.derived);
    }

    #[test]
    fn product_post_without_description_uses_placeholder() {
        let shoes = category(1, "Shoes");
        let mut runner = product(1, "Runner", &shoes);
        runner.description = None;

        let card = PostCard::from(runner);
        assert_eq!(card.excerpt, DERIVED_POST_PLACEHOLDER);
        assert_eq!(card.content, DERIVED_POST_PLACEHOLDER);
    }

    #[test]
    fn stored_post_links_to_blog_detail() {
        let card = PostCard::from(blog_post(1, "Spring Collection", true));
        assert_eq!(card.url, "/blog/spring-collection/");
        assert!(!card.derived);
    }
}
