//! Blog listing with a product-derived fallback when nothing is published yet.

use serde::Serialize;

use crate::domain::types::Slug;
use crate::dto::blog::PostCard;
use crate::pagination::{PageRequest, Paginated};
use crate::repository::{
    BlogListQuery, BlogReader, ProductListQuery, ProductReader, ProductSearchScope,
    RepositoryError, RepositoryResult,
};
use crate::services::{ServiceError, ServiceResult, fetch_page};

/// Posts shown per blog page.
pub const BLOG_PAGE_SIZE: usize = 5;
/// Products whose name or category contains this are showcased first.
pub const SHOWCASE_KEYWORD: &str = "shoe";
/// Upper bound on generated posts.
pub const MAX_DERIVED_POSTS: usize = 10;
/// Products considered when none match [`SHOWCASE_KEYWORD`].
pub const FALLBACK_PRODUCTS: usize = 12;

/// Where the blog listing takes its content from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlogSource {
    /// Published blog posts.
    Published,
    /// Posts generated from catalog products.
    Derived,
    /// The backing tables do not exist yet.
    Unavailable,
}

#[derive(Debug)]
pub struct BlogListing {
    pub source: BlogSource,
    pub posts: Paginated<PostCard>,
}

/// Decide the content source from the number of published posts.
fn choose_source<R: BlogReader>(repo: &R) -> ServiceResult<BlogSource> {
    match repo.count_published_posts() {
        Ok(0) => Ok(BlogSource::Derived),
        Ok(_) => Ok(BlogSource::Published),
        Err(RepositoryError::Unprovisioned(table)) => {
            log::warn!("Blog table `{table}` is missing; showing an empty blog");
            Ok(BlogSource::Unavailable)
        }
        Err(e) => {
            log::error!("Failed to count blog posts: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Up to [`MAX_DERIVED_POSTS`] posts built from showcase products, or from
/// the newest products when none match.
fn derived_posts<R: ProductReader>(repo: &R) -> RepositoryResult<Vec<PostCard>> {
    let (_, mut products) = repo.list_products(
        ProductListQuery::default()
            .search(SHOWCASE_KEYWORD, ProductSearchScope::NameOrCategory)
            .paginate(1, MAX_DERIVED_POSTS),
    )?;

    if products.is_empty() {
        (_, products) = repo.list_products(ProductListQuery::default().paginate(1, FALLBACK_PRODUCTS))?;
    }

    Ok(products
        .into_iter()
        .take(MAX_DERIVED_POSTS)
        .map(PostCard::from)
        .collect())
}

/// One page of blog content.
pub fn show_blog<R>(page: PageRequest, repo: &R) -> ServiceResult<BlogListing>
where
    R: BlogReader + ProductReader,
{
    let source = choose_source(repo)?;

    let posts = match source {
        BlogSource::Published => fetch_page(page, BLOG_PAGE_SIZE, |pagination| {
            repo.list_blog_posts(BlogListQuery {
                is_published: Some(true),
                search: None,
                pagination: Some(pagination),
            })
        })
        .map(|posts| posts.map(PostCard::from)),
        BlogSource::Derived => {
            derived_posts(repo).map(|cards| Paginated::from_vec(cards, page, BLOG_PAGE_SIZE))
        }
        BlogSource::Unavailable => Ok(Paginated::empty(BLOG_PAGE_SIZE)),
    };

    match posts {
        Ok(posts) => Ok(BlogListing { source, posts }),
        Err(RepositoryError::Unprovisioned(table)) => {
            log::warn!("Table `{table}` is missing; showing an empty blog");
            Ok(BlogListing {
                source: BlogSource::Unavailable,
                posts: Paginated::empty(BLOG_PAGE_SIZE),
            })
        }
        Err(e) => {
            log::error!("Failed to list blog posts: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// A published post by slug.
///
/// Returns `Ok(None)` when the blog table does not exist yet, so the page
/// can render without a post.
pub fn show_blog_post<R: BlogReader>(slug: &str, repo: &R) -> ServiceResult<Option<PostCard>> {
    let slug = Slug::new(slug).map_err(|_| ServiceError::NotFound)?;

    match repo.get_published_post_by_slug(&slug) {
        Ok(Some(post)) => Ok(Some(post.into())),
        Ok(None) => Err(ServiceError::NotFound),
        Err(RepositoryError::Unprovisioned(table)) => {
            log::warn!("Blog table `{table}` is missing; rendering `{slug}` without a post");
            Ok(None)
        }
        Err(e) => {
            log::error!("Failed to get blog post `{slug}`: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::Product;
    use crate::repository::test::{TestRepository, blog_post, category, product};

    fn products(shoes: i32, others: i32) -> Vec<Product> {
        let footwear = category(1, "Footwear");
        let shirts = category(2, "Shirts");
        let mut items: Vec<Product> = (1..=shoes)
            .map(|id| product(id, &format!("Trail Shoe {id}"), &footwear))
            .collect();
        items.extend((1..=others).map(|id| product(100 + id, &format!("Tee {id}"), &shirts)));
        items
    }

    #[test]
    fn published_posts_win() {
        let repo = TestRepository::new()
            .with_products(products(3, 0))
            .with_blog_posts((1..=7).map(|id| blog_post(id, &format!("Post {id}"), true)).collect());

        let listing = show_blog(PageRequest::first(), &repo).unwrap();
        assert_eq!(listing.source, BlogSource::Published);
        assert_eq!(listing.posts.items.len(), 5);
        assert_eq!(listing.posts.total, 7);
        assert_eq!(listing.posts.items[0].title, "Post 7");

        let second = show_blog(PageRequest::from(9), &repo).unwrap();
        assert_eq!(second.posts.page, 2);
        assert_eq!(second.posts.items.len(), 2);
    }

    #[test]
    fn unpublished_posts_do_not_count() {
        let repo = TestRepository::new()
            .with_products(products(1, 0))
            .with_blog_posts(vec![blog_post(1, "Draft", false)]);

        let listing = show_blog(PageRequest::first(), &repo).unwrap();
        assert_eq!(listing.source, BlogSource::Derived);
    }

    #[test]
    fn derived_posts_only_use_showcase_products() {
        let repo = TestRepository::new().with_products(products(2, 5));

        let listing = show_blog(PageRequest::first(), &repo).unwrap();
        assert_eq!(listing.source, BlogSource::Derived);
        assert_eq!(listing.posts.total, 2);
        assert!(listing.posts.items.iter().all(|p| p.title.contains("Shoe")));
        assert!(listing.posts.items.iter().all(|p| p.derived));
    }

    #[test]
    fn derived_posts_match_category_names() {
        let sneakers = category(1, "Shoes");
        let repo = TestRepository::new().with_products(vec![product(1, "Canvas Low", &sneakers)]);

        let listing = show_blog(PageRequest::first(), &repo).unwrap();
        assert_eq!(listing.posts.total, 1);
    }

    #[test]
    fn derived_posts_are_capped_at_ten() {
        let repo = TestRepository::new().with_products(products(15, 0));

        let listing = show_blog(PageRequest::first(), &repo).unwrap();
        assert_eq!(listing.posts.total, 10);
        assert_eq!(listing.posts.pages, 2);
    }

    #[test]
    fn derived_posts_fall_back_to_any_products() {
        let repo = TestRepository::new().with_products(products(0, 14));

        let listing = show_blog(PageRequest::first(), &repo).unwrap();
        assert_eq!(listing.source, BlogSource::Derived);
        assert_eq!(listing.posts.total, 10);
    }

    #[test]
    fn empty_catalog_gives_empty_blog() {
        let repo = TestRepository::new();
        let listing = show_blog(PageRequest::first(), &repo).unwrap();
        assert_eq!(listing.posts.total, 0);
        assert_eq!(listing.posts.page, 1);
    }

    #[test]
    fn missing_blog_table_degrades_to_empty() {
        let repo = TestRepository::new()
            .with_products(products(3, 0))
            .without_blog_table();

        let listing = show_blog(PageRequest::first(), &repo).unwrap();
        assert_eq!(listing.source, BlogSource::Unavailable);
        assert!(listing.posts.items.is_empty());

        assert_eq!(show_blog_post("anything", &repo).unwrap(), None);
    }

    #[test]
    fn blog_detail_finds_published_posts_only() {
        let repo = TestRepository::new().with_blog_posts(vec![
            blog_post(1, "Live", true),
            blog_post(2, "Draft", false),
        ]);

        let post = show_blog_post("live", &repo).unwrap().unwrap();
        assert_eq!(post.title, "Live");
        assert_eq!(show_blog_post("draft", &repo).unwrap_err(), ServiceError::NotFound);
        assert_eq!(show_blog_post("missing", &repo).unwrap_err(), ServiceError::NotFound);
    }
}
