use crate::db::{DbConnection, DbPool};
use crate::domain::account::{Account, UserProfile};
use crate::domain::blog::BlogPost;
use crate::domain::category::Category;
use crate::domain::gallery::GalleryImage;
use crate::domain::order::{Order, OrderProduct, Payment};
use crate::domain::product::Product;
use crate::domain::review::{NewReview, Review, ReviewUpdate};
use crate::domain::stats::SiteStats;
use crate::domain::types::{
    AccountId, CategoryId, OrderStatus, PaymentStatus, ProductId, Rating, ReviewId, Slug,
    VariationCategory,
};
use crate::domain::variation::Variation;
use crate::pagination::Pagination;

pub mod account;
pub mod blog;
pub mod cart;
pub mod category;
pub mod errors;
pub mod gallery;
pub mod order;
pub mod product;
pub mod review;
pub mod stats;
#[cfg(test)]
pub mod test;
pub mod variation;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Wrap a user-supplied term into a `LIKE` pattern, escaping `%`, `_` and `\`.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Columns a product text search matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSearchScope {
    /// Product name or description (storefront search box).
    NameOrDescription,
    /// Product name or category name (blog showcase selection).
    NameOrCategory,
    /// Product name, description or category name (admin search).
    Everything,
}

/// Case-insensitive substring search over products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSearch {
    pub term: String,
    pub scope: ProductSearchScope,
}

/// Query parameters used when listing or searching products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Filter by category.
    pub category_id: Option<CategoryId>,
    /// Filter by availability flag.
    pub is_available: Option<bool>,
    /// Filter by the "new" flag.
    pub new: Option<bool>,
    /// Substring search.
    pub search: Option<ProductSearch>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn available(mut self, is_available: bool) -> Self {
        self.is_available = Some(is_available);
        self
    }
    pub fn new_arrivals(mut self, new: bool) -> Self {
        self.new = Some(new);
        self
    }
    pub fn search(mut self, term: impl Into<String>, scope: ProductSearchScope) -> Self {
        self.search = Some(ProductSearch {
            term: term.into(),
            scope,
        });
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    /// Substring search over the name.
    pub search: Option<String>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl CategoryListQuery {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing reviews, newest-updated first.
#[derive(Debug, Clone, Default)]
pub struct ReviewListQuery {
    pub product_id: Option<ProductId>,
    /// Filter by approval status.
    pub status: Option<bool>,
    pub rating: Option<Rating>,
    pub pagination: Option<Pagination>,
}

impl ReviewListQuery {
    pub fn product(mut self, product_id: ProductId) -> Self {
        self.product_id = Some(product_id);
        self
    }
    pub fn approved(mut self, status: bool) -> Self {
        self.status = Some(status);
        self
    }
    pub fn rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing gallery images.
#[derive(Debug, Clone, Default)]
pub struct GalleryListQuery {
    pub product_id: Option<ProductId>,
    pub pagination: Option<Pagination>,
}

impl GalleryListQuery {
    pub fn product(mut self, product_id: ProductId) -> Self {
        self.product_id = Some(product_id);
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing blog posts, newest published first.
#[derive(Debug, Clone, Default)]
pub struct BlogListQuery {
    pub is_published: Option<bool>,
    /// Substring search over title, excerpt, content and author.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl BlogListQuery {
    pub fn published(mut self, is_published: bool) -> Self {
        self.is_published = Some(is_published);
        self
    }
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing variations.
#[derive(Debug, Clone, Default)]
pub struct VariationListQuery {
    pub product_id: Option<ProductId>,
    pub category: Option<VariationCategory>,
    pub is_active: Option<bool>,
    /// Substring search over product name and variation value.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl VariationListQuery {
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing accounts, newest joined first.
#[derive(Debug, Clone, Default)]
pub struct AccountListQuery {
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superadmin: Option<bool>,
    /// Substring search over email, username, first and last name.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl AccountListQuery {
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing user profiles.
#[derive(Debug, Clone, Default)]
pub struct ProfileListQuery {
    pub country: Option<String>,
    pub state: Option<String>,
    /// Substring search over email, first name and city.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ProfileListQuery {
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing orders, newest first.
#[derive(Debug, Clone, Default)]
pub struct OrderListQuery {
    pub is_ordered: Option<bool>,
    pub status: Option<OrderStatus>,
    /// Substring search over order number, names, phone and email.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl OrderListQuery {
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing order lines, newest first.
#[derive(Debug, Clone, Default)]
pub struct OrderProductListQuery {
    pub ordered: Option<bool>,
    /// Substring search over product name and buyer email.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl OrderProductListQuery {
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing payments, newest first.
#[derive(Debug, Clone, Default)]
pub struct PaymentListQuery {
    pub payment_method: Option<String>,
    pub status: Option<PaymentStatus>,
    /// Substring search over gateway payment id and buyer email.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl PaymentListQuery {
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// Retrieve a category by its slug.
    fn get_category_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Category>>;
    /// List categories using the supplied query options.
    fn list_categories(&self, query: CategoryListQuery)
    -> RepositoryResult<(usize, Vec<Category>)>;
}

/// Read-only operations for product entities.
pub trait ProductReader {
    /// List products matching the supplied query parameters, newest first.
    /// Returns the total number of matches alongside the requested window.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Retrieve a product by its identifier.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
    /// Retrieve a product by its own slug within the category with `category_slug`.
    fn get_product_by_slugs(
        &self,
        category_slug: &Slug,
        product_slug: &Slug,
    ) -> RepositoryResult<Option<Product>>;
}

/// Bulk write operations for product entities. Each returns the affected row count.
pub trait ProductWriter {
    fn set_products_available(&self, ids: &[ProductId], available: bool)
    -> RepositoryResult<usize>;
    fn set_products_new(&self, ids: &[ProductId], new: bool) -> RepositoryResult<usize>;
    /// Set `discount = price * percent / 100` for the selected products.
    fn apply_discount_percent(&self, ids: &[ProductId], percent: f64) -> RepositoryResult<usize>;
}

/// Read-only operations for gallery images.
pub trait GalleryReader {
    fn list_gallery(&self, query: GalleryListQuery)
    -> RepositoryResult<(usize, Vec<GalleryImage>)>;
}

/// Read-only operations for reviews.
pub trait ReviewReader {
    /// Retrieve the review a user left for a product, if any.
    fn get_review(
        &self,
        user_id: AccountId,
        product_id: ProductId,
    ) -> RepositoryResult<Option<Review>>;
    /// List reviews matching the query, newest-updated first.
    fn list_reviews(&self, query: ReviewListQuery) -> RepositoryResult<(usize, Vec<Review>)>;
}

/// Write operations for reviews.
pub trait ReviewWriter {
    /// Insert a review. Fails with [`RepositoryError::Conflict`] when the
    /// user already reviewed the product.
    fn create_review(&self, review: &NewReview) -> RepositoryResult<usize>;
    /// Overwrite the content of an existing review.
    fn update_review(&self, id: ReviewId, update: &ReviewUpdate) -> RepositoryResult<usize>;
}

/// Read-only operations for blog posts.
pub trait BlogReader {
    fn count_published_posts(&self) -> RepositoryResult<usize>;
    fn list_blog_posts(&self, query: BlogListQuery) -> RepositoryResult<(usize, Vec<BlogPost>)>;
    fn get_published_post_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<BlogPost>>;
}

/// Read-only access to session carts.
pub trait CartReader {
    /// Whether `product_id` sits in the active items of the session cart `cart_id`.
    fn is_in_cart(&self, cart_id: &str, product_id: ProductId) -> RepositoryResult<bool>;
}

/// Read-only operations for orders, order lines and payments.
pub trait OrderReader {
    /// Whether the user has any order line for the product.
    fn has_purchased(&self, user_id: AccountId, product_id: ProductId) -> RepositoryResult<bool>;
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    fn list_order_products(
        &self,
        query: OrderProductListQuery,
    ) -> RepositoryResult<(usize, Vec<OrderProduct>)>;
    fn list_payments(&self, query: PaymentListQuery) -> RepositoryResult<(usize, Vec<Payment>)>;
}

/// Read-only operations for accounts and profiles.
pub trait AccountReader {
    fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<Account>>;
    fn list_accounts(&self, query: AccountListQuery) -> RepositoryResult<(usize, Vec<Account>)>;
    fn list_user_profiles(
        &self,
        query: ProfileListQuery,
    ) -> RepositoryResult<(usize, Vec<UserProfile>)>;
}

/// Bulk write operations for accounts. Each returns the affected row count.
pub trait AccountWriter {
    fn set_accounts_active(&self, ids: &[AccountId], active: bool) -> RepositoryResult<usize>;
    fn set_accounts_staff(&self, ids: &[AccountId], staff: bool) -> RepositoryResult<usize>;
}

/// Read-only operations for variations.
pub trait VariationReader {
    fn list_variations(
        &self,
        query: VariationListQuery,
    ) -> RepositoryResult<(usize, Vec<Variation>)>;
}

/// Site-wide counters for the admin dashboard.
pub trait StatsReader {
    /// Counts with "low stock" meaning `stock <= low_stock_threshold`.
    fn site_stats(&self, low_stock_threshold: i32) -> RepositoryResult<SiteStats>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("shoe"), "%shoe%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
