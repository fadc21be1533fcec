use std::sync::Mutex;

use chrono::{DateTime, NaiveDateTime};

use crate::domain::account::{Account, UserProfile};
use crate::domain::blog::BlogPost;
use crate::domain::category::Category;
use crate::domain::gallery::GalleryImage;
use crate::domain::order::{Order, OrderProduct, Payment};
use crate::domain::product::{Product, ProductCategory};
use crate::domain::review::{NewReview, Review, ReviewUpdate};
use crate::domain::stats::SiteStats;
use crate::domain::types::{
    AccountId, BlogPostId, BlogTitle, CategoryId, CategoryName, EmailAddress, ProductDescription,
    ProductDiscount, ProductId, ProductName, ProductPrice, ReviewId, Slug, StockCount, Username,
};
use crate::domain::variation::Variation;
use crate::pagination::Pagination;
use crate::repository::{
    AccountListQuery, AccountReader, AccountWriter, BlogListQuery, BlogReader, CartReader,
    CategoryListQuery, CategoryReader, GalleryListQuery, GalleryReader, OrderListQuery,
    OrderProductListQuery, OrderReader, PaymentListQuery, ProductListQuery, ProductReader,
    ProductSearchScope, ProductWriter, ProfileListQuery, RepositoryError, RepositoryResult,
    ReviewListQuery, ReviewReader, ReviewWriter, StatsReader, VariationListQuery,
    VariationReader,
};

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    categories: Vec<Category>,
    products: Mutex<Vec<Product>>,
    gallery: Vec<GalleryImage>,
    reviews: Mutex<Vec<Review>>,
    blog_posts: Vec<BlogPost>,
    blog_table_missing: bool,
    cart: Vec<(String, ProductId)>,
    purchases: Vec<(AccountId, ProductId)>,
    accounts: Mutex<Vec<Account>>,
    fail_reads: bool,
}

impl TestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        *self.products.lock().unwrap() = products;
        self
    }

    pub fn with_gallery(mut self, gallery: Vec<GalleryImage>) -> Self {
        self.gallery = gallery;
        self
    }

    pub fn with_reviews(self, reviews: Vec<Review>) -> Self {
        *self.reviews.lock().unwrap() = reviews;
        self
    }

    pub fn with_blog_posts(mut self, posts: Vec<BlogPost>) -> Self {
        self.blog_posts = posts;
        self
    }

    /// Behave as if the blog table was never migrated.
    pub fn without_blog_table(mut self) -> Self {
        self.blog_table_missing = true;
        self
    }

    pub fn with_cart_item(mut self, cart_id: &str, product_id: ProductId) -> Self {
        self.cart.push((cart_id.to_string(), product_id));
        self
    }

    pub fn with_purchase(mut self, user_id: AccountId, product_id: ProductId) -> Self {
        self.purchases.push((user_id, product_id));
        self
    }

    pub fn with_accounts(self, accounts: Vec<Account>) -> Self {
        *self.accounts.lock().unwrap() = accounts;
        self
    }

    /// Make every product read fail with a database error.
    pub fn failing(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.lock().unwrap().clone()
    }

    pub fn reviews(&self) -> Vec<Review> {
        self.reviews.lock().unwrap().clone()
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.lock().unwrap().clone()
    }

    fn check_reads(&self) -> RepositoryResult<()> {
        if self.fail_reads {
            return Err(RepositoryError::Database(diesel::result::Error::BrokenTransactionManager));
        }
        Ok(())
    }

    fn check_blog_table(&self) -> RepositoryResult<()> {
        if self.blog_table_missing {
            return Err(RepositoryError::Unprovisioned("blog_posts".to_string()));
        }
        Ok(())
    }
}

fn window<T>(items: Vec<T>, pagination: Option<Pagination>) -> Vec<T> {
    match pagination {
        Some(pagination) => items
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.per_page)
            .collect(),
        None => items,
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches_search(product: &Product, term: &str, scope: ProductSearchScope) -> bool {
    let name = contains(product.name.as_str(), term);
    let description = product
        .description
        .as_ref()
        .is_some_and(|d| contains(d.as_str(), term));
    let category = contains(product.category.name.as_str(), term);
    match scope {
        ProductSearchScope::NameOrDescription => name || description,
        ProductSearchScope::NameOrCategory => name || category,
        ProductSearchScope::Everything => name || description || category,
    }
}

impl CategoryReader for TestRepository {
    fn get_category_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Category>> {
        Ok(self.categories.iter().find(|c| &c.slug == slug).cloned())
    }

    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<Category>)> {
        let mut items = self.categories.clone();
        if let Some(search) = &query.search {
            items.retain(|c| contains(c.name.as_str(), search));
        }
        let total = items.len();
        Ok((total, window(items, query.pagination)))
    }
}

impl ProductReader for TestRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        self.check_reads()?;
        let mut items = self.products();
        if let Some(category_id) = query.category_id {
            items.retain(|p| p.category.id == category_id);
        }
        if let Some(is_available) = query.is_available {
            items.retain(|p| p.is_available == is_available);
        }
        if let Some(new) = query.new {
            items.retain(|p| p.new == new);
        }
        if let Some(search) = &query.search {
            items.retain(|p| matches_search(p, &search.term, search.scope));
        }
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let total = items.len();
        Ok((total, window(items, query.pagination)))
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        self.check_reads()?;
        Ok(self.products().into_iter().find(|p| p.id == id))
    }

    fn get_product_by_slugs(
        &self,
        category_slug: &Slug,
        product_slug: &Slug,
    ) -> RepositoryResult<Option<Product>> {
        self.check_reads()?;
        Ok(self
            .products()
            .into_iter()
            .find(|p| &p.category.slug == category_slug && &p.slug == product_slug))
    }
}

impl ProductWriter for TestRepository {
    fn set_products_available(
        &self,
        ids: &[ProductId],
        available: bool,
    ) -> RepositoryResult<usize> {
        let mut products = self.products.lock().unwrap();
        let mut affected = 0;
        for product in products.iter_mut().filter(|p| ids.contains(&p.id)) {
            product.is_available = available;
            affected += 1;
        }
        Ok(affected)
    }

    fn set_products_new(&self, ids: &[ProductId], new: bool) -> RepositoryResult<usize> {
        let mut products = self.products.lock().unwrap();
        let mut affected = 0;
        for product in products.iter_mut().filter(|p| ids.contains(&p.id)) {
            product.new = new;
            affected += 1;
        }
        Ok(affected)
    }

    fn apply_discount_percent(&self, ids: &[ProductId], percent: f64) -> RepositoryResult<usize> {
        let mut products = self.products.lock().unwrap();
        let mut affected = 0;
        for product in products.iter_mut().filter(|p| ids.contains(&p.id)) {
            product.discount = ProductDiscount::new(product.price.get() * percent / 100.0)?;
            affected += 1;
        }
        Ok(affected)
    }
}

impl GalleryReader for TestRepository {
    fn list_gallery(
        &self,
        query: GalleryListQuery,
    ) -> RepositoryResult<(usize, Vec<GalleryImage>)> {
        let mut items = self.gallery.clone();
        if let Some(product_id) = query.product_id {
            items.retain(|g| g.product_id == product_id);
        }
        let total = items.len();
        Ok((total, window(items, query.pagination)))
    }
}

impl ReviewReader for TestRepository {
    fn get_review(
        &self,
        user_id: AccountId,
        product_id: ProductId,
    ) -> RepositoryResult<Option<Review>> {
        Ok(self
            .reviews()
            .into_iter()
            .find(|r| r.user_id == user_id && r.product_id == product_id))
    }

    fn list_reviews(&self, query: ReviewListQuery) -> RepositoryResult<(usize, Vec<Review>)> {
        let mut items = self.reviews();
        if let Some(product_id) = query.product_id {
            items.retain(|r| r.product_id == product_id);
        }
        if let Some(status) = query.status {
            items.retain(|r| r.status == status);
        }
        if let Some(rating) = query.rating {
            items.retain(|r| r.rating == rating);
        }
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        let total = items.len();
        Ok((total, window(items, query.pagination)))
    }
}

impl ReviewWriter for TestRepository {
    fn create_review(&self, review: &NewReview) -> RepositoryResult<usize> {
        let product_name = self
            .products()
            .into_iter()
            .find(|p| p.id == review.product_id)
            .map(|p| p.name.into_inner())
            .ok_or(RepositoryError::NotFound)?;
        let mut reviews = self.reviews.lock().unwrap();
        if reviews
            .iter()
            .any(|r| r.user_id == review.user_id && r.product_id == review.product_id)
        {
            return Err(RepositoryError::Conflict(
                "UNIQUE constraint failed: review_ratings.user_id, review_ratings.product_id"
                    .to_string(),
            ));
        }
        let id = ReviewId::new(reviews.len() as i32 + 1)?;
        reviews.push(Review {
            id,
            product_id: review.product_id,
            product_name,
            user_id: review.user_id,
            author: format!("user{}", review.user_id),
            subject: review.subject.clone(),
            review: review.review.clone(),
            rating: review.rating,
            ip: review.ip.clone(),
            status: review.status,
            created_at: review.created_at,
            updated_at: review.updated_at,
        });
        Ok(1)
    }

    fn update_review(&self, id: ReviewId, update: &ReviewUpdate) -> RepositoryResult<usize> {
        let mut reviews = self.reviews.lock().unwrap();
        let Some(review) = reviews.iter_mut().find(|r| r.id == id) else {
            return Ok(0);
        };
        review.subject = update.subject.clone();
        review.review = update.review.clone();
        review.rating = update.rating;
        review.ip = update.ip.clone();
        review.updated_at = update.updated_at;
        Ok(1)
    }
}

impl BlogReader for TestRepository {
    fn count_published_posts(&self) -> RepositoryResult<usize> {
        self.check_blog_table()?;
        Ok(self.blog_posts.iter().filter(|p| p.is_published).count())
    }

    fn list_blog_posts(&self, query: BlogListQuery) -> RepositoryResult<(usize, Vec<BlogPost>)> {
        self.check_blog_table()?;
        let mut items = self.blog_posts.clone();
        if let Some(is_published) = query.is_published {
            items.retain(|p| p.is_published == is_published);
        }
        if let Some(search) = &query.search {
            items.retain(|p| contains(p.title.as_str(), search) || contains(&p.content, search));
        }
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(b.id.cmp(&a.id)));
        let total = items.len();
        Ok((total, window(items, query.pagination)))
    }

    fn get_published_post_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<BlogPost>> {
        self.check_blog_table()?;
        Ok(self
            .blog_posts
            .iter()
            .find(|p| p.is_published && &p.slug == slug)
            .cloned())
    }
}

impl CartReader for TestRepository {
    fn is_in_cart(&self, cart_id: &str, product_id: ProductId) -> RepositoryResult<bool> {
        Ok(self
            .cart
            .iter()
            .any(|(cart, product)| cart == cart_id && *product == product_id))
    }
}

impl OrderReader for TestRepository {
    fn has_purchased(&self, user_id: AccountId, product_id: ProductId) -> RepositoryResult<bool> {
        Ok(self.purchases.contains(&(user_id, product_id)))
    }

    fn list_orders(&self, _query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)> {
        Ok((0, Vec::new()))
    }

    fn list_order_products(
        &self,
        _query: OrderProductListQuery,
    ) -> RepositoryResult<(usize, Vec<OrderProduct>)> {
        Ok((0, Vec::new()))
    }

    fn list_payments(&self, _query: PaymentListQuery) -> RepositoryResult<(usize, Vec<Payment>)> {
        Ok((0, Vec::new()))
    }
}

impl AccountReader for TestRepository {
    fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<Account>> {
        Ok(self.accounts().into_iter().find(|a| a.id == id))
    }

    fn list_accounts(&self, query: AccountListQuery) -> RepositoryResult<(usize, Vec<Account>)> {
        let mut items = self.accounts();
        if let Some(is_active) = query.is_active {
            items.retain(|a| a.is_active == is_active);
        }
        if let Some(is_staff) = query.is_staff {
            items.retain(|a| a.is_staff == is_staff);
        }
        if let Some(search) = &query.search {
            items.retain(|a| contains(a.email.as_str(), search) || contains(a.username.as_str(), search));
        }
        let total = items.len();
        Ok((total, window(items, query.pagination)))
    }

    fn list_user_profiles(
        &self,
        _query: ProfileListQuery,
    ) -> RepositoryResult<(usize, Vec<UserProfile>)> {
        Ok((0, Vec::new()))
    }
}

impl AccountWriter for TestRepository {
    fn set_accounts_active(&self, ids: &[AccountId], active: bool) -> RepositoryResult<usize> {
        let mut accounts = self.accounts.lock().unwrap();
        let mut affected = 0;
        for account in accounts.iter_mut().filter(|a| ids.contains(&a.id)) {
            account.is_active = active;
            affected += 1;
        }
        Ok(affected)
    }

    fn set_accounts_staff(&self, ids: &[AccountId], staff: bool) -> RepositoryResult<usize> {
        let mut accounts = self.accounts.lock().unwrap();
        let mut affected = 0;
        for account in accounts.iter_mut().filter(|a| ids.contains(&a.id)) {
            account.is_staff = staff;
            affected += 1;
        }
        Ok(affected)
    }
}

impl VariationReader for TestRepository {
    fn list_variations(
        &self,
        _query: VariationListQuery,
    ) -> RepositoryResult<(usize, Vec<Variation>)> {
        Ok((0, Vec::new()))
    }
}

impl StatsReader for TestRepository {
    fn site_stats(&self, low_stock_threshold: i32) -> RepositoryResult<SiteStats> {
        let products = self.products();
        Ok(SiteStats {
            total_products: products.len(),
            available_products: products.iter().filter(|p| p.is_available).count(),
            low_stock: products
                .iter()
                .filter(|p| p.stock.get() <= low_stock_threshold)
                .count(),
            orders_count: None,
            users_count: self.accounts().len(),
        })
    }
}

/// Timestamp `seconds` after the epoch.
pub fn at(seconds: i64) -> NaiveDateTime {
    DateTime::from_timestamp(seconds, 0).unwrap().naive_utc()
}

pub fn category(id: i32, name: &str) -> Category {
    Category {
        id: CategoryId::new(id).unwrap(),
        name: CategoryName::new(name).unwrap(),
        slug: Slug::from_name(name).unwrap(),
        description: None,
        image: None,
    }
}

/// Available product created `id` seconds after the epoch, so higher ids are newer.
pub fn product(id: i32, name: &str, category: &Category) -> Product {
    Product {
        id: ProductId::new(id).unwrap(),
        category: ProductCategory {
            id: category.id,
            name: category.name.clone(),
            slug: category.slug.clone(),
        },
        name: ProductName::new(name).unwrap(),
        slug: Slug::from_name(name).unwrap(),
        description: Some(ProductDescription::new(format!("All about {name}")).unwrap()),
        price: ProductPrice::new(100.0).unwrap(),
        discount: ProductDiscount::new(0.0).unwrap(),
        image: None,
        stock: StockCount::new(20).unwrap(),
        is_available: true,
        new: false,
        created_at: at(i64::from(id)),
        updated_at: at(i64::from(id)),
    }
}

pub fn account(id: i32, username: &str) -> Account {
    Account {
        id: AccountId::new(id).unwrap(),
        first_name: String::new(),
        last_name: String::new(),
        username: Username::new(username).unwrap(),
        email: EmailAddress::new(format!("{username}@example.com")).unwrap(),
        phone_number: String::new(),
        is_active: true,
        is_staff: false,
        is_superadmin: false,
        date_joined: at(0),
        last_login: None,
    }
}

pub fn blog_post(id: i32, title: &str, published: bool) -> BlogPost {
    BlogPost {
        id: BlogPostId::new(id).unwrap(),
        title: BlogTitle::new(title).unwrap(),
        slug: Slug::from_name(title).unwrap(),
        excerpt: format!("{title} excerpt"),
        content: format!("{title} content"),
        featured_image: None,
        author: "E-SHOP".to_string(),
        is_published: published,
        published_at: at(i64::from(id)),
    }
}
