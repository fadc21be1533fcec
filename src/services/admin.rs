//! Admin dashboard and list screens.

use crate::domain::account::{Account, UserProfile};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::blog::BlogPost;
use crate::domain::category::Category;
use crate::domain::gallery::GalleryImage;
use crate::domain::order::{Order, OrderProduct, Payment};
use crate::domain::product::Product;
use crate::domain::review::Review;
use crate::domain::stats::SiteStats;
use crate::domain::variation::Variation;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, PageRequest, Paginated, Pagination};
use crate::repository::{
    AccountListQuery, AccountReader, BlogListQuery, BlogReader, CategoryListQuery,
    CategoryReader, GalleryListQuery, GalleryReader, OrderListQuery, OrderProductListQuery,
    OrderReader, PaymentListQuery, ProductListQuery, ProductReader, ProfileListQuery,
    RepositoryResult, ReviewListQuery, ReviewReader, StatsReader, VariationListQuery,
    VariationReader,
};
use crate::services::{ServiceError, ServiceResult, fetch_page};

/// Products at or below this stock count are reported as low on the dashboard.
pub const LOW_STOCK_THRESHOLD: i32 = 5;
pub const ORDERS_PER_PAGE: usize = 20;
pub const VARIATIONS_PER_PAGE: usize = 30;

/// Resolve the logged-in user into an account allowed to use the admin.
///
/// Anonymous visitors get [`ServiceError::Unauthorized`]; accounts that are
/// inactive or neither staff nor superadmin get [`ServiceError::Forbidden`].
pub fn require_admin<R: AccountReader>(
    user: Option<&AuthenticatedUser>,
    repo: &R,
) -> ServiceResult<Account> {
    let Some(user) = user else {
        return Err(ServiceError::Unauthorized);
    };

    match repo.get_account_by_id(user.id) {
        Ok(Some(account)) if account.can_administer() => Ok(account),
        Ok(_) => Err(ServiceError::Forbidden),
        Err(e) => {
            log::error!("Failed to get account {}: {e}", user.id);
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_dashboard<R: StatsReader>(repo: &R) -> ServiceResult<SiteStats> {
    repo.site_stats(LOW_STOCK_THRESHOLD).map_err(|e| {
        log::error!("Failed to collect site stats: {e}");
        ServiceError::Internal
    })
}

/// Every category, for filter drop-downs.
pub fn category_choices<R: CategoryReader>(repo: &R) -> ServiceResult<Vec<Category>> {
    match repo.list_categories(CategoryListQuery::default()) {
        Ok((_, categories)) => Ok(categories),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn list_screen<T, F>(
    screen: &str,
    page: PageRequest,
    per_page: usize,
    fetch: F,
) -> ServiceResult<Paginated<T>>
where
    F: Fn(Pagination) -> RepositoryResult<(usize, Vec<T>)>,
{
    fetch_page(page, per_page, fetch).map_err(|e| {
        log::error!("Failed to list admin {screen}: {e}");
        ServiceError::Internal
    })
}

pub fn list_accounts<R: AccountReader>(
    query: AccountListQuery,
    page: PageRequest,
    repo: &R,
) -> ServiceResult<Paginated<Account>> {
    list_screen("accounts", page, DEFAULT_ITEMS_PER_PAGE, |pagination| {
        repo.list_accounts(query.clone().paginate(pagination.page, pagination.per_page))
    })
}

pub fn list_profiles<R: AccountReader>(
    query: ProfileListQuery,
    page: PageRequest,
    repo: &R,
) -> ServiceResult<Paginated<UserProfile>> {
    list_screen("profiles", page, DEFAULT_ITEMS_PER_PAGE, |pagination| {
        repo.list_user_profiles(query.clone().paginate(pagination.page, pagination.per_page))
    })
}

pub fn list_products<R: ProductReader>(
    query: ProductListQuery,
    page: PageRequest,
    repo: &R,
) -> ServiceResult<Paginated<Product>> {
    list_screen("products", page, DEFAULT_ITEMS_PER_PAGE, |pagination| {
        repo.list_products(query.clone().paginate(pagination.page, pagination.per_page))
    })
}

pub fn list_categories<R: CategoryReader>(
    query: CategoryListQuery,
    page: PageRequest,
    repo: &R,
) -> ServiceResult<Paginated<Category>> {
    list_screen("categories", page, DEFAULT_ITEMS_PER_PAGE, |pagination| {
        repo.list_categories(query.clone().paginate(pagination.page, pagination.per_page))
    })
}

pub fn list_variations<R: VariationReader>(
    query: VariationListQuery,
    page: PageRequest,
    repo: &R,
) -> ServiceResult<Paginated<Variation>> {
    list_screen("variations", page, VARIATIONS_PER_PAGE, |pagination| {
        repo.list_variations(query.clone().paginate(pagination.page, pagination.per_page))
    })
}

pub fn list_reviews<R: ReviewReader>(
    query: ReviewListQuery,
    page: PageRequest,
    repo: &R,
) -> ServiceResult<Paginated<Review>> {
    list_screen("reviews", page, DEFAULT_ITEMS_PER_PAGE, |pagination| {
        repo.list_reviews(query.clone().paginate(pagination.page, pagination.per_page))
    })
}

pub fn list_gallery<R: GalleryReader>(
    query: GalleryListQuery,
    page: PageRequest,
    repo: &R,
) -> ServiceResult<Paginated<GalleryImage>> {
    list_screen("gallery", page, DEFAULT_ITEMS_PER_PAGE, |pagination| {
        repo.list_gallery(query.clone().paginate(pagination.page, pagination.per_page))
    })
}

pub fn list_blog_posts<R: BlogReader>(
    query: BlogListQuery,
    page: PageRequest,
    repo: &R,
) -> ServiceResult<Paginated<BlogPost>> {
    list_screen("blog posts", page, DEFAULT_ITEMS_PER_PAGE, |pagination| {
        repo.list_blog_posts(query.clone().paginate(pagination.page, pagination.per_page))
    })
}

pub fn list_orders<R: OrderReader>(
    query: OrderListQuery,
    page: PageRequest,
    repo: &R,
) -> ServiceResult<Paginated<Order>> {
    list_screen("orders", page, ORDERS_PER_PAGE, |pagination| {
        repo.list_orders(query.clone().paginate(pagination.page, pagination.per_page))
    })
}

pub fn list_order_products<R: OrderReader>(
    query: OrderProductListQuery,
    page: PageRequest,
    repo: &R,
) -> ServiceResult<Paginated<OrderProduct>> {
    list_screen("order products", page, DEFAULT_ITEMS_PER_PAGE, |pagination| {
        repo.list_order_products(query.clone().paginate(pagination.page, pagination.per_page))
    })
}

pub fn list_payments<R: OrderReader>(
    query: PaymentListQuery,
    page: PageRequest,
    repo: &R,
) -> ServiceResult<Paginated<Payment>> {
    list_screen("payments", page, DEFAULT_ITEMS_PER_PAGE, |pagination| {
        repo.list_payments(query.clone().paginate(pagination.page, pagination.per_page))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{AccountId, StockCount};
    use crate::repository::test::{TestRepository, account, category, product};

    fn user(id: i32) -> AuthenticatedUser {
        AuthenticatedUser {
            id: AccountId::new(id).unwrap(),
        }
    }

    fn staff_repo() -> TestRepository {
        let mut staff = account(1, "staff");
        staff.is_staff = true;
        let mut root = account(2, "root");
        root.is_superadmin = true;
        let customer = account(3, "customer");
        let mut retired = account(4, "retired");
        retired.is_staff = true;
        retired.is_active = false;
        TestRepository::new().with_accounts(vec![staff, root, customer, retired])
    }

    #[test]
    fn staff_and_superadmins_may_administer() {
        let repo = staff_repo();
        assert!(require_admin(Some(&user(1)), &repo).is_ok());
        assert!(require_admin(Some(&user(2)), &repo).is_ok());
    }

    #[test]
    fn others_are_rejected() {
        let repo = staff_repo();
        assert_eq!(
            require_admin(None, &repo).unwrap_err(),
            ServiceError::Unauthorized
        );
        assert_eq!(
            require_admin(Some(&user(3)), &repo).unwrap_err(),
            ServiceError::Forbidden
        );
        assert_eq!(
            require_admin(Some(&user(4)), &repo).unwrap_err(),
            ServiceError::Forbidden
        );
        assert_eq!(
            require_admin(Some(&user(99)), &repo).unwrap_err(),
            ServiceError::Forbidden
        );
    }

    #[test]
    fn dashboard_counts_low_stock() {
        let shoes = category(1, "Shoes");
        let mut low = product(1, "Low", &shoes);
        low.stock = StockCount::new(5).unwrap();
        let mut hidden = product(2, "Hidden", &shoes);
        hidden.is_available = false;
        let repo = staff_repo().with_products(vec![low, hidden, product(3, "Plenty", &shoes)]);

        let stats = show_dashboard(&repo).unwrap();
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.available_products, 2);
        assert_eq!(stats.low_stock, 1);
        assert_eq!(stats.users_count, 4);
    }

    #[test]
    fn account_list_is_paginated() {
        let accounts = (1..=30).map(|id| account(id, &format!("user{id}"))).collect();
        let repo = TestRepository::new().with_accounts(accounts);

        let page = list_accounts(AccountListQuery::default(), PageRequest::from(2), &repo).unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.pages, 2);
    }
}
