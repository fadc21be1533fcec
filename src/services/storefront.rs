//! Catalog browsing: home page, category listings, product details and search.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::category::Category;
use crate::domain::gallery::GalleryImage;
use crate::domain::product::Product;
use crate::domain::review::{RatingSummary, Review};
use crate::domain::types::Slug;
use crate::pagination::{PageRequest, Paginated};
use crate::repository::{
    CartReader, CategoryReader, GalleryListQuery, GalleryReader, OrderReader, ProductListQuery,
    ProductReader, ProductSearchScope, ReviewListQuery, ReviewReader,
};
use crate::services::{ServiceError, ServiceResult, fetch_page};

/// Products shown per shop page.
pub const SHOP_PAGE_SIZE: usize = 6;

/// A category listing page.
#[derive(Debug)]
pub struct ShopPage {
    /// `None` when browsing all categories.
    pub category: Option<Category>,
    pub products: Paginated<Product>,
}

/// Everything the product detail page shows.
#[derive(Debug)]
pub struct ProductDetails {
    pub product: Product,
    pub gallery: Vec<GalleryImage>,
    /// Approved reviews, most recently updated first.
    pub reviews: Vec<Review>,
    pub rating: RatingSummary,
    pub in_cart: bool,
    pub purchased: bool,
}

/// Result of a keyword search.
#[derive(Debug, Default)]
pub struct SearchResults {
    pub keyword: String,
    pub products: Vec<Product>,
}

impl SearchResults {
    pub fn count(&self) -> usize {
        self.products.len()
    }
}

/// All available products, newest first.
pub fn show_home<R>(repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader,
{
    match repo.list_products(ProductListQuery::default().available(true)) {
        Ok((_, products)) => Ok(products),
        Err(e) => {
            log::error!("Failed to list products for home page: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Available products of one category (or of all categories), one page at a time.
///
/// Unknown category slugs yield [`ServiceError::NotFound`]. Out-of-range
/// pages are clamped to the nearest valid page.
pub fn show_shop<R>(
    category_slug: Option<&str>,
    page: PageRequest,
    repo: &R,
) -> ServiceResult<ShopPage>
where
    R: CategoryReader + ProductReader,
{
    let category = match category_slug {
        Some(slug) => {
            let slug = Slug::new(slug).map_err(|_| ServiceError::NotFound)?;
            match repo.get_category_by_slug(&slug) {
                Ok(Some(category)) => Some(category),
                Ok(None) => return Err(ServiceError::NotFound),
                Err(e) => {
                    log::error!("Failed to get category `{slug}`: {e}");
                    return Err(ServiceError::Internal);
                }
            }
        }
        None => None,
    };

    let mut query = ProductListQuery::default().available(true);
    if let Some(category) = &category {
        query = query.category(category.id);
    }

    let products = fetch_page(page, SHOP_PAGE_SIZE, |pagination| {
        repo.list_products(ProductListQuery {
            pagination: Some(pagination),
            ..query.clone()
        })
    })
    .map_err(|e| {
        log::error!("Failed to list shop products: {e}");
        ServiceError::Internal
    })?;

    Ok(ShopPage { category, products })
}

/// Product detail page data looked up by category and product slugs.
///
/// `cart_id` is the session cart identifier, if the visitor has one.
pub fn show_product_details<R>(
    category_slug: &str,
    product_slug: &str,
    cart_id: Option<&str>,
    user: Option<&AuthenticatedUser>,
    repo: &R,
) -> ServiceResult<ProductDetails>
where
    R: ProductReader + GalleryReader + ReviewReader + CartReader + OrderReader,
{
    let (Ok(category_slug), Ok(product_slug)) = (Slug::new(category_slug), Slug::new(product_slug))
    else {
        return Err(ServiceError::NotFound);
    };

    let product = match repo.get_product_by_slugs(&category_slug, &product_slug) {
        Ok(Some(product)) => product,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product `{category_slug}/{product_slug}`: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let in_cart = match cart_id {
        Some(cart_id) => repo.is_in_cart(cart_id, product.id).map_err(|e| {
            log::error!("Failed to check cart `{cart_id}`: {e}");
            ServiceError::Internal
        })?,
        None => false,
    };

    let purchased = match user {
        Some(user) => repo.has_purchased(user.id, product.id).map_err(|e| {
            log::error!("Failed to check purchases of user {}: {e}", user.id);
            ServiceError::Internal
        })?,
        None => false,
    };

    let gallery = match repo.list_gallery(GalleryListQuery::default().product(product.id)) {
        Ok((_, gallery)) => gallery,
        Err(e) => {
            log::error!("Failed to list gallery of product {}: {e}", product.id);
            return Err(ServiceError::Internal);
        }
    };

    let reviews = match repo.list_reviews(ReviewListQuery::default().product(product.id).approved(true)) {
        Ok((_, reviews)) => reviews,
        Err(e) => {
            log::error!("Failed to list reviews of product {}: {e}", product.id);
            return Err(ServiceError::Internal);
        }
    };
    let rating = RatingSummary::from_reviews(&reviews);

    Ok(ProductDetails {
        product,
        gallery,
        reviews,
        rating,
        in_cart,
        purchased,
    })
}

/// Case-insensitive search over product names and descriptions.
///
/// A missing or blank keyword returns no products without querying.
pub fn search_products<R>(keyword: Option<&str>, repo: &R) -> ServiceResult<SearchResults>
where
    R: ProductReader,
{
    let keyword = keyword.map(str::trim).unwrap_or_default();
    if keyword.is_empty() {
        return Ok(SearchResults::default());
    }

    match repo.list_products(
        ProductListQuery::default().search(keyword, ProductSearchScope::NameOrDescription),
    ) {
        Ok((_, products)) => Ok(SearchResults {
            keyword: keyword.to_string(),
            products,
        }),
        Err(e) => {
            log::error!("Failed to search products for `{keyword}`: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::review::Review;
    use crate::domain::types::{
        AccountId, GalleryImageId, ImagePath, ProductDescription, ProductId, ProductName, Rating,
        ReviewId,
    };
    use crate::repository::test::{TestRepository, at, category, product};

    fn catalog(count: i32) -> TestRepository {
        let shoes = category(1, "Shoes");
        let shirts = category(2, "Shirts");
        let mut products: Vec<Product> = (1..=count)
            .map(|id| product(id, &format!("Runner {id}"), &shoes))
            .collect();
        products.push(product(100, "Oxford Shirt", &shirts));
        TestRepository::new()
            .with_categories(vec![shoes, shirts])
            .with_products(products)
    }

    fn review(id: i32, rating: i32, status: bool, updated: i64) -> Review {
        Review {
            id: ReviewId::new(id).unwrap(),
            product_id: ProductId::new(1).unwrap(),
            product_name: "Runner 1".into(),
            user_id: AccountId::new(id).unwrap(),
            author: format!("user{id}"),
            subject: format!("Review {id}"),
            review: String::new(),
            rating: Rating::new(rating).unwrap(),
            ip: "127.0.0.1".into(),
            status,
            created_at: at(0),
            updated_at: at(updated),
        }
    }

    #[test]
    fn shop_paginates_six_per_page() {
        let repo = catalog(13);

        let page = show_shop(Some("shoes"), PageRequest::first(), &repo).unwrap();
        assert_eq!(page.category.unwrap().name.as_str(), "Shoes");
        assert_eq!(page.products.items.len(), 6);
        assert_eq!(page.products.total, 13);
        assert_eq!(page.products.pages, 3);
        // Newest first.
        assert_eq!(page.products.items[0].id.get(), 13);

        let last = show_shop(Some("shoes"), PageRequest::from(3), &repo).unwrap();
        assert_eq!(last.products.items.len(), 1);
    }

    #[test]
    fn shop_clamps_out_of_range_pages() {
        let repo = catalog(13);

        let beyond = show_shop(Some("shoes"), PageRequest::parse(Some("99")), &repo).unwrap();
        assert_eq!(beyond.products.page, 3);

        let below = show_shop(Some("shoes"), PageRequest::parse(Some("-2")), &repo).unwrap();
        assert_eq!(below.products.page, 1);

        let garbage = show_shop(None, PageRequest::parse(Some("abc")), &repo).unwrap();
        assert_eq!(garbage.products.page, 1);
        assert_eq!(garbage.products.total, 14);
    }

    #[test]
    fn shop_hides_unavailable_products() {
        let shoes = category(1, "Shoes");
        let mut hidden = product(2, "Hidden", &shoes);
        hidden.is_available = false;
        let repo = TestRepository::new()
            .with_categories(vec![shoes.clone()])
            .with_products(vec![product(1, "Visible", &shoes), hidden]);

        let page = show_shop(None, PageRequest::first(), &repo).unwrap();
        assert_eq!(page.products.total, 1);
        assert_eq!(show_home(&repo).unwrap().len(), 1);
    }

    #[test]
    fn shop_unknown_category_is_not_found() {
        let repo = catalog(1);
        assert_eq!(
            show_shop(Some("hats"), PageRequest::first(), &repo).unwrap_err(),
            ServiceError::NotFound
        );
        assert_eq!(
            show_shop(Some("not a slug"), PageRequest::first(), &repo).unwrap_err(),
            ServiceError::NotFound
        );
    }

    #[test]
    fn shop_failure_is_internal() {
        let repo = catalog(1).failing();
        assert_eq!(
            show_shop(None, PageRequest::first(), &repo).unwrap_err(),
            ServiceError::Internal
        );
    }

    #[test]
    fn search_matches_name_or_description_case_insensitively() {
        let shoes = category(1, "Shoes");
        let mut boot = product(1, "Hiking Boot", &shoes);
        boot.description = Some(ProductDescription::new("Sturdy SHOE for trails").unwrap());
        let mut sandal = product(2, "Sandal", &shoes);
        sandal.description = None;
        let mut sneaker = product(3, "Street Shoe", &shoes);
        sneaker.is_available = false;
        let repo = TestRepository::new().with_products(vec![boot, sandal, sneaker]);

        let results = search_products(Some("  shoe "), &repo).unwrap();
        assert_eq!(results.keyword, "shoe");
        assert_eq!(results.count(), 2);
        assert!(results.products.iter().all(|p| p.name != ProductName::new("Sandal").unwrap()));
    }

    #[test]
    fn blank_search_returns_nothing() {
        let repo = catalog(3);
        assert_eq!(search_products(None, &repo).unwrap().count(), 0);
        assert_eq!(search_products(Some("   "), &repo).unwrap().count(), 0);
    }

    fn gallery_image(id: i32, product_id: i32, path: &str) -> GalleryImage {
        GalleryImage {
            id: GalleryImageId::new(id).unwrap(),
            product_id: ProductId::new(product_id).unwrap(),
            image: ImagePath::new(path).unwrap(),
        }
    }

    #[test]
    fn product_details_collects_approved_reviews_and_flags() {
        let user = AuthenticatedUser {
            id: AccountId::new(7).unwrap(),
        };
        let repo = catalog(2)
            .with_reviews(vec![
                review(1, 5, true, 10),
                review(2, 3, true, 20),
                review(3, 1, false, 30),
            ])
            .with_gallery(vec![
                gallery_image(1, 1, "photos/gallery/runner-side.jpg"),
                gallery_image(2, 2, "photos/gallery/other.jpg"),
            ])
            .with_cart_item("cart-1", ProductId::new(1).unwrap())
            .with_purchase(user.id, ProductId::new(1).unwrap());

        let details =
            show_product_details("shoes", "runner-1", Some("cart-1"), Some(&user), &repo).unwrap();
        assert_eq!(details.reviews.len(), 2);
        assert_eq!(details.reviews[0].id.get(), 2);
        assert_eq!(details.rating.count, 2);
        assert!((details.rating.average - 4.0).abs() < f64::EPSILON);
        assert!(details.in_cart);
        assert!(details.purchased);
        assert_eq!(details.gallery.len(), 1);
        assert_eq!(details.gallery[0].image.as_str(), "photos/gallery/runner-side.jpg");

        let anonymous = show_product_details("shoes", "runner-1", None, None, &repo).unwrap();
        assert!(!anonymous.in_cart);
        assert!(!anonymous.purchased);
    }

    #[test]
    fn product_details_requires_matching_category() {
        let repo = catalog(2);
        assert_eq!(
            show_product_details("shirts", "runner-1", None, None, &repo).unwrap_err(),
            ServiceError::NotFound
        );
        assert_eq!(
            show_product_details("shoes", "missing", None, None, &repo).unwrap_err(),
            ServiceError::NotFound
        );
    }
}
