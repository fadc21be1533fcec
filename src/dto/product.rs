use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::gallery::GalleryImage;
use crate::domain::product::Product;
use crate::domain::review::Review;

/// Product fields as templates display them.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub url: String,
    pub description: String,
    pub category_name: String,
    pub category_url: String,
    pub price: f64,
    pub effective_price: f64,
    pub discounted: bool,
    /// Media-relative image path.
    pub image: Option<String>,
    pub stock: i32,
    pub is_available: bool,
    pub new: bool,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.get(),
            url: product.url(),
            effective_price: product.effective_price(),
            discounted: product.is_discounted(),
            category_url: format!("/shop/{}/", product.category.slug),
            category_name: product.category.name.into_inner(),
            name: product.name.into_inner(),
            description: product
                .description
                .map(|d| d.into_inner())
                .unwrap_or_default(),
            price: product.price.get(),
            image: product.image.map(|i| i.into_inner()),
            stock: product.stock.get(),
            is_available: product.is_available,
            new: product.new,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub name: String,
    pub url: String,
    pub description: Option<String>,
}

impl From<Category> for CategoryView {
    fn from(category: Category) -> Self {
        Self {
            url: category.url(),
            name: category.name.into_inner(),
            description: category.description,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewView {
    pub author: String,
    pub subject: String,
    pub review: String,
    pub rating: i32,
    pub updated_at: String,
}

impl From<Review> for ReviewView {
    fn from(review: Review) -> Self {
        Self {
            author: review.author,
            subject: review.subject,
            review: review.review,
            rating: review.rating.get(),
            updated_at: review.updated_at.format("%b %d, %Y").to_string(),
        }
    }
}

/// Media-relative paths of the product gallery.
pub fn gallery_paths(gallery: Vec<GalleryImage>) -> Vec<String> {
    gallery.into_iter().map(|g| g.image.into_inner()).collect()
}
