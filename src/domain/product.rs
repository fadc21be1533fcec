use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, CategoryName, ImagePath, ProductDescription, ProductDiscount, ProductId,
    ProductName, ProductPrice, Slug, StockCount,
};

/// Minimal category information carried alongside a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: Slug,
}

/// A sellable catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub category: ProductCategory,
    pub name: ProductName,
    pub slug: Slug,
    pub description: Option<ProductDescription>,
    pub price: ProductPrice,
    pub discount: ProductDiscount,
    pub image: Option<ImagePath>,
    pub stock: StockCount,
    pub is_available: bool,
    pub new: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Price after discount, never below zero.
    pub fn effective_price(&self) -> f64 {
        (self.price.get() - self.discount.get()).max(0.0)
    }

    pub fn is_discounted(&self) -> bool {
        self.discount.get() > 0.0
    }

    /// Detail page URL, `/shop/{category_slug}/{product_slug}/`.
    pub fn url(&self) -> String {
        format!("/shop/{}/{}/", self.category.slug, self.slug)
    }
}
