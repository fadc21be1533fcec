use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{Product as DomainProduct, ProductCategory};
use crate::domain::types::{
    CategoryName, ImagePath, ProductDescription, ProductDiscount, ProductName, ProductPrice, Slug,
    StockCount, TypeConstraintError,
};
use crate::models::category::Category;

/// Diesel model representing the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: f64,
    pub discount: f64,
    pub image: Option<String>,
    pub stock: i32,
    pub is_available: bool,
    pub new: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Product`] used by seeding and tests.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub category_id: i32,
    pub name: &'a str,
    pub slug: &'a str,
    pub description: Option<&'a str>,
    pub price: f64,
    pub discount: f64,
    pub image: Option<&'a str>,
    pub stock: i32,
    pub is_available: bool,
    pub new: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<(Product, Category)> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from((product, category): (Product, Category)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: product.id.try_into()?,
            category: ProductCategory {
                id: category.id.try_into()?,
                name: CategoryName::new(category.name)?,
                slug: Slug::new(category.slug)?,
            },
            name: ProductName::new(product.name)?,
            slug: Slug::new(product.slug)?,
            description: product.description.and_then(|d| ProductDescription::new(d).ok()),
            price: ProductPrice::new(product.price)?,
            discount: ProductDiscount::new(product.discount)?,
            image: product.image.and_then(|i| ImagePath::new(i).ok()),
            // Oversold stock is displayed as out of stock rather than rejected.
            stock: StockCount::new(product.stock.max(0))?,
            is_available: product.is_available,
            new: product.new,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}
