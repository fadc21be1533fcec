use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName, ImagePath, Slug};

/// Catalog category products are grouped under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: Slug,
    pub description: Option<String>,
    pub image: Option<ImagePath>,
}

impl Category {
    /// Storefront listing URL for this category.
    pub fn url(&self) -> String {
        format!("/shop/{}/", self.slug)
    }
}
