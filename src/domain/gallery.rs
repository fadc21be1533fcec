use serde::{Deserialize, Serialize};

use crate::domain::types::{GalleryImageId, ImagePath, ProductId};

/// Additional product image shown on the detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: GalleryImageId,
    pub product_id: ProductId,
    pub image: ImagePath,
}
