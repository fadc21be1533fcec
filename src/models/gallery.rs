use diesel::prelude::*;

use crate::domain::gallery::GalleryImage as DomainGalleryImage;
use crate::domain::types::{ImagePath, TypeConstraintError};

/// Diesel model representing the `product_gallery` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_gallery)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GalleryImage {
    pub id: i32,
    pub product_id: i32,
    pub image: String,
}

impl TryFrom<GalleryImage> for DomainGalleryImage {
    type Error = TypeConstraintError;

    fn try_from(image: GalleryImage) -> Result<Self, Self::Error> {
        Ok(Self {
            id: image.id.try_into()?,
            product_id: image.product_id.try_into()?,
            image: ImagePath::new(image.image)?,
        })
    }
}
