use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{TypeConstraintError, VariationCategory, VariationValue};
use crate::domain::variation::Variation as DomainVariation;

/// Diesel model representing the `variations` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::variations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Variation {
    pub id: i32,
    pub product_id: i32,
    pub variation_category: String,
    pub variation_value: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl TryFrom<(Variation, String)> for DomainVariation {
    type Error = TypeConstraintError;

    fn try_from((variation, product_name): (Variation, String)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: variation.id.try_into()?,
            product_id: variation.product_id.try_into()?,
            product_name,
            category: VariationCategory::try_from(variation.variation_category)?,
            value: VariationValue::new(variation.variation_value)?,
            is_active: variation.is_active,
            created_at: variation.created_at,
        })
    }
}
