use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ProductId, VariationCategory, VariationId, VariationValue};

/// Selectable colour or size option of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variation {
    pub id: VariationId,
    pub product_id: ProductId,
    /// Name of the product, joined for admin listings.
    pub product_name: String,
    pub category: VariationCategory,
    pub value: VariationValue,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}
