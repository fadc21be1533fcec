use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{
    AccountId, CategoryId, OrderStatus, PaymentStatus, ProductId, Rating, TypeConstraintError,
    VariationCategory,
};
use crate::pagination::PageRequest;
use crate::repository::{
    AccountListQuery, BlogListQuery, CategoryListQuery, GalleryListQuery, OrderListQuery,
    OrderProductListQuery, PaymentListQuery, ProductListQuery, ProductSearchScope,
    ProfileListQuery, ReviewListQuery, VariationListQuery,
};

/// Bulk actions offered on the admin product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductAction {
    MakeAvailable,
    MakeUnavailable,
    MarkAsNew,
    ClearNewFlag,
    ApplyDiscountPercent,
}

impl TryFrom<&str> for ProductAction {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "make_available" => Ok(Self::MakeAvailable),
            "make_unavailable" => Ok(Self::MakeUnavailable),
            "mark_as_new" => Ok(Self::MarkAsNew),
            "clear_new_flag" => Ok(Self::ClearNewFlag),
            "apply_discount_percent" => Ok(Self::ApplyDiscountPercent),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown product action: {other}"
            ))),
        }
    }
}

/// Bulk actions offered on the admin account list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountAction {
    MakeActive,
    MakeInactive,
    MakeStaff,
    RevokeStaff,
}

impl TryFrom<&str> for AccountAction {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "make_active" => Ok(Self::MakeActive),
            "make_inactive" => Ok(Self::MakeInactive),
            "make_staff" => Ok(Self::MakeStaff),
            "revoke_staff" => Ok(Self::RevokeStaff),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown account action: {other}"
            ))),
        }
    }
}

/// Bulk action submitted from an admin list.
#[derive(Debug, Deserialize, Validate)]
pub struct BulkActionForm {
    #[validate(length(min = 1))]
    pub action: String,
    /// Comma-separated ids of the selected rows.
    #[serde(default)]
    pub ids: String,
}

/// Validated bulk action over a non-empty selection.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkActionPayload<A, I> {
    pub action: A,
    pub ids: Vec<I>,
}

pub type ProductBulkActionPayload = BulkActionPayload<ProductAction, ProductId>;
pub type AccountBulkActionPayload = BulkActionPayload<AccountAction, AccountId>;

#[derive(Debug, Error)]
pub enum BulkActionFormError {
    #[error("Bulk action form validation failed: {0}")]
    Validation(String),
    #[error("Bulk action form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("No items selected.")]
    EmptySelection,
}

impl From<ValidationErrors> for BulkActionFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for BulkActionFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl<A, I> TryFrom<BulkActionForm> for BulkActionPayload<A, I>
where
    A: for<'a> TryFrom<&'a str, Error = TypeConstraintError>,
    I: TryFrom<i32, Error = TypeConstraintError> + PartialEq,
{
    type Error = BulkActionFormError;

    fn try_from(value: BulkActionForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let action = A::try_from(value.action.as_str())?;

        let mut ids: Vec<I> = Vec::new();
        for raw in value.ids.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let id = raw.parse::<i32>().map_err(|_| {
                TypeConstraintError::InvalidValue(format!("invalid id: {raw}"))
            })?;
            let id = I::try_from(id)?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        if ids.is_empty() {
            return Err(BulkActionFormError::EmptySelection);
        }

        Ok(Self { action, ids })
    }
}

/// Query string accepted by every admin list screen.
///
/// Every value is optional text so that "All" options in filter drop-downs
/// can submit an empty string.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AdminListParams {
    pub page: Option<String>,
    /// Free-text search.
    pub q: Option<String>,
    pub is_active: Option<String>,
    pub is_staff: Option<String>,
    pub is_superadmin: Option<String>,
    pub is_available: Option<String>,
    pub is_published: Option<String>,
    pub is_ordered: Option<String>,
    pub ordered: Option<String>,
    pub new: Option<String>,
    /// Category id on the product list, variation category elsewhere.
    pub category: Option<String>,
    pub product: Option<String>,
    pub status: Option<String>,
    pub rating: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub method: Option<String>,
}

fn text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn flag(value: &Option<String>) -> Option<bool> {
    match text(value)?.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn id<I: TryFrom<i32>>(value: &Option<String>) -> Option<I> {
    text(value)?.parse::<i32>().ok()?.try_into().ok()
}

impl AdminListParams {
    pub fn page(&self) -> PageRequest {
        PageRequest::parse(self.page.as_deref())
    }

    pub fn search(&self) -> Option<String> {
        text(&self.q)
    }

    pub fn accounts_query(&self) -> AccountListQuery {
        AccountListQuery {
            is_active: flag(&self.is_active),
            is_staff: flag(&self.is_staff),
            is_superadmin: flag(&self.is_superadmin),
            search: self.search(),
            pagination: None,
        }
    }

    pub fn profiles_query(&self) -> ProfileListQuery {
        ProfileListQuery {
            country: text(&self.country),
            state: text(&self.state),
            search: self.search(),
            pagination: None,
        }
    }

    pub fn products_query(&self) -> ProductListQuery {
        let mut query = ProductListQuery::default();
        if let Some(category_id) = id::<CategoryId>(&self.category) {
            query = query.category(category_id);
        }
        if let Some(is_available) = flag(&self.is_available) {
            query = query.available(is_available);
        }
        if let Some(new) = flag(&self.new) {
            query = query.new_arrivals(new);
        }
        if let Some(search) = self.search() {
            query = query.search(search, ProductSearchScope::Everything);
        }
        query
    }

    pub fn categories_query(&self) -> CategoryListQuery {
        match self.search() {
            Some(search) => CategoryListQuery::default().search(search),
            None => CategoryListQuery::default(),
        }
    }

    pub fn variations_query(&self) -> VariationListQuery {
        VariationListQuery {
            product_id: id::<ProductId>(&self.product),
            category: text(&self.category).and_then(|c| VariationCategory::try_from(c).ok()),
            is_active: flag(&self.is_active),
            search: self.search(),
            pagination: None,
        }
    }

    pub fn reviews_query(&self) -> ReviewListQuery {
        let mut query = ReviewListQuery::default();
        if let Some(status) = flag(&self.status) {
            query = query.approved(status);
        }
        if let Some(rating) = id::<Rating>(&self.rating) {
            query = query.rating(rating);
        }
        query
    }

    pub fn gallery_query(&self) -> GalleryListQuery {
        match id::<ProductId>(&self.product) {
            Some(product_id) => GalleryListQuery::default().product(product_id),
            None => GalleryListQuery::default(),
        }
    }

    pub fn blog_query(&self) -> BlogListQuery {
        let mut query = BlogListQuery::default();
        if let Some(is_published) = flag(&self.is_published) {
            query = query.published(is_published);
        }
        if let Some(search) = self.search() {
            query = query.search(search);
        }
        query
    }

    pub fn orders_query(&self) -> OrderListQuery {
        OrderListQuery {
            is_ordered: flag(&self.is_ordered),
            status: text(&self.status).and_then(|s| OrderStatus::try_from(s).ok()),
            search: self.search(),
            pagination: None,
        }
    }

    pub fn order_products_query(&self) -> OrderProductListQuery {
        OrderProductListQuery {
            ordered: flag(&self.ordered),
            search: self.search(),
            pagination: None,
        }
    }

    pub fn payments_query(&self) -> PaymentListQuery {
        PaymentListQuery {
            payment_method: text(&self.method),
            status: text(&self.status).and_then(|s| PaymentStatus::try_from(s).ok()),
            search: self.search(),
            pagination: None,
        }
    }
}
