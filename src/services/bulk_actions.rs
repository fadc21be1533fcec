//! Bulk updates triggered from admin lists. Each reports a flash message
//! carrying the number of affected rows.

use crate::forms::admin::{
    AccountAction, AccountBulkActionPayload, ProductAction, ProductBulkActionPayload,
};
use crate::repository::{AccountWriter, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Discount applied by [`ProductAction::ApplyDiscountPercent`].
pub const BULK_DISCOUNT_PERCENT: f64 = 10.0;

pub fn apply_product_action<R: ProductWriter>(
    payload: &ProductBulkActionPayload,
    repo: &R,
) -> ServiceResult<String> {
    let ids = payload.ids.as_slice();
    let result = match payload.action {
        ProductAction::MakeAvailable => repo.set_products_available(ids, true),
        ProductAction::MakeUnavailable => repo.set_products_available(ids, false),
        ProductAction::MarkAsNew => repo.set_products_new(ids, true),
        ProductAction::ClearNewFlag => repo.set_products_new(ids, false),
        ProductAction::ApplyDiscountPercent => {
            repo.apply_discount_percent(ids, BULK_DISCOUNT_PERCENT)
        }
    };

    let count = result.map_err(|e| {
        log::error!("Failed to apply {:?} to products: {e}", payload.action);
        ServiceError::Internal
    })?;
    log::info!("Applied {:?} to {count} product(s)", payload.action);

    Ok(match payload.action {
        ProductAction::MakeAvailable => format!("{count} product(s) marked as available."),
        ProductAction::MakeUnavailable => format!("{count} product(s) marked as unavailable."),
        ProductAction::MarkAsNew => format!("{count} product(s) marked as NEW."),
        ProductAction::ClearNewFlag => format!("{count} product(s) cleared NEW flag."),
        ProductAction::ApplyDiscountPercent => {
            format!("Applied 10 percent discount to {count} product(s).")
        }
    })
}

pub fn apply_account_action<R: AccountWriter>(
    payload: &AccountBulkActionPayload,
    repo: &R,
) -> ServiceResult<String> {
    let ids = payload.ids.as_slice();
    let result = match payload.action {
        AccountAction::MakeActive => repo.set_accounts_active(ids, true),
        AccountAction::MakeInactive => repo.set_accounts_active(ids, false),
        AccountAction::MakeStaff => repo.set_accounts_staff(ids, true),
        AccountAction::RevokeStaff => repo.set_accounts_staff(ids, false),
    };

    let count = result.map_err(|e| {
        log::error!("Failed to apply {:?} to accounts: {e}", payload.action);
        ServiceError::Internal
    })?;
    log::info!("Applied {:?} to {count} account(s)", payload.action);

    Ok(match payload.action {
        AccountAction::MakeActive => format!("{count} user(s) marked active."),
        AccountAction::MakeInactive => format!("{count} user(s) marked inactive."),
        AccountAction::MakeStaff => format!("{count} user(s) granted staff status."),
        AccountAction::RevokeStaff => format!("{count} user(s) revoked staff status."),
    })
}
