use crate::pagination::{PageRequest, Paginated, Pagination};
use crate::repository::RepositoryResult;

pub mod admin;
pub mod blog;
pub mod bulk_actions;
pub mod errors;
pub mod reviews;
pub mod storefront;

pub use errors::{ServiceError, ServiceResult};

/// Load the requested page through `fetch`, clamping it to the valid range.
///
/// The first page is fetched to learn the total; a second query is issued
/// only when the clamped page is not the first one.
pub(crate) fn fetch_page<T, F>(
    request: PageRequest,
    per_page: usize,
    fetch: F,
) -> RepositoryResult<Paginated<T>>
where
    F: Fn(Pagination) -> RepositoryResult<(usize, Vec<T>)>,
{
    let (total, items) = fetch(Pagination { page: 1, per_page })?;
    let page = request.clamp(total, per_page);
    if page == 1 {
        return Ok(Paginated::new(items, 1, total, per_page));
    }

    let (total, items) = fetch(Pagination { page, per_page })?;
    Ok(Paginated::new(items, page, total, per_page))
}
