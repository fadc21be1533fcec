//! Page arithmetic shared by storefront and admin listings.
//!
//! Pages are 1-indexed. Requests outside the valid range are clamped to the
//! first or last page instead of failing, and a listing with no rows still
//! has a (empty) first page.

use serde::Serialize;

/// Page size used by admin listings unless a screen overrides it.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 25;

/// Offset/limit window applied by repository queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn offset(&self) -> i64 {
        ((self.page.max(1) - 1) * self.per_page) as i64
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

/// Page number exactly as the client asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest(i64);

impl PageRequest {
    /// Parses a `?page=` value. Missing or non-integer input means page 1.
    pub fn parse(raw: Option<&str>) -> Self {
        Self(raw.and_then(|p| p.trim().parse::<i64>().ok()).unwrap_or(1))
    }

    pub fn first() -> Self {
        Self(1)
    }

    /// Clamp to `1..=last_page` for `total` rows split into `per_page` pages.
    pub fn clamp(self, total: usize, per_page: usize) -> usize {
        let last = total_pages(total, per_page).max(1);
        if self.0 < 1 {
            1
        } else {
            usize::try_from(self.0).map_or(last, |page| page.min(last))
        }
    }
}

impl From<usize> for PageRequest {
    fn from(value: usize) -> Self {
        Self(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

/// Number of pages needed for `total` rows, `ceil(total / per_page)`.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// One page of items plus the numbers templates need to render navigation.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub pages: usize,
    pub per_page: usize,
    pub total: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, total: usize, per_page: usize) -> Self {
        let pages = total_pages(total, per_page);
        Self {
            items,
            page,
            pages,
            per_page,
            total,
            has_previous: page > 1,
            has_next: page < pages,
        }
    }

    pub fn empty(per_page: usize) -> Self {
        Self::new(Vec::new(), 1, 0, per_page)
    }

    /// Slice an in-memory list into the clamped requested page.
    pub fn from_vec(all: Vec<T>, request: PageRequest, per_page: usize) -> Self {
        let total = all.len();
        let page = request.clamp(total, per_page);
        let pagination = Pagination { page, per_page };
        let items = all
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(per_page)
            .collect();
        Self::new(items, page, total, per_page)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            pages: self.pages,
            per_page: self.per_page,
            total: self.total,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_missing_and_garbage_as_first_page() {
        assert_eq!(PageRequest::parse(None), PageRequest::first());
        assert_eq!(PageRequest::parse(Some("abc")), PageRequest::first());
        assert_eq!(PageRequest::parse(Some(" 3 ")), PageRequest::from(3));
    }

    #[test]
    fn clamps_out_of_range_pages() {
        // 13 rows at 6 per page -> 3 pages.
        assert_eq!(PageRequest::parse(Some("0")).clamp(13, 6), 1);
        assert_eq!(PageRequest::parse(Some("-4")).clamp(13, 6), 1);
        assert_eq!(PageRequest::parse(Some("2")).clamp(13, 6), 2);
        assert_eq!(PageRequest::parse(Some("99")).clamp(13, 6), 3);
    }

    #[test]
    fn empty_listing_has_a_first_page() {
        assert_eq!(PageRequest::parse(Some("5")).clamp(0, 6), 1);
        assert_eq!(total_pages(0, 6), 0);

        let empty = Paginated::<i32>::empty(6);
        assert_eq!((empty.page, empty.pages), (1, 0));
        assert!(!empty.has_previous);
        assert!(!empty.has_next);
    }

    #[test]
    fn slices_in_memory_lists() {
        let page = Paginated::from_vec((1..=12).collect::<Vec<_>>(), PageRequest::from(3), 5);
        assert_eq!(page.items, vec![11, 12]);
        assert_eq!(page.page, 3);
        assert_eq!(page.pages, 3);
        assert!(page.has_previous);
        assert!(!page.has_next);
    }
}
