//! Admin operations over [`AdminState`](crate::state::AdminState).
//!
//! - [`catalog`] - add, edit, delete, search, and sort products
//! - [`orders`] - create orders and move them between statuses
//! - [`validation`] - field errors shared by both

pub mod catalog;
pub mod orders;
pub mod validation;

/// Default number of rows per page in listings.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Return the 1-based `page` of `items`, `per_page` rows at a time.
///
/// Out-of-range pages are empty. A `per_page` of zero is treated as one.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let per_page = per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(per_page);
    let end = start.saturating_add(per_page).min(items.len());
    items.get(start..end).unwrap_or(&[])
}

/// Number of pages needed to show `total` rows.
#[must_use]
pub const fn page_count(total: usize, per_page: usize) -> usize {
    let per_page = if per_page == 0 { 1 } else { per_page };
    total.div_ceil(per_page)
}

/// First value at or after `start` for which `taken` is false.
///
/// Time-derived ids collide when two are made in the same millisecond;
/// this bumps forward one millisecond at a time.
pub(crate) fn first_free(start: i64, taken: impl Fn(i64) -> bool) -> i64 {
    let mut candidate = start;
    while taken(candidate) {
        candidate = candidate.saturating_add(1);
    }
    candidate
}
