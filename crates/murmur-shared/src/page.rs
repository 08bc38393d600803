//! Pagination - fixed-size slicing of ordered listings.

use serde::{Deserialize, Serialize};

/// Fixed page size for all post listings.
pub const POSTS_PER_PAGE: usize = 10;

/// One page of an ordered listing, with enough metadata to render
/// next/previous controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served.
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Slice `items` into the requested page.
    ///
    /// `raw_page` is the untrusted `?page=` query value: missing, non-numeric
    /// or zero values resolve to page 1, values past the end clamp to the
    /// last page. Out-of-range requests never error, they degrade to the
    /// nearest valid page. An empty listing yields a single empty page.
    pub fn paginate(items: Vec<T>, raw_page: Option<&str>, per_page: usize) -> Self {
        let total_items = items.len();
        let total_pages = total_items.div_ceil(per_page).max(1);

        let requested = raw_page
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(1);
        let number = requested.clamp(1, total_pages);

        let items: Vec<T> = items
            .into_iter()
            .skip((number - 1) * per_page)
            .take(per_page)
            .collect();

        Self {
            items,
            number,
            total_pages,
            total_items,
            has_next: number < total_pages,
            has_previous: number > 1,
        }
    }
}
