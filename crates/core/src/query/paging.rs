//! Paging constants and caller-side clamping helpers.
//!
//! The engine never clamps a page request itself; an index past the last
//! page simply yields no items. Page controllers clamp with these helpers
//! after a filter change shrinks the result set.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of rows per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Maximum number of rows per listing page.
pub const MAX_PAGE_SIZE: usize = 100;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Number of pages needed for `total` rows; zero when nothing matched.
pub fn total_pages(total: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    total.div_ceil(size)
}

/// Clamp a user-provided page size to `[1, max]`.
pub fn clamp_page_size(size: Option<usize>, default: usize, max: usize) -> usize {
    size.unwrap_or(default).max(1).min(max.max(1))
}

/// Clamp a 1-based page index to `[1, total_pages]`.
///
/// With no pages at all the first page is returned, so the caller always has
/// a valid index to render.
pub fn clamp_page_index(index: usize, total_pages: usize) -> usize {
    index.max(1).min(total_pages.max(1))
}

/// Normalize free-text search input for substring matching.
///
/// Case-folds the input as typed, surrounding spaces included. Returns `None`
/// for blank input, meaning "no search".
pub fn normalize_search(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_lowercase())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
