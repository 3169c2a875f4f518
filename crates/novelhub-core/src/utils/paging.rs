/// Stories shown per page in the home feed.
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Slice one page out of a full result set.
///
/// Pagination is purely a presentation concern: the store always returns
/// the complete filtered list and the caller slices it by page number.
/// Pages are 1-based; a page past the end is empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return &[];
    }
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed to show `total` items.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
