//! Utility functions for string formatting and list paging.

pub mod format;
pub mod paging;

// Re-export commonly used functions at module level
pub use format::{contains_ignore_case, format_date, format_views, truncate};
pub use paging::{page_count, paginate, DEFAULT_PAGE_SIZE};
