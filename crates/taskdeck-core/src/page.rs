//! Pagination math shared by the cache and the views.

use crate::types::ListQuery;

/// Number of pages needed for `total` items at `limit` per page:
/// `max(1, ceil(total / limit))`. A zero limit counts as a single page
/// rather than dividing by zero.
#[must_use]
pub fn page_count(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(limit)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

impl ListQuery {
    /// Previous page, saturating at page 1.
    #[must_use]
    pub fn prev_page(self) -> Self {
        self.at_page(self.page.saturating_sub(1).max(1))
    }

    /// Next page, clamped to `total_pages`.
    #[must_use]
    pub fn next_page(self, total_pages: u32) -> Self {
        self.at_page((self.page + 1).min(total_pages.max(1)))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
