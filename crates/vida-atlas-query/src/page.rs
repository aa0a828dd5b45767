// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 15;

/// Computed pagination window. Out-of-range requests clamp instead of
/// erroring: page 0 or negative input becomes 1, a page past the end
/// becomes the last page, and zero matches still yield one (empty) page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page: u64,
    pub total_pages: u64,
    pub page_size: u64,
    pub total_items: u64,
}

impl PageWindow {
    #[must_use]
    pub fn compute(requested_page: u64, page_size: u64, total_items: u64) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size).max(1);
        let current_page = requested_page.clamp(1, total_pages);
        Self {
            current_page,
            total_pages,
            page_size,
            total_items,
        }
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.current_page - 1) * self.page_size
    }
}
