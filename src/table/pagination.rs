//! Page size and page index bookkeeping

use crate::constants::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use crate::error::TableError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationState {
    page_size: usize,
    page_index: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        PaginationState {
            page_size: DEFAULT_PAGE_SIZE,
            page_index: 0,
        }
    }
}

impl PaginationState {
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Pages needed for `total` rows, never less than one
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    pub fn page_index(&self, total: usize) -> usize {
        self.page_index.min(self.page_count(total) - 1)
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), TableError> {
        validate_page_size(page_size)?;
        self.page_size = page_size;
        self.page_index = 0;
        Ok(())
    }

    pub fn set_page_index(&mut self, page_index: usize, total: usize) {
        self.page_index = page_index.min(self.page_count(total) - 1);
    }

    pub fn reset(&mut self) {
        self.page_index = 0;
    }

    /// Row range of the current page within `total` rows
    pub fn range(&self, total: usize) -> std::ops::Range<usize> {
        let start = (self.page_index(total) * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }
}

pub fn validate_page_size(page_size: usize) -> Result<(), TableError> {
    if PAGE_SIZE_OPTIONS.contains(&page_size) {
        Ok(())
    } else {
        Err(TableError::InvalidPageSize(page_size))
    }
}

/// Next entry of the page size selector, wrapping around
pub fn next_page_size(current: usize) -> usize {
    PAGE_SIZE_OPTIONS
        .iter()
        .position(|size| *size == current)
        .map(|i| PAGE_SIZE_OPTIONS[(i + 1) % PAGE_SIZE_OPTIONS.len()])
        .unwrap_or(DEFAULT_PAGE_SIZE)
}
