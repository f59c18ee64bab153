//! Pagination envelope used by every list endpoint

use serde::{Deserialize, Serialize};

/// Page request (`?page=&limit=`), 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
}

impl PageQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Offset of the first row of this page
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1) * self.limit as usize
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

/// Page metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit > 0 {
            total.div_ceil(limit as u64) as u32
        } else {
            1
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// `{ data, pagination }` list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, page: u32, limit: u32, total: u64) -> Self {
        Self {
            data,
            pagination: Pagination::new(page, limit, total),
        }
    }
}
