//! Pagination utilities
//!
//! Page numbers are 1-based on the wire; sea-orm's paginator is 0-based.

use serde::Serialize;

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub limit: u64,
}

impl Pagination {
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        Self { page: page.unwrap_or(1), limit: limit.unwrap_or(DEFAULT_LIMIT) }.normalized()
    }

    /// Clamp to sane values: page 0 becomes 1, limit is kept within 1..=100
    pub fn normalized(self) -> Self {
        let page = if self.page == 0 { 1 } else { self.page };
        let limit = self.limit.clamp(1, MAX_LIMIT);
        Self { page, limit }
    }

    /// 0-based page index for `Paginator::fetch_page`
    pub fn page_index(&self) -> u64 {
        self.page.saturating_sub(1)
    }

    pub fn meta(&self, total: u64) -> PageMeta {
        PageMeta {
            page: self.page,
            limit: self.limit,
            total,
            total_pages: total.div_ceil(self.limit),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, limit: DEFAULT_LIMIT } }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// `{data, pagination}` list response.
#[derive(Serialize, Debug)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let p = Pagination { page: 0, limit: 0 }.normalized();
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 1);
        assert_eq!(p.page_index(), 0);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let p = Pagination::new(Some(5), Some(1000));
        assert_eq!(p.page_index(), 4);
        assert_eq!(p.limit, 100);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::new(None, None);
        assert_eq!(d.page, 1);
        assert_eq!(d.limit, 10);
    }

    #[test]
    fn meta_rounds_total_pages_up() {
        let m = Pagination::new(Some(1), Some(10)).meta(21);
        assert_eq!(m.total_pages, 3);
        assert_eq!(Pagination::default().meta(0).total_pages, 0);
    }
}
