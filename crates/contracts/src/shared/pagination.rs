use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Page request as the API expects it (`page` is 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build from the 0-indexed page used by `PaginationControls`.
    pub fn from_zero_based(page: usize, limit: usize) -> Self {
        Self {
            page: page + 1,
            limit: limit.max(1),
        }
    }

    pub fn zero_based(&self) -> usize {
        self.page.saturating_sub(1)
    }
}

/// Pagination block returned next to every list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    #[serde(alias = "totalItems", alias = "total")]
    pub total_records: usize,
}

/// List response. The server names the array after the collection, so
/// every known key is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse<T> {
    #[serde(
        default = "Vec::new",
        alias = "proposals",
        alias = "onCalls",
        alias = "oncalls",
        alias = "customers",
        alias = "products",
        alias = "equipment",
        alias = "equipments"
    )]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> Default for SearchResponse<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

impl<T> SearchResponse<T> {
    /// Total pages, computed locally when the server omitted it.
    pub fn page_count(&self, limit: usize) -> usize {
        if self.pagination.total_pages > 0 {
            self.pagination.total_pages
        } else {
            total_pages(self.pagination.total_records, limit)
        }
    }
}

pub fn total_pages(total: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_page_request_conversion() {
        let req = PageRequest::from_zero_based(0, 25);
        assert_eq!(req.page, 1);
        assert_eq!(req.zero_based(), 0);
        assert_eq!(PageRequest::from_zero_based(3, 0).limit, 1);
    }

    #[test]
    fn test_search_response_aliases() {
        let json = r#"{"proposals":[1,2,3],"pagination":{"currentPage":1,"totalPages":0,"totalRecords":23}}"#;
        let resp: SearchResponse<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data, vec![1, 2, 3]);
        assert_eq!(resp.page_count(10), 3);

        let resp: SearchResponse<u32> = serde_json::from_str(r#"{"customers":[]}"#).unwrap();
        assert!(resp.data.is_empty());
        assert_eq!(resp.pagination, Pagination::default());
    }
}
