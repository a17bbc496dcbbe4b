use contracts::domain::common::{MasterDataQuery, MasterRecord};
use contracts::shared::pagination::DEFAULT_PAGE_SIZE;
use contracts::{PageRequest, SearchResponse};
use leptos::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug)]
pub struct MasterListState<R> {
    pub items: Vec<R>,
    pub search_query: String,
    /// "Active", "Inactive" or empty for all.
    pub status: String,
    pub is_loaded: bool,
    /// 0-indexed
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

impl<R> Default for MasterListState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            status: String::new(),
            is_loaded: false,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total_count: 0,
            total_pages: 0,
        }
    }
}

impl<R: MasterRecord> MasterListState<R> {
    pub fn query(&self) -> MasterDataQuery {
        let page = PageRequest::from_zero_based(self.page, self.page_size);
        MasterDataQuery::new(page.page, page.limit, &self.search_query, &self.status)
    }

    pub fn apply_response(&mut self, response: SearchResponse<R>) {
        self.total_pages = response.page_count(self.page_size);
        self.total_count = response.pagination.total_records.max(response.data.len());
        self.items = response.data;
        self.is_loaded = true;
    }
}

pub fn create_state<R: MasterRecord>() -> RwSignal<MasterListState<R>> {
    RwSignal::new(MasterListState::default())
}

/// Filters without paging, sent with the export request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MasterExportQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl From<MasterDataQuery> for MasterExportQuery {
    fn from(q: MasterDataQuery) -> Self {
        Self {
            search: q.search,
            status: q.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_product::Product;

    #[test]
    fn test_query() {
        let state = MasterListState::<Product> {
            page: 1,
            search_query: " pump ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            serde_qs::to_string(&state.query()).unwrap(),
            "page=2&limit=10&search=pump"
        );
        let export = MasterExportQuery::from(state.query());
        assert_eq!(serde_qs::to_string(&export).unwrap(), "search=pump");
    }

    #[test]
    fn test_apply_response_without_total_pages() {
        let json = r#"{"products":[{"_id":"a","partnoid":"P-1"}],"pagination":{"totalRecords":21}}"#;
        let response: SearchResponse<Product> = serde_json::from_str(json).unwrap();
        let mut state = MasterListState::<Product>::default();
        state.apply_response(response);
        assert_eq!(state.total_pages, 3);
        assert_eq!(state.items[0].materialcode, "P-1");
    }
}
