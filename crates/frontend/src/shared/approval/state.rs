use contracts::domain::common::{ApprovalDocument, DocumentSearchQuery};
use contracts::shared::pagination::DEFAULT_PAGE_SIZE;
use contracts::{PageRequest, SearchResponse};
use leptos::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug)]
pub struct ApprovalListState<D> {
    pub items: Vec<D>,
    pub search_query: String,
    /// Lowercase status value, empty for all.
    pub status: String,
    /// `YYYY-MM-DD` from the date inputs.
    pub from_date: String,
    pub to_date: String,
    pub is_loaded: bool,
    /// 0-indexed
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

impl<D> Default for ApprovalListState<D> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            status: String::new(),
            from_date: String::new(),
            to_date: String::new(),
            is_loaded: false,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total_count: 0,
            total_pages: 0,
        }
    }
}

impl<D: ApprovalDocument> ApprovalListState<D> {
    pub fn query(&self) -> DocumentSearchQuery {
        let page = PageRequest::from_zero_based(self.page, self.page_size);
        DocumentSearchQuery::new(page.page, page.limit)
            .with_search(&self.search_query)
            .with_status(&self.status)
            .with_dates(&self.from_date, &self.to_date)
    }

    pub fn apply_response(&mut self, response: SearchResponse<D>) {
        self.total_pages = response.page_count(self.page_size);
        self.total_count = response.pagination.total_records.max(response.data.len());
        self.items = response.data;
        self.is_loaded = true;
    }

    pub fn active_filters_count(&self) -> usize {
        [
            &self.search_query,
            &self.status,
            &self.from_date,
            &self.to_date,
        ]
        .iter()
        .filter(|v| !v.trim().is_empty())
        .count()
    }

    pub fn find(&self, id: &str) -> Option<D> {
        self.items.iter().find(|d| d.id() == id).cloned()
    }
}

pub fn create_state<D: ApprovalDocument>() -> RwSignal<ApprovalListState<D>> {
    RwSignal::new(ApprovalListState::default())
}

/// The list filters without paging, sent with `/excel/*/export-*`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
}

impl From<DocumentSearchQuery> for ExportQuery {
    fn from(q: DocumentSearchQuery) -> Self {
        Self {
            search: q.search,
            status: q.status,
            from_date: q.from_date,
            to_date: q.to_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_proposal::Proposal;

    #[test]
    fn test_query_is_one_based_and_skips_empty_filters() {
        let state = ApprovalListState::<Proposal> {
            page: 2,
            page_size: 25,
            status: "pending".to_string(),
            search_query: "  ".to_string(),
            ..Default::default()
        };
        let q = state.query();
        assert_eq!(q.page, 3);
        assert_eq!(q.limit, 25);
        assert_eq!(
            serde_qs::to_string(&q).unwrap(),
            "page=3&limit=25&status=pending"
        );
        assert_eq!(state.active_filters_count(), 1);
    }

    #[test]
    fn test_apply_response() {
        let json = r#"{
            "proposals": [{"_id": "p1", "proposalNumber": "PR-1"}],
            "pagination": {"currentPage": 1, "totalRecords": 31}
        }"#;
        let response: SearchResponse<Proposal> = serde_json::from_str(json).unwrap();
        let mut state = ApprovalListState::<Proposal>::default();
        state.apply_response(response);
        assert!(state.is_loaded);
        assert_eq!(state.total_count, 31);
        assert_eq!(state.total_pages, 4);
        assert!(state.find("p1").is_some());
        assert!(state.find("p2").is_none());
    }

    #[test]
    fn test_export_query_drops_paging() {
        let q = DocumentSearchQuery::new(4, 50).with_dates("2024-01-01", "");
        let export = ExportQuery::from(q);
        assert_eq!(serde_qs::to_string(&export).unwrap(), "fromDate=2024-01-01");
    }
}
