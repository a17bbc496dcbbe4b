use super::approval::{ApprovalRecord, ApprovalRole};
use super::financials::FinancialSummary;
use super::revision::{Revision, RevisionStatus};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A record that goes through RSH/NSH approval (proposal, on-call).
///
/// The approval screens are written once against this trait; each record
/// type only supplies its API prefix and how its line items look.
pub trait ApprovalDocument: DeserializeOwned + Clone + Send + Sync + 'static {
    type Changes: Clone + Default + Send + Sync + 'static;

    /// e.g. `/phone/proposal`
    const API_PREFIX: &'static str;
    /// Singular label for headings ("Proposal").
    const KIND_LABEL: &'static str;
    /// Tab key prefix, e.g. `a001_proposal`.
    const TAB_KEY: &'static str;
    const EXPORT_PATH: &'static str;
    const EXPORT_FILE_NAME: &'static str;

    fn id(&self) -> &str;
    fn number(&self) -> &str;
    fn customer_name(&self) -> String;
    fn status(&self) -> &RevisionStatus;
    fn current_revision_number(&self) -> u32;
    fn revisions(&self) -> &[Revision<Self::Changes>];
    fn line_items(&self) -> Vec<LineItemView>;
    fn financials(&self) -> &FinancialSummary;
    fn remark(&self) -> Option<&str>;
    fn co_number(&self) -> Option<&str>;
    fn cnote_number(&self) -> Option<&str>;
    fn created_at(&self) -> Option<&str>;

    /// A new record with revision `number` applied on top of this one.
    fn with_revision(&self, number: u32) -> Self;

    fn current_revision(&self) -> Option<&Revision<Self::Changes>> {
        let current = self.current_revision_number();
        self.revisions()
            .iter()
            .find(|r| r.revision_number == current)
    }

    fn is_closed(&self) -> bool {
        self.co_number().is_some_and(|s| !s.trim().is_empty())
    }

    fn search_path() -> String {
        format!("{}/search", Self::API_PREFIX)
    }

    fn approve_path(id: &str, role: ApprovalRole) -> String {
        format!("{}/{}/approve-{}", Self::API_PREFIX, id, role.path_segment())
    }

    fn reject_path(id: &str) -> String {
        format!("{}/{}/reject-revision", Self::API_PREFIX, id)
    }

    fn close_path(id: &str) -> String {
        format!("{}/{}/update-conumber", Self::API_PREFIX, id)
    }
}

/// A line item flattened for the approval table.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemView {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub subtotal: f64,
    pub rsh: ApprovalRecord,
    pub nsh: ApprovalRecord,
}

impl LineItemView {
    pub fn approval(&self, role: ApprovalRole) -> &ApprovalRecord {
        match role {
            ApprovalRole::Rsh => &self.rsh,
            ApprovalRole::Nsh => &self.nsh,
        }
    }
}

/// Query string of `/phone/*/search`. Empty filters are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSearchQuery {
    pub page: usize,
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
}

impl DocumentSearchQuery {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page,
            limit,
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: &str) -> Self {
        let s = search.trim();
        self.search = (!s.is_empty()).then(|| s.to_string());
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        let s = status.trim();
        self.status = (!s.is_empty()).then(|| s.to_string());
        self
    }

    pub fn with_dates(mut self, from: &str, to: &str) -> Self {
        self.from_date = (!from.trim().is_empty()).then(|| from.trim().to_string());
        self.to_date = (!to.trim().is_empty()).then(|| to.trim().to_string());
        self
    }
}
