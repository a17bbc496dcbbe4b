use super::status::{AuditStamps, EntityStatus};
use crate::usecases::u501_bulk_upload::BulkEntity;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Flat master data record (product, customer, equipment) rendered by the
/// generic master data list.
pub trait MasterRecord: DeserializeOwned + Clone + Send + Sync + 'static {
    /// e.g. `/collections/product`
    const COLLECTION_PATH: &'static str;
    const EXPORT_PATH: &'static str;
    const EXPORT_FILE_NAME: &'static str;
    const TITLE: &'static str;
    const BULK_ENTITY: BulkEntity;

    fn id(&self) -> &str;
    fn status(&self) -> &EntityStatus;
    fn audit(&self) -> &AuditStamps;

    /// Column titles, excluding status and audit columns.
    fn headers() -> Vec<&'static str>;

    /// Cell values in the order of [`MasterRecord::headers`].
    fn cells(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MasterDataQuery {
    pub page: usize,
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl MasterDataQuery {
    pub fn new(page: usize, limit: usize, search: &str, status: &str) -> Self {
        let search = search.trim();
        let status = status.trim();
        Self {
            page,
            limit,
            search: (!search.is_empty()).then(|| search.to_string()),
            status: (!status.is_empty()).then(|| status.to_string()),
        }
    }
}
