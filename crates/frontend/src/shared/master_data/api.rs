use contracts::domain::common::{MasterDataQuery, MasterRecord};
use contracts::{ApiError, SearchResponse};

use super::state::MasterExportQuery;
use crate::shared::{export, http};

pub async fn fetch_page<R: MasterRecord>(
    query: &MasterDataQuery,
) -> Result<SearchResponse<R>, ApiError> {
    http::get_json(R::COLLECTION_PATH, query).await
}

pub async fn export<R: MasterRecord>(query: &MasterExportQuery) -> Result<(), ApiError> {
    export::export_file(R::EXPORT_PATH, query, R::EXPORT_FILE_NAME).await
}
