use contracts::domain::common::{ApprovalDocument, DocumentSearchQuery};
use contracts::{ApiError, SearchResponse};

use super::mutation::{Mutation, Payload};
use super::state::ExportQuery;
use crate::shared::{export, http};

pub async fn search<D: ApprovalDocument>(
    query: &DocumentSearchQuery,
) -> Result<SearchResponse<D>, ApiError> {
    http::get_json(&D::search_path(), query).await
}

/// PUT a planned approve, reject or close. The response body is ignored;
/// callers re-fetch the list instead.
pub async fn send(mutation: &Mutation) -> Result<(), ApiError> {
    let result = match &mutation.payload {
        Payload::Approve(body) => http::put_json(&mutation.path, body).await,
        Payload::Reject(body) => http::put_json(&mutation.path, body).await,
        Payload::Close(body) => http::put_json(&mutation.path, body).await,
    };
    result.map(|_| ())
}

pub async fn export<D: ApprovalDocument>(query: &ExportQuery) -> Result<(), ApiError> {
    export::export_file(D::EXPORT_PATH, query, D::EXPORT_FILE_NAME).await
}
