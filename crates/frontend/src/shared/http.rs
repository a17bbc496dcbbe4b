//! JSON and binary requests against the REST API.
//!
//! Every helper attaches the bearer token from localStorage and maps
//! failures onto [`ApiError`]. A 401 clears the session so the login page
//! takes over.

use contracts::ApiError;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::shared::api_utils::{api_url, api_url_with_query};
use crate::system::auth::{context::expire_session, storage};

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

/// Bearer header value for requests built outside gloo-net.
pub fn bearer_header() -> Option<String> {
    storage::get_token().map(|token| format!("Bearer {}", token))
}

/// Encode a query struct; `None` fields are skipped by the DTOs themselves.
pub fn encode_query<Q: Serialize>(query: &Q) -> Result<String, ApiError> {
    serde_qs::to_string(query).map_err(|e| ApiError::Parse(format!("query: {}", e)))
}

fn network(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

/// Turn a non-success response into an error, expiring the session on 401.
pub async fn check_response(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let err = ApiError::from_response(status, &body);
    if err.is_unauthorized() {
        expire_session();
    } else {
        log::warn!("{} {}: {}", status, response.url(), err);
    }
    Err(err)
}

/// Decode a JSON body. An empty body reads as `null`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))?;
    let text = if text.trim().is_empty() { "null" } else { &text };
    serde_json::from_str(text).map_err(|e| {
        log::error!("Failed to decode {}: {}", response.url(), e);
        ApiError::Parse(e.to_string())
    })
}

pub async fn get_json<T, Q>(path: &str, query: &Q) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    Q: Serialize,
{
    let url = api_url_with_query(path, &encode_query(query)?);
    log::debug!("GET {}", url);
    let response = authorized(Request::get(&url))
        .send()
        .await
        .map_err(network)?;
    read_json(check_response(response).await?).await
}

/// PUT a JSON body. The response body is returned as loose JSON since
/// callers re-fetch the list afterwards.
pub async fn put_json<B: Serialize>(path: &str, body: &B) -> Result<Value, ApiError> {
    log::debug!("PUT {}", path);
    let response = authorized(Request::put(&api_url(path)))
        .json(body)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    read_json(check_response(response).await?).await
}

/// POST without a bearer token. A 401 here means bad credentials, not an
/// expired session.
pub async fn post_json_anonymous<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    log::debug!("POST {}", path);
    let response = Request::post(&api_url(path))
        .json(body)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(match ApiError::from_response(status, &body) {
            ApiError::Unauthorized => ApiError::Http {
                status,
                message: "Invalid email or password".to_string(),
            },
            other => other,
        });
    }
    read_json(response).await
}

/// Binary body plus the `Content-Disposition` header, for spreadsheet exports.
pub async fn get_bytes<Q: Serialize>(
    path: &str,
    query: &Q,
) -> Result<(Vec<u8>, Option<String>), ApiError> {
    let url = api_url_with_query(path, &encode_query(query)?);
    log::debug!("GET {} (binary)", url);
    let response = authorized(Request::get(&url))
        .send()
        .await
        .map_err(network)?;
    let response = check_response(response).await?;
    let disposition = response.headers().get("content-disposition");
    let bytes = response
        .binary()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))?;
    Ok((bytes, disposition))
}
