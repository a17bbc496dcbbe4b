//! Spreadsheet export: fetch the server-generated file and hand it to the
//! browser through a temporary anchor.

use contracts::ApiError;
use serde::Serialize;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::shared::http;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Download `path` (with the list's current filters) and save it under the
/// name from `Content-Disposition`, or `default_name`.
pub async fn export_file<Q: Serialize>(
    path: &str,
    query: &Q,
    default_name: &str,
) -> Result<(), ApiError> {
    let (bytes, disposition) = http::get_bytes(path, query).await?;
    if bytes.is_empty() {
        return Err(ApiError::Parse("Export returned an empty file".to_string()));
    }
    let file_name = disposition
        .as_deref()
        .and_then(file_name_from_disposition)
        .unwrap_or_else(|| default_name.to_string());
    log::info!("Export {} -> {} ({} bytes)", path, file_name, bytes.len());
    download_bytes(&bytes, &file_name, XLSX_MIME).map_err(ApiError::Network)
}

/// Extract the file name, preferring RFC 5987 `filename*=UTF-8''...`.
pub fn file_name_from_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    for part in header.split(';').map(str::trim) {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let encoded = value.trim().trim_matches('"');
                let encoded = encoded
                    .split_once("''")
                    .map(|(_, rest)| rest)
                    .unwrap_or(encoded);
                if let Ok(decoded) = urlencoding::decode(encoded) {
                    if !decoded.trim().is_empty() {
                        return Some(decoded.into_owned());
                    }
                }
            }
            "filename" => {
                let name = value.trim().trim_matches('"').trim();
                if !name.is_empty() {
                    plain = Some(name.to_string());
                }
            }
            _ => {}
        }
    }
    plain
}

fn create_blob(bytes: &[u8], mime: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&js_sys::Uint8Array::from(bytes));

    let properties = BlobPropertyBag::new();
    properties.set_type(mime);

    Blob::new_with_u8_array_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

/// Trigger a browser download of `bytes`.
pub fn download_bytes(bytes: &[u8], filename: &str, mime: &str) -> Result<(), String> {
    let blob = create_blob(bytes, mime)?;
    download_blob(&blob, filename)
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_file_name() {
        assert_eq!(
            file_name_from_disposition(r#"attachment; filename="proposals.xlsx""#).as_deref(),
            Some("proposals.xlsx")
        );
        assert_eq!(
            file_name_from_disposition("attachment; filename=oncalls.xlsx").as_deref(),
            Some("oncalls.xlsx")
        );
    }

    #[test]
    fn test_encoded_file_name_wins() {
        let header = r#"attachment; filename="fallback.xlsx"; filename*=UTF-8''Equipment%20List.xlsx"#;
        assert_eq!(
            file_name_from_disposition(header).as_deref(),
            Some("Equipment List.xlsx")
        );
    }

    #[test]
    fn test_missing_file_name() {
        assert_eq!(file_name_from_disposition("attachment"), None);
        assert_eq!(file_name_from_disposition(r#"inline; filename="""#), None);
    }
}
