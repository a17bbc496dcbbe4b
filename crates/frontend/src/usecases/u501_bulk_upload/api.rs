use contracts::usecases::u501_bulk_upload::{
    BulkEntity, BulkUploadEvent, NdjsonDecoder, RetryPolicy, UPLOAD_FIELD_NAME, UPLOAD_TIMEOUT_MS,
};
use contracts::ApiError;
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use js_sys::{Reflect, Uint8Array};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    window, AbortController, FormData, Headers, ReadableStreamDefaultReader, RequestInit,
    RequestMode, Response,
};

use crate::shared::api_utils::api_url;
use crate::shared::http::bearer_header;
use crate::system::auth::context::expire_session;

fn js_error(context: &str, e: JsValue) -> ApiError {
    ApiError::Network(format!("{}: {:?}", context, e))
}

/// POST `file` to the entity's bulk endpoint and feed every progress event
/// of the NDJSON response to `on_event` as it arrives.
///
/// The request is aborted after [`UPLOAD_TIMEOUT_MS`].
pub async fn upload(
    entity: BulkEntity,
    file: &web_sys::File,
    mut on_event: impl FnMut(BulkUploadEvent),
) -> Result<(), ApiError> {
    let window = window().ok_or_else(|| ApiError::Network("No window object".to_string()))?;

    let form = FormData::new().map_err(|e| js_error("Failed to create form", e))?;
    form.append_with_blob_and_filename(UPLOAD_FIELD_NAME, file, &file.name())
        .map_err(|e| js_error("Failed to attach file", e))?;

    let headers = Headers::new().map_err(|e| js_error("Failed to create headers", e))?;
    if let Some(auth) = bearer_header() {
        headers
            .set("Authorization", &auth)
            .map_err(|e| js_error("Failed to set header", e))?;
    }

    let controller = AbortController::new().map_err(|e| js_error("AbortController", e))?;
    let timed_out = Rc::new(Cell::new(false));
    let timeout = {
        let controller = controller.clone();
        let timed_out = Rc::clone(&timed_out);
        Timeout::new(UPLOAD_TIMEOUT_MS, move || {
            timed_out.set(true);
            controller.abort();
        })
    };

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);
    opts.set_headers(&headers);
    opts.set_signal(Some(&controller.signal()));

    let url = api_url(&entity.upload_path());
    log::info!("Bulk upload {} ({} bytes) -> {}", file.name(), file.size(), url);
    let request = web_sys::Request::new_with_str_and_init(&url, &opts)
        .map_err(|e| js_error("Failed to create request", e))?;

    let result = stream_events(&window, &request, &timed_out, &mut on_event).await;
    // dropping the timer cancels it
    drop(timeout);

    match result {
        Err(_) if timed_out.get() => Err(ApiError::Network(format!(
            "Upload timed out after {} minutes",
            UPLOAD_TIMEOUT_MS / 60_000
        ))),
        other => other,
    }
}

async fn response_text(response: &Response) -> String {
    match response.text() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

async fn stream_events(
    window: &web_sys::Window,
    request: &web_sys::Request,
    timed_out: &Cell<bool>,
    on_event: &mut impl FnMut(BulkUploadEvent),
) -> Result<(), ApiError> {
    let response_value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(|e| js_error("Upload failed", e))?;
    let response: Response = response_value
        .dyn_into()
        .map_err(|_| ApiError::Parse("Not a Response".to_string()))?;

    if !response.ok() {
        let status = response.status();
        let err = ApiError::from_response(status, &response_text(&response).await);
        if err.is_unauthorized() {
            expire_session();
        }
        return Err(err);
    }

    let body = response
        .body()
        .ok_or_else(|| ApiError::Parse("Upload response has no body".to_string()))?;
    let reader: ReadableStreamDefaultReader = body
        .get_reader()
        .dyn_into()
        .map_err(|_| ApiError::Parse("Unsupported response stream".to_string()))?;

    let mut decoder = NdjsonDecoder::<BulkUploadEvent>::new();
    let policy = RetryPolicy::default();
    let mut failed_reads = 0;

    loop {
        let chunk = match JsFuture::from(reader.read()).await {
            Ok(chunk) => {
                failed_reads = 0;
                chunk
            }
            Err(e) => {
                failed_reads += 1;
                match policy.retry_read(failed_reads, timed_out.get()) {
                    Some(delay) => {
                        log::warn!("Stream read failed ({:?}), retrying in {} ms", e, delay);
                        TimeoutFuture::new(delay).await;
                        continue;
                    }
                    None => return Err(js_error("Progress stream failed", e)),
                }
            }
        };

        let done = Reflect::get(&chunk, &JsValue::from_str("done"))
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        if done {
            break;
        }

        let value = Reflect::get(&chunk, &JsValue::from_str("value"))
            .map_err(|e| js_error("Malformed stream chunk", e))?;
        let bytes = Uint8Array::new(&value).to_vec();
        for decoded in decoder.push(&bytes) {
            dispatch(decoded, on_event);
        }
    }

    if let Some(decoded) = decoder.finish() {
        dispatch(decoded, on_event);
    }
    Ok(())
}

fn dispatch<E: std::fmt::Display>(
    decoded: Result<BulkUploadEvent, E>,
    on_event: &mut impl FnMut(BulkUploadEvent),
) {
    match decoded {
        Ok(event) => on_event(event),
        Err(e) => log::warn!("Skipping progress line: {}", e),
    }
}
