//! Download routes: single file and zip bundle.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};

use crate::api::error::{ApiError, ApiResult};
use crate::api::models::{BatchDownloadRequest, SingleDownloadRequest};
use crate::api::server::AppState;
use crate::download;
use crate::error::Result;
use crate::packaging::{self, Payload};
use crate::ytdlp::MediaFormat;

/// `POST /download_single`: download exactly one URL, non-bundled.
pub async fn download_single(
    State(state): State<AppState>,
    Json(request): Json<SingleDownloadRequest>,
) -> ApiResult<Response> {
    if request.url.trim().is_empty() {
        return Err(ApiError::bad_request("No URL provided"));
    }

    let urls = [request.url];
    let payload = execute(&state, &urls, request.format, false).await?;
    Ok(file_response(payload))
}

/// `POST /download_all`: download every URL, bundled into a zip.
pub async fn download_all(
    State(state): State<AppState>,
    Json(request): Json<BatchDownloadRequest>,
) -> ApiResult<Response> {
    if request.urls.is_empty() {
        return Err(ApiError::bad_request("No URLs provided"));
    }

    let payload = execute(&state, &request.urls, request.format, true).await?;
    Ok(file_response(payload))
}

/// Run the orchestrator and packager for one request.
///
/// The payload is fully buffered before the batch is dropped, so the
/// workspace is removed before the response leaves the handler.
async fn execute(
    state: &AppState,
    urls: &[String],
    format: MediaFormat,
    bundle: bool,
) -> Result<Payload> {
    let batch = download::run(state.ytdlp.as_ref(), urls, format).await?;
    packaging::package(&batch, format, bundle)
}

fn file_response(payload: Payload) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(payload.content_type),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        content_disposition(&payload.filename),
    );
    (headers, payload.bytes).into_response()
}

/// Build an attachment Content-Disposition header.
///
/// Titles are arbitrary Unicode, so the real name goes into the RFC 5987
/// `filename*` parameter; the plain `filename` falls back to ASCII.
fn content_disposition(filename: &str) -> HeaderValue {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let value = format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback.replace('"', "'"),
        urlencoding::encode(filename)
    );
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_filename_is_kept() {
        let value = content_disposition("song.mp3");
        let text = value.to_str().unwrap();
        assert!(text.starts_with("attachment; filename=\"song.mp3\""));
        assert!(text.contains("filename*=UTF-8''song.mp3"));
    }

    #[test]
    fn unicode_filename_gets_ascii_fallback() {
        let value = content_disposition("Füße Lied.mp3");
        let text = value.to_str().unwrap();
        assert!(text.contains("filename=\"F__e Lied.mp3\""));
        assert!(text.contains("filename*=UTF-8''F%C3%BC%C3%9Fe%20Lied.mp3"));
    }

    #[test]
    fn quotes_are_stripped_from_fallback() {
        let value = content_disposition("a\"b.mp4");
        let text = value.to_str().unwrap();
        assert!(text.contains("filename=\"a'b.mp4\""));
    }
}
