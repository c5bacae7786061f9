//! Metadata lookup route.

use axum::{Json, extract::State};

use crate::api::error::{ApiError, ApiResult};
use crate::api::models::{InfoRequest, InfoResponse};
use crate::api::server::AppState;

/// `POST /get_info`: fetch metadata for a batch of URLs.
///
/// Individual bad URLs never fail the batch; they are simply absent from the
/// response.
pub async fn get_info(
    State(state): State<AppState>,
    Json(request): Json<InfoRequest>,
) -> ApiResult<Json<InfoResponse>> {
    if request.urls.is_empty() {
        return Err(ApiError::bad_request("No URLs provided"));
    }

    let videos = state.ytdlp.fetch_metadata(&request.urls).await;
    Ok(Json(InfoResponse { videos }))
}
