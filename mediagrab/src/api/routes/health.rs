//! Health check route.

use axum::{Json, extract::State};

use crate::api::models::HealthResponse;
use crate::api::server::AppState;

/// `GET /health`: liveness plus availability of the external binaries.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        ytdlp_available: state.ytdlp.probe_ytdlp().await,
        ffmpeg_available: state.ytdlp.probe_ffmpeg().await,
    })
}
