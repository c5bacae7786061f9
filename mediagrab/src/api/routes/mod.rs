//! API route modules.

pub mod download;
pub mod health;
pub mod info;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::api::server::AppState;

/// Create the main router: API routes plus the static front-end.
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/get_info", post(info::get_info))
        .route("/download_single", post(download::download_single))
        .route("/download_all", post(download::download_all))
        .route("/health", get(health::health_check))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}
