use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediagrab::api::server::{ApiServer, AppState};
use mediagrab::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mediagrab=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env_or_default();
    tracing::debug!(?config, "Loaded configuration");

    let state = AppState::new(config);

    // Probe the external binaries once at startup. A missing binary is a
    // warning, not a fatal error; downloads will surface the failure.
    if !state.ytdlp.probe_ytdlp().await {
        tracing::warn!(
            path = %state.config.ytdlp_path.display(),
            "yt-dlp not found or not runnable; set MEDIAGRAB_YTDLP_PATH"
        );
    }
    if !state.ytdlp.probe_ffmpeg().await {
        tracing::warn!(
            "ffmpeg not found; mp3 transcoding and mp4 merging will fail. \
             Set MEDIAGRAB_FFMPEG_PATH if it is installed outside PATH"
        );
    }

    let server = ApiServer::new(state);
    let cancel_token = server.cancel_token();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received ctrl-c, shutting down");
            cancel_token.cancel();
        }
    });

    server.run().await?;
    Ok(())
}
