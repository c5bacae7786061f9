//! Process configuration loaded from the environment.

use std::path::PathBuf;

/// Application configuration.
///
/// Every field can be overridden through a `MEDIAGRAB_*` environment
/// variable; `.env` files are honored by `main` before loading.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server bind address
    pub bind_address: String,
    /// Server port
    pub port: u16,
    /// `yt-dlp` binary (name resolved via PATH, or an absolute path)
    pub ytdlp_path: PathBuf,
    /// Optional ffmpeg directory or binary, forwarded via `--ffmpeg-location`
    pub ffmpeg_location: Option<PathBuf>,
    /// Directory holding the front-end assets
    pub static_dir: PathBuf,
    /// Enable permissive CORS
    pub enable_cors: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            ytdlp_path: PathBuf::from("yt-dlp"),
            ffmpeg_location: None,
            static_dir: PathBuf::from("static"),
            enable_cors: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// Supported env vars:
    /// - `MEDIAGRAB_BIND_ADDRESS` (e.g. "0.0.0.0")
    /// - `MEDIAGRAB_PORT` (e.g. "8080")
    /// - `MEDIAGRAB_YTDLP_PATH` (binary name or absolute path)
    /// - `MEDIAGRAB_FFMPEG_PATH` (directory or binary for `--ffmpeg-location`)
    /// - `MEDIAGRAB_STATIC_DIR`
    /// - `MEDIAGRAB_ENABLE_CORS` ("true"/"false")
    pub fn from_env_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(bind_address) = std::env::var("MEDIAGRAB_BIND_ADDRESS")
            && !bind_address.trim().is_empty()
        {
            config.bind_address = bind_address;
        }

        if let Ok(port) = std::env::var("MEDIAGRAB_PORT")
            && let Ok(parsed) = port.parse::<u16>()
        {
            config.port = parsed;
        }

        if let Ok(ytdlp) = std::env::var("MEDIAGRAB_YTDLP_PATH")
            && !ytdlp.trim().is_empty()
        {
            config.ytdlp_path = PathBuf::from(ytdlp);
        }

        if let Ok(ffmpeg) = std::env::var("MEDIAGRAB_FFMPEG_PATH")
            && !ffmpeg.trim().is_empty()
        {
            config.ffmpeg_location = Some(PathBuf::from(ffmpeg));
        }

        if let Ok(static_dir) = std::env::var("MEDIAGRAB_STATIC_DIR")
            && !static_dir.trim().is_empty()
        {
            config.static_dir = PathBuf::from(static_dir);
        }

        if let Ok(cors) = std::env::var("MEDIAGRAB_ENABLE_CORS")
            && let Ok(parsed) = cors.trim().parse::<bool>()
        {
            config.enable_cors = parsed;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.ytdlp_path, PathBuf::from("yt-dlp"));
        assert!(config.ffmpeg_location.is_none());
        assert!(config.enable_cors);
    }
}
