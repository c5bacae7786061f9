//! Request and response wire types.

use serde::{Deserialize, Serialize};

use crate::ytdlp::{MediaFormat, VideoMetadata};

/// Body of `POST /get_info`.
#[derive(Debug, Deserialize)]
pub struct InfoRequest {
    #[serde(default)]
    pub urls: Vec<String>,
}

/// Response of `POST /get_info`. Failed URLs are absent from `videos`.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub videos: Vec<VideoMetadata>,
}

/// Body of `POST /download_single`.
#[derive(Debug, Deserialize)]
pub struct SingleDownloadRequest {
    #[serde(default)]
    pub url: String,
    pub format: MediaFormat,
}

/// Body of `POST /download_all`.
#[derive(Debug, Deserialize)]
pub struct BatchDownloadRequest {
    #[serde(default)]
    pub urls: Vec<String>,
    pub format: MediaFormat,
}

/// Response of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub ytdlp_available: bool,
    pub ffmpeg_available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_deserializes_lowercase_only() {
        let request: SingleDownloadRequest =
            serde_json::from_str(r#"{"url": "https://example.com/v", "format": "mp3"}"#).unwrap();
        assert_eq!(request.format, MediaFormat::Mp3);

        let bad = serde_json::from_str::<SingleDownloadRequest>(
            r#"{"url": "https://example.com/v", "format": "flac"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn missing_urls_default_to_empty() {
        let request: InfoRequest = serde_json::from_str("{}").unwrap();
        assert!(request.urls.is_empty());
    }
}
