//! `yt-dlp` subprocess adapter.
//!
//! All extraction, format negotiation, and transcoding is delegated to the
//! external `yt-dlp` binary (which in turn drives ffmpeg for post-processing).
//! This module owns command construction, output parsing, and availability
//! probing; it holds no state beyond the configured binary locations.

mod parse;

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::{Error, Result};

/// Requested output format for a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaFormat {
    Mp3,
    Mp4,
}

impl MediaFormat {
    /// File extension of the final output, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Mp4 => "mp4",
        }
    }

    /// Content type for a single-file HTTP response.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Mp4 => "video/mp4",
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Metadata for a single media URL.
///
/// Built per metadata request, never persisted. Flat extraction may leave
/// `thumbnail`, `duration`, and `uploader` empty.
#[derive(Debug, Clone, Serialize)]
pub struct VideoMetadata {
    pub url: String,
    pub title: String,
    pub thumbnail: String,
    pub duration: String,
    pub uploader: String,
}

/// Client for the `yt-dlp` binary.
#[derive(Debug, Clone)]
pub struct YtdlpClient {
    ytdlp_path: PathBuf,
    ffmpeg_location: Option<PathBuf>,
}

impl YtdlpClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            ytdlp_path: config.ytdlp_path.clone(),
            ffmpeg_location: config.ffmpeg_location.clone(),
        }
    }

    fn base_command(&self) -> tokio::process::Command {
        let mut cmd = process_utils::tokio_command(&self.ytdlp_path);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Fetch metadata for a batch of URLs.
    ///
    /// Blank URLs are skipped; URLs that fail extraction are logged and
    /// omitted from the result. The caller receives only the successes.
    pub async fn fetch_metadata(&self, urls: &[String]) -> Vec<VideoMetadata> {
        let mut videos = Vec::new();
        for url in urls {
            let url = url.trim();
            if url.is_empty() {
                continue;
            }
            match self.fetch_one(url).await {
                Ok(metadata) => videos.push(metadata),
                Err(error) => warn!(%url, %error, "Metadata extraction failed"),
            }
        }
        videos
    }

    async fn fetch_one(&self, url: &str) -> Result<VideoMetadata> {
        let mut cmd = self.base_command();
        cmd.args(metadata_args()).arg(url);

        debug!(%url, "Fetching metadata via yt-dlp");
        let output = cmd
            .output()
            .await
            .map_err(|e| Error::extractor(format!("Failed to run yt-dlp: {e}")))?;

        if !output.status.success() {
            return Err(Error::Extractor(parse::stderr_tail(&output.stderr)));
        }

        parse::metadata_from_json(url, &String::from_utf8_lossy(&output.stdout))
    }

    /// Download one URL into `dest_dir` and return the produced file path.
    ///
    /// The output is named after the media title with the extension forced to
    /// the requested format. `claimed` lists files already produced by earlier
    /// URLs of the same batch, so the directory-scan fallback never returns a
    /// file twice.
    pub async fn download(
        &self,
        url: &str,
        format: MediaFormat,
        dest_dir: &Path,
        claimed: &[PathBuf],
    ) -> Result<PathBuf> {
        let mut cmd = self.base_command();
        cmd.args(self.download_args(format, dest_dir)).arg(url);

        debug!(%url, %format, dest = %dest_dir.display(), "Downloading via yt-dlp");
        let output = cmd
            .output()
            .await
            .map_err(|e| Error::extractor(format!("Failed to run yt-dlp: {e}")))?;

        if !output.status.success() {
            return Err(Error::Extractor(parse::stderr_tail(&output.stderr)));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if let Some(reported) = parse::destination(&stdout) {
            let final_path = reported.with_extension(format.extension());
            if final_path.exists() {
                return Ok(final_path);
            }
        }

        // yt-dlp did not report a usable destination; fall back to scanning
        // the workspace for a fresh file with the expected extension.
        scan_for_output(dest_dir, format, claimed)?
            .ok_or_else(|| Error::extractor("Download produced no output file"))
    }

    /// Check that the configured `yt-dlp` binary is runnable.
    pub async fn probe_ytdlp(&self) -> bool {
        process_utils::probe_version(&self.ytdlp_path, "--version")
            .await
            .is_some()
    }

    /// Check that ffmpeg is runnable, honoring the configured location.
    pub async fn probe_ffmpeg(&self) -> bool {
        let program = match &self.ffmpeg_location {
            Some(location) if location.is_dir() => location.join("ffmpeg"),
            Some(location) => location.clone(),
            None => PathBuf::from("ffmpeg"),
        };
        process_utils::probe_version(&program, "-version")
            .await
            .is_some()
    }

    fn download_args(&self, format: MediaFormat, dest_dir: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-o".into(),
            dest_dir.join("%(title)s.%(ext)s").into(),
            "--no-playlist".into(),
            "--no-warnings".into(),
            "--newline".into(),
        ];

        match format {
            MediaFormat::Mp4 => args.extend(
                ["-f", "bestvideo+bestaudio/best", "--merge-output-format", "mp4"]
                    .into_iter()
                    .map(OsString::from),
            ),
            MediaFormat::Mp3 => args.extend(
                [
                    "-f",
                    "bestaudio/best",
                    "-x",
                    "--audio-format",
                    "mp3",
                    "--audio-quality",
                    "192K",
                ]
                .into_iter()
                .map(OsString::from),
            ),
        }

        if let Some(location) = &self.ffmpeg_location {
            args.push("--ffmpeg-location".into());
            args.push(location.as_os_str().to_os_string());
        }

        args
    }
}

fn metadata_args() -> [&'static str; 4] {
    [
        "--dump-single-json",
        "--flat-playlist",
        "--no-warnings",
        "--quiet",
    ]
}

/// Find a file in `dir` with the requested extension that is not already
/// claimed by an earlier download of the same batch.
fn scan_for_output(
    dir: &Path,
    format: MediaFormat,
    claimed: &[PathBuf],
) -> Result<Option<PathBuf>> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(format.extension()));
        if matches && !claimed.contains(&path) {
            return Ok(Some(path));
        }
    }
    Ok(None)
}
