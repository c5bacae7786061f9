//! Parsing of `yt-dlp` output: metadata JSON and progress lines.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::ytdlp::VideoMetadata;

/// Fields read from `--dump-single-json` output. Everything else is ignored.
#[derive(Debug, Deserialize)]
struct RawInfo {
    title: Option<String>,
    thumbnail: Option<String>,
    duration_string: Option<String>,
    uploader: Option<String>,
}

pub(crate) fn metadata_from_json(url: &str, json: &str) -> Result<VideoMetadata> {
    let raw: RawInfo = serde_json::from_str(json)
        .map_err(|e| Error::extractor(format!("Unreadable yt-dlp metadata: {e}")))?;

    Ok(VideoMetadata {
        url: url.to_string(),
        title: raw.title.unwrap_or_else(|| "Unknown title".to_string()),
        thumbnail: raw.thumbnail.unwrap_or_default(),
        duration: raw.duration_string.unwrap_or_default(),
        uploader: raw.uploader.unwrap_or_default(),
    })
}

/// Extract the final output path from `yt-dlp` progress lines.
///
/// Later stages override earlier ones, so the last reported destination wins
/// (e.g. `[download]` followed by `[ExtractAudio]` for an mp3 request).
pub(crate) fn destination(stdout: &str) -> Option<PathBuf> {
    let mut dest = None;
    for line in stdout.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("[download] Destination: ") {
            dest = Some(PathBuf::from(rest.trim()));
        } else if let Some(rest) = line.strip_prefix("[ExtractAudio] Destination: ") {
            dest = Some(PathBuf::from(rest.trim()));
        } else if let Some(rest) = line.strip_prefix("[Merger] Merging formats into ") {
            dest = Some(PathBuf::from(rest.trim().trim_matches('"')));
        } else if let Some(rest) = line.strip_prefix("[download] ")
            && let Some(path) = rest.strip_suffix(" has already been downloaded")
        {
            dest = Some(PathBuf::from(path.trim()));
        }
    }
    dest
}

/// Condense stderr into a short, single-line error message.
pub(crate) fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let mut tail: Vec<&str> = text
        .lines()
        .rev()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(3)
        .collect();
    tail.reverse();

    if tail.is_empty() {
        "yt-dlp exited with an error".to_string()
    } else {
        tail.join("; ")
    }
}
