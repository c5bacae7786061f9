//! Download orchestration: drive `yt-dlp` over a batch of URLs into a
//! request-scoped workspace, isolating per-URL failures.

pub mod workspace;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::ytdlp::{MediaFormat, YtdlpClient};
use workspace::Workspace;

/// Per-URL result of a batch download.
///
/// Explicit outcomes let callers distinguish "skipped" from "succeeded"
/// without relying on log side effects.
#[derive(Debug)]
pub enum DownloadOutcome {
    Completed { url: String, path: PathBuf },
    Failed { url: String, error: Error },
}

/// The result of a whole batch: the workspace holding the files, plus one
/// outcome per non-blank input URL.
///
/// Dropping the batch removes the workspace and everything in it, so the
/// payload must be read out before the batch goes out of scope.
#[derive(Debug)]
pub struct DownloadBatch {
    pub(crate) workspace: Workspace,
    pub outcomes: Vec<DownloadOutcome>,
}

impl DownloadBatch {
    pub fn workspace_dir(&self) -> &Path {
        self.workspace.path()
    }

    /// Paths of all successfully downloaded files, in input order.
    pub fn completed(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                DownloadOutcome::Completed { path, .. } => Some(path.as_path()),
                DownloadOutcome::Failed { .. } => None,
            })
            .collect()
    }
}

/// Download a batch of URLs into a fresh workspace.
///
/// Per-URL failures are recorded and the loop continues; only a batch where
/// nothing was downloaded is an error, in which case the workspace is removed
/// before returning.
pub async fn run(
    ytdlp: &YtdlpClient,
    urls: &[String],
    format: MediaFormat,
) -> Result<DownloadBatch> {
    let workspace = Workspace::create()?;
    run_in(ytdlp, workspace, urls, format).await
}

pub(crate) async fn run_in(
    ytdlp: &YtdlpClient,
    workspace: Workspace,
    urls: &[String],
    format: MediaFormat,
) -> Result<DownloadBatch> {
    let mut outcomes = Vec::new();
    let mut claimed: Vec<PathBuf> = Vec::new();

    for url in urls {
        let url = url.trim();
        if url.is_empty() {
            continue;
        }
        match ytdlp.download(url, format, workspace.path(), &claimed).await {
            Ok(path) => {
                info!(%url, path = %path.display(), "Downloaded");
                claimed.push(path.clone());
                outcomes.push(DownloadOutcome::Completed {
                    url: url.to_string(),
                    path,
                });
            }
            Err(error) => {
                warn!(%url, %error, "Download failed");
                outcomes.push(DownloadOutcome::Failed {
                    url: url.to_string(),
                    error,
                });
            }
        }
    }

    if claimed.is_empty() {
        // Workspace is dropped (and removed) here.
        return Err(Error::NothingDownloaded);
    }

    Ok(DownloadBatch {
        workspace,
        outcomes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn broken_client() -> YtdlpClient {
        let config = AppConfig {
            ytdlp_path: "/nonexistent/yt-dlp-missing".into(),
            ..AppConfig::default()
        };
        YtdlpClient::new(&config)
    }

    #[tokio::test]
    async fn all_failures_remove_workspace_and_error() {
        let root = tempfile::tempdir().unwrap();
        let workspace = Workspace::create_in(root.path()).unwrap();
        let workspace_path = workspace.path().to_path_buf();

        let urls = vec![
            "https://example.com/a".to_string(),
            "https://example.com/b".to_string(),
        ];
        let result = run_in(&broken_client(), workspace, &urls, MediaFormat::Mp4).await;

        assert!(matches!(result, Err(Error::NothingDownloaded)));
        assert!(!workspace_path.exists());
    }

    #[tokio::test]
    async fn blank_urls_are_skipped() {
        let root = tempfile::tempdir().unwrap();
        let workspace = Workspace::create_in(root.path()).unwrap();

        let urls = vec!["".to_string(), "   ".to_string()];
        let result = run_in(&broken_client(), workspace, &urls, MediaFormat::Mp3).await;

        // Nothing attempted, so nothing downloaded.
        assert!(matches!(result, Err(Error::NothingDownloaded)));
    }

    #[test]
    fn completed_filters_failures() {
        let root = tempfile::tempdir().unwrap();
        let workspace = Workspace::create_in(root.path()).unwrap();
        let file = workspace.path().join("song.mp3");
        std::fs::write(&file, b"audio").unwrap();

        let batch = DownloadBatch {
            workspace,
            outcomes: vec![
                DownloadOutcome::Completed {
                    url: "a".into(),
                    path: file.clone(),
                },
                DownloadOutcome::Failed {
                    url: "b".into(),
                    error: Error::extractor("boom"),
                },
            ],
        };

        let completed = batch.completed();
        assert_eq!(completed, vec![file.as_path()]);
    }
}
