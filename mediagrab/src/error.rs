//! Application-wide error types.

use thiserror::Error;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Application-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Every URL in a download batch failed.
    #[error("No videos could be downloaded.")]
    NothingDownloaded,

    /// A `yt-dlp` invocation failed or produced unusable output.
    #[error("{0}")]
    Extractor(String),

    #[error("Packaging error: {0}")]
    Packaging(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn extractor(msg: impl Into<String>) -> Self {
        Self::Extractor(msg.into())
    }
}
