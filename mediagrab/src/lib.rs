//! mediagrab: a small web front-end for `yt-dlp`.
//!
//! Accepts one or more media URLs, queries `yt-dlp` for metadata, drives
//! downloads/transcodes through the same tool, and packages results as a
//! single file or a zip archive for browser download.

pub mod api;
pub mod config;
pub mod download;
pub mod error;
pub mod packaging;
pub mod ytdlp;
