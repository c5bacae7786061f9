//! Response packaging: a single downloaded file, or a zip bundle.

use std::fs::File;
use std::path::Path;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::download::DownloadBatch;
use crate::error::{Error, Result};
use crate::ytdlp::MediaFormat;

/// A fully buffered response payload.
///
/// Buffering before the batch is dropped lets workspace cleanup happen before
/// the response leaves the handler, so no file is streamed from a directory
/// that is being deleted.
#[derive(Debug)]
pub struct Payload {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Package a completed batch for the HTTP response.
///
/// Bundle mode zips every downloaded file under its base name; single mode
/// returns the first (only) downloaded file as-is.
pub fn package(batch: &DownloadBatch, format: MediaFormat, bundle: bool) -> Result<Payload> {
    let files = batch.completed();
    if files.is_empty() {
        return Err(Error::NothingDownloaded);
    }

    if bundle {
        bundle_zip(batch.workspace_dir(), &files, format)
    } else {
        single_file(files[0], format)
    }
}

fn single_file(path: &Path, format: MediaFormat) -> Result<Payload> {
    let filename = base_name(path);
    let bytes = std::fs::read(path)?;
    Ok(Payload {
        filename,
        content_type: format.content_type(),
        bytes,
    })
}

fn bundle_zip(workspace_dir: &Path, files: &[&Path], format: MediaFormat) -> Result<Payload> {
    let archive_name = format!("downloads_{format}.zip");
    let archive_path = workspace_dir.join(&archive_name);

    let mut zip = ZipWriter::new(File::create(&archive_path)?);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for file in files {
        zip.start_file(base_name(file), options)?;
        let mut source = File::open(file)?;
        std::io::copy(&mut source, &mut zip)?;
    }
    zip.finish()?;

    let bytes = std::fs::read(&archive_path)?;
    Ok(Payload {
        filename: archive_name,
        content_type: "application/zip",
        bytes,
    })
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "download".to_string())
}
