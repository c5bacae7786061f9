//! Request-scoped temporary directories.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

/// A uniquely named temporary directory owning all files produced by one
/// download request.
///
/// The directory is removed on drop, so cleanup happens on every exit path.
/// Deletion failures are logged, never raised; the response has typically
/// already been assembled by then.
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
}

impl Workspace {
    /// Create a workspace under the system temp directory.
    pub fn create() -> io::Result<Self> {
        Self::create_in(std::env::temp_dir())
    }

    /// Create a workspace under `root`. Identifiers are random UUIDs, so
    /// concurrent requests never share a directory.
    pub fn create_in(root: impl AsRef<Path>) -> io::Result<Self> {
        let path = root
            .as_ref()
            .join(format!("mediagrab_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&path)?;
        debug!(path = %path.display(), "Created workspace");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed workspace"),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => {
                warn!(path = %self.path.display(), %error, "Failed to remove workspace");
            }
        }
    }
}
