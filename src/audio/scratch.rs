use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

/// A pipeline-scoped temporary file.
///
/// The path is timestamp-qualified so concurrent invocations in the same
/// scratch directory do not collide. The file is deleted when the guard
/// drops, on success and failure paths alike.
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Reserve a path under `dir` named `{prefix}_{unix_millis}.{extension}`.
    /// Nothing is created on disk until the caller writes to the path.
    pub fn reserve(dir: &Path, prefix: &str, extension: &str) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or(0);
        Self {
            path: dir.join(format!("{prefix}_{millis}.{extension}")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if self.path.exists() {
            if let Err(err) = std::fs::remove_file(&self.path) {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to remove scratch file"
                );
            }
        }
    }
}
