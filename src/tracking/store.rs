use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::TrackingDocument;
use crate::config::mob_dir;
use crate::error::StorageError;

/// Filename for tracking state within `.mob/`
pub const TRACKING_FILE: &str = "tracking.json";

/// Loads and saves the [`TrackingDocument`] as pretty-printed JSON.
///
/// Nothing is cached: every command loads fresh and rewrites the whole file.
#[derive(Debug, Clone)]
pub struct TrackingStore {
    path: PathBuf,
}

impl TrackingStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store at `<workdir>/.mob/tracking.json`
    pub fn in_workdir<P: AsRef<Path>>(workdir: P) -> Self {
        Self::new(mob_dir(workdir.as_ref()).join(TRACKING_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document. A missing file yields an empty document.
    pub fn load(&self) -> Result<TrackingDocument, StorageError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No tracking file, starting empty");
            return Ok(TrackingDocument::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| StorageError::Read {
            path: self.path.clone(),
            source,
        })?;

        let document: TrackingDocument =
            serde_json::from_str(&content).map_err(|e| StorageError::Parse {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        debug!(
            path = %self.path.display(),
            issues = document.issues.len(),
            "Loaded tracking data"
        );

        Ok(document)
    }

    /// Replace the stored document, creating `.mob/` if needed
    pub fn save(&self, document: &TrackingDocument) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            if !dir.is_dir() {
                fs::create_dir_all(dir).map_err(|source| StorageError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
        }

        let content =
            serde_json::to_string_pretty(document).map_err(|e| StorageError::Serialize {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        fs::write(&self.path, content).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(
            path = %self.path.display(),
            issues = document.issues.len(),
            "Saved tracking data"
        );

        Ok(())
    }
}
