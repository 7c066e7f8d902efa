//! Project configuration under `.mob/`.
//!
//! - `config.toml`: workflow settings ([`Settings`])
//! - `checklist.yaml`: review checklist ([`Checklist`])

mod checklist;

pub use checklist::{Checklist, CHECKLIST_FILE};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StorageError;
use crate::git::ConflictPolicy;

/// Project-local configuration directory
pub const MOB_DIR: &str = ".mob";

/// Settings file name within `.mob/`
pub const CONFIG_FILE: &str = "config.toml";

pub fn mob_dir(workdir: &Path) -> PathBuf {
    workdir.join(MOB_DIR)
}

/// What `mob init` does when the issue already has a fork point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReinitPolicy {
    /// Record the new fork point, with a warning
    #[default]
    Overwrite,
    /// Refuse before touching the repository
    Reject,
}

/// Workflow settings loaded from `.mob/config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Remote the `pr` branch is pushed to
    pub remote: String,
    pub reinit: ReinitPolicy,
    /// Conflict resolution for the squash merge
    pub conflict: ConflictPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            reinit: ReinitPolicy::default(),
            conflict: ConflictPolicy::default(),
        }
    }
}

impl Settings {
    /// Load settings for a working directory.
    ///
    /// A missing file gives the defaults; a file that fails to parse is an
    /// error.
    pub fn load(workdir: &Path) -> Result<Self, StorageError> {
        let path = mob_dir(workdir).join(CONFIG_FILE);

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| StorageError::Read {
            path: path.clone(),
            source,
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| StorageError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), ?settings, "Loaded settings");

        Ok(settings)
    }

    /// Write the default settings file. Returns `false` if one already exists.
    pub fn write_default(workdir: &Path) -> Result<bool, StorageError> {
        let path = mob_dir(workdir).join(CONFIG_FILE);
        if path.exists() {
            return Ok(false);
        }

        let content =
            toml::to_string_pretty(&Self::default()).map_err(|e| StorageError::Serialize {
                path: path.clone(),
                message: e.to_string(),
            })?;

        write_with_dir(&path, &content)?;
        Ok(true)
    }
}

/// Write a file below `.mob/`, creating the directory first
pub(crate) fn write_with_dir(path: &Path, content: &str) -> Result<(), StorageError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| StorageError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, content).map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })
}
