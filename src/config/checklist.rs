use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{mob_dir, write_with_dir};
use crate::error::StorageError;

pub const CHECKLIST_FILE: &str = "checklist.yaml";

/// Review checklist loaded from `.mob/checklist.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub description: String,
}

impl ChecklistItem {
    fn new(id: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
        }
    }
}

impl Default for Checklist {
    fn default() -> Self {
        Self {
            items: vec![
                ChecklistItem::new("tests", "All tests pass"),
                ChecklistItem::new("review", "Code has been self-reviewed"),
                ChecklistItem::new("docs", "Documentation updated if needed"),
                ChecklistItem::new("no-debug", "No debug code left behind"),
            ],
        }
    }
}

impl Checklist {
    /// Checklist written by `mob setup`
    pub fn starter() -> Self {
        let mut checklist = Self::default();
        checklist
            .items
            .push(ChecklistItem::new("lint", "No lint errors"));
        checklist
    }

    /// Load the checklist, falling back to the built-in one when no file exists
    pub fn load(workdir: &Path) -> Result<Self, StorageError> {
        let path = mob_dir(workdir).join(CHECKLIST_FILE);

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| StorageError::Read {
            path: path.clone(),
            source,
        })?;

        serde_yaml::from_str(&content).map_err(|e| StorageError::Parse {
            path,
            message: e.to_string(),
        })
    }

    pub fn save(&self, workdir: &Path) -> Result<(), StorageError> {
        let path = mob_dir(workdir).join(CHECKLIST_FILE);

        let content = serde_yaml::to_string(self).map_err(|e| StorageError::Serialize {
            path: path.clone(),
            message: e.to_string(),
        })?;

        write_with_dir(&path, &content)
    }

    /// Write the starter checklist. Returns `false` if a file already exists.
    pub fn write_default(workdir: &Path) -> Result<bool, StorageError> {
        if mob_dir(workdir).join(CHECKLIST_FILE).exists() {
            return Ok(false);
        }

        Self::starter().save(workdir)?;
        Ok(true)
    }
}
