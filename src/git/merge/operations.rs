use serde::{Deserialize, Serialize};

use crate::git::error::RepositoryError;
use crate::git::repository::core::GitCli;

/// How a squash merge resolves conflicting hunks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Incoming side wins (`-X theirs`)
    #[default]
    Theirs,
    /// Plain merge; a conflict fails the merge
    Fail,
}

impl GitCli {
    /// Squash-merge a branch into the current branch, leaving the result
    /// staged but uncommitted
    pub fn merge_squash(&self, branch: &str, policy: ConflictPolicy) -> Result<(), RepositoryError> {
        match policy {
            ConflictPolicy::Theirs => self
                .runner()
                .run(&["merge", "--squash", "-X", "theirs", branch]),
            ConflictPolicy::Fail => self.runner().run(&["merge", "--squash", branch]),
        }
    }

    /// Abort an in-progress merge
    pub fn abort_merge(&self) -> Result<(), RepositoryError> {
        self.runner().run(&["merge", "--abort"])
    }
}
