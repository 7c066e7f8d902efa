pub mod core;

use super::error::RepositoryError;
use super::merge::operations::ConflictPolicy;

/// Typed repository operations consumed by the merge workflow.
///
/// [`GitCli`](super::GitCli) is the real implementation; tests wrap it to
/// inject failures at chosen steps.
pub trait Repository {
    /// `checkout <branch>` (also accepts a commit, leaving HEAD detached)
    fn checkout(&self, branch: &str) -> Result<(), RepositoryError>;

    /// `checkout -b <branch>` from the current HEAD
    fn checkout_new_branch(&self, branch: &str) -> Result<(), RepositoryError>;

    /// Name of the checked out branch (`HEAD` when detached)
    fn current_branch(&self) -> Result<String, RepositoryError>;

    fn branch_exists(&self, branch: &str) -> bool;

    /// `branch -D <branch>`
    fn delete_branch(&self, branch: &str) -> Result<(), RepositoryError>;

    /// `branch -f <branch> <commit>`; never touches the checked out branch
    fn force_branch(&self, branch: &str, commit: &str) -> Result<(), RepositoryError>;

    /// Full commit hash for a ref
    fn commit_hash(&self, reference: &str) -> Result<String, RepositoryError>;

    /// Commits reachable from `head` but not from `base`, newest first
    fn commits_between(&self, base: &str, head: &str) -> Result<Vec<String>, RepositoryError>;

    /// Squash-merge `branch` into the current branch without committing
    fn merge_squash(&self, branch: &str, policy: ConflictPolicy) -> Result<(), RepositoryError>;

    fn abort_merge(&self) -> Result<(), RepositoryError>;

    fn commit(&self, message: &str) -> Result<(), RepositoryError>;

    fn reset_hard(&self, commit: &str) -> Result<(), RepositoryError>;

    /// `push -u <remote> <branch>`
    fn push_set_upstream(&self, remote: &str, branch: &str) -> Result<(), RepositoryError>;

    fn pull(&self) -> Result<(), RepositoryError>;

    fn diff(&self, base: &str, head: &str) -> Result<String, RepositoryError>;

    fn diff_stat(&self, base: &str, head: &str) -> Result<String, RepositoryError>;
}
