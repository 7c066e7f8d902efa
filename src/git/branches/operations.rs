use crate::git::error::RepositoryError;
use crate::git::repository::core::GitCli;

impl GitCli {
    pub fn checkout(&self, branch: &str) -> Result<(), RepositoryError> {
        self.runner().run(&["checkout", branch])
    }

    /// Create a new branch from the current HEAD and switch to it
    pub fn checkout_new_branch(&self, branch: &str) -> Result<(), RepositoryError> {
        self.runner().run(&["checkout", "-b", branch])
    }

    /// Get the current branch name
    pub fn current_branch(&self) -> Result<String, RepositoryError> {
        self.runner().output(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    pub fn branch_exists(&self, branch: &str) -> bool {
        self.runner().output(&["rev-parse", "--verify", branch]).is_ok()
    }

    pub fn delete_branch(&self, branch: &str) -> Result<(), RepositoryError> {
        self.runner().run(&["branch", "-D", branch])
    }

    /// Point `branch` at `commit` without checking it out.
    /// Fails for the checked out branch.
    pub fn force_branch(&self, branch: &str, commit: &str) -> Result<(), RepositoryError> {
        self.runner().run(&["branch", "-f", branch, commit])
    }
}
