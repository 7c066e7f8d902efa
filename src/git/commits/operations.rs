use crate::git::error::RepositoryError;
use crate::git::repository::core::GitCli;

impl GitCli {
    /// Get the commit hash for a ref
    pub fn commit_hash(&self, reference: &str) -> Result<String, RepositoryError> {
        self.runner().output(&["rev-parse", reference])
    }

    /// Commit hashes between two refs, exclusive of `base` and inclusive of
    /// `head`, newest first
    pub fn commits_between(&self, base: &str, head: &str) -> Result<Vec<String>, RepositoryError> {
        let range = format!("{base}..{head}");
        let output = self.runner().output(&["log", "--format=%H", &range])?;

        if output.is_empty() {
            return Ok(Vec::new());
        }

        Ok(output.lines().map(|line| line.trim().to_string()).collect())
    }

    /// Commit whatever is staged
    pub fn commit(&self, message: &str) -> Result<(), RepositoryError> {
        self.runner().run(&["commit", "-m", message])
    }

    /// Reset the current branch to a commit, discarding all changes
    pub fn reset_hard(&self, commit: &str) -> Result<(), RepositoryError> {
        self.runner().run(&["reset", "--hard", commit])
    }

    pub fn diff(&self, base: &str, head: &str) -> Result<String, RepositoryError> {
        self.runner().output(&["diff", base, head])
    }

    pub fn diff_stat(&self, base: &str, head: &str) -> Result<String, RepositoryError> {
        self.runner().output(&["diff", "--stat", base, head])
    }
}
