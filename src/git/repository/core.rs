use std::path::{Path, PathBuf};

use super::Repository;
use crate::git::error::RepositoryError;
use crate::git::merge::operations::ConflictPolicy;
use crate::git::runner::ProcessRunner;

/// Handle on a working copy, driving the `git` binary inside it
#[derive(Debug, Clone)]
pub struct GitCli {
    runner: ProcessRunner,
}

impl GitCli {
    /// Operate on the repository containing `workdir`
    pub fn new<P: AsRef<Path>>(workdir: P) -> Self {
        Self {
            runner: ProcessRunner::new("git", workdir),
        }
    }

    /// Get the working directory commands run in
    pub fn path(&self) -> &Path {
        self.runner.workdir()
    }

    /// Check that the working directory is inside a work tree
    pub fn is_work_tree(&self) -> bool {
        matches!(
            self.runner.output(&["rev-parse", "--is-inside-work-tree"]),
            Ok(out) if out == "true"
        )
    }

    /// Root of the work tree containing the working directory
    pub fn toplevel(&self) -> Result<PathBuf, RepositoryError> {
        self.runner
            .output(&["rev-parse", "--show-toplevel"])
            .map(PathBuf::from)
    }

    pub(crate) fn runner(&self) -> &ProcessRunner {
        &self.runner
    }
}

impl Repository for GitCli {
    fn checkout(&self, branch: &str) -> Result<(), RepositoryError> {
        GitCli::checkout(self, branch)
    }

    fn checkout_new_branch(&self, branch: &str) -> Result<(), RepositoryError> {
        GitCli::checkout_new_branch(self, branch)
    }

    fn current_branch(&self) -> Result<String, RepositoryError> {
        GitCli::current_branch(self)
    }

    fn branch_exists(&self, branch: &str) -> bool {
        GitCli::branch_exists(self, branch)
    }

    fn delete_branch(&self, branch: &str) -> Result<(), RepositoryError> {
        GitCli::delete_branch(self, branch)
    }

    fn force_branch(&self, branch: &str, commit: &str) -> Result<(), RepositoryError> {
        GitCli::force_branch(self, branch, commit)
    }

    fn commit_hash(&self, reference: &str) -> Result<String, RepositoryError> {
        GitCli::commit_hash(self, reference)
    }

    fn commits_between(&self, base: &str, head: &str) -> Result<Vec<String>, RepositoryError> {
        GitCli::commits_between(self, base, head)
    }

    fn merge_squash(&self, branch: &str, policy: ConflictPolicy) -> Result<(), RepositoryError> {
        GitCli::merge_squash(self, branch, policy)
    }

    fn abort_merge(&self) -> Result<(), RepositoryError> {
        GitCli::abort_merge(self)
    }

    fn commit(&self, message: &str) -> Result<(), RepositoryError> {
        GitCli::commit(self, message)
    }

    fn reset_hard(&self, commit: &str) -> Result<(), RepositoryError> {
        GitCli::reset_hard(self, commit)
    }

    fn push_set_upstream(&self, remote: &str, branch: &str) -> Result<(), RepositoryError> {
        GitCli::push_set_upstream(self, remote, branch)
    }

    fn pull(&self) -> Result<(), RepositoryError> {
        GitCli::pull(self)
    }

    fn diff(&self, base: &str, head: &str) -> Result<String, RepositoryError> {
        GitCli::diff(self, base, head)
    }

    fn diff_stat(&self, base: &str, head: &str) -> Result<String, RepositoryError> {
        GitCli::diff_stat(self, base, head)
    }
}
