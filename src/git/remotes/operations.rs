use crate::git::error::RepositoryError;
use crate::git::repository::core::GitCli;

impl GitCli {
    /// Push a branch and set it as upstream (`git push -u <remote> <branch>`)
    pub fn push_set_upstream(&self, remote: &str, branch: &str) -> Result<(), RepositoryError> {
        self.runner().run(&["push", "-u", remote, branch])
    }

    /// Fetch and merge the upstream of the current branch
    pub fn pull(&self) -> Result<(), RepositoryError> {
        self.runner().run(&["pull"])
    }
}
