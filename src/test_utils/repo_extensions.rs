use std::path::Path;

use assert_fs::TempDir;
use git2::build::CheckoutBuilder;
use git2::{BranchType, Commit, Oid, Repository, RepositoryState, Signature, StatusOptions};

use crate::git::GitCli;
use crate::tracking::TrackingStore;

/// Scratch repository for tests.
///
/// Setup and inspection go through libgit2 so assertions do not depend on
/// the subprocess adapter being tested.
pub struct TestRepo {
    dir: TempDir,
    remote_dir: Option<TempDir>,
}

/// Create a new temporary repository with user config set up
pub fn create_test_repo() -> TestRepo {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();

    // Pin the initial branch regardless of init.defaultBranch
    repo.set_head("refs/heads/master").unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();
    config.set_bool("commit.gpgsign", false).unwrap();

    TestRepo {
        dir,
        remote_dir: None,
    }
}

/// Create a test repository with an empty bare `origin` next to it
pub fn create_test_repo_with_remote() -> TestRepo {
    let mut test_repo = create_test_repo();

    let remote_dir = TempDir::new().unwrap();
    Repository::init_bare(remote_dir.path()).unwrap();

    let remote_path = remote_dir
        .path()
        .to_str()
        .expect("temp path is valid UTF-8");
    test_repo.git().remote("origin", remote_path).unwrap();
    test_repo.remote_dir = Some(remote_dir);

    test_repo
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Fresh handle, so the on-disk index written by `git` is re-read
    pub fn git(&self) -> Repository {
        Repository::open(self.path()).unwrap()
    }

    pub fn cli(&self) -> GitCli {
        GitCli::new(self.path())
    }

    pub fn store(&self) -> TrackingStore {
        TrackingStore::in_workdir(self.path())
    }

    // ===================== Setup ==================

    pub fn write_file(&self, filename: &str, content: &str) -> &Self {
        std::fs::write(self.path().join(filename), content).unwrap();
        self
    }

    pub fn stage(&self, filename: &str) -> &Self {
        let repo = self.git();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(filename)).unwrap();
        index.write().unwrap();
        self
    }

    /// Write, stage and commit a file on HEAD; returns the new commit hash
    pub fn add_file_and_commit(&self, filename: &str, content: &str, message: &str) -> String {
        self.write_file(filename, content).stage(filename);

        let repo = self.git();
        let mut index = repo.index().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let signature = Signature::now("Test User", "test@example.com").unwrap();

        // Get parent commit (if any)
        let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&Commit> = parent.iter().collect();

        repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .unwrap()
            .to_string()
    }

    /// Create a branch at HEAD without switching to it
    pub fn create_branch(&self, branch: &str) -> &Self {
        let repo = self.git();
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        repo.branch(branch, &head, false).unwrap();
        self
    }

    pub fn create_and_checkout_branch(&self, branch: &str) -> &Self {
        self.create_branch(branch).checkout_branch(branch)
    }

    pub fn checkout_branch(&self, branch: &str) -> &Self {
        let repo = self.git();
        let reference = format!("refs/heads/{branch}");
        let target = repo.revparse_single(&reference).unwrap();
        repo.checkout_tree(&target, Some(CheckoutBuilder::new().force()))
            .unwrap();
        repo.set_head(&reference).unwrap();
        self
    }

    pub fn delete_branch(&self, branch: &str) -> &Self {
        let repo = self.git();
        repo.find_branch(branch, BranchType::Local)
            .unwrap()
            .delete()
            .unwrap();
        self
    }

    // ===================== Inspection ==================

    pub fn branch_tip(&self, branch: &str) -> Option<String> {
        let repo = self.git();
        let reference = repo.find_reference(&format!("refs/heads/{branch}")).ok()?;
        reference.target().map(|oid| oid.to_string())
    }

    /// Tip of a branch in the bare `origin`
    pub fn remote_branch_tip(&self, branch: &str) -> Option<String> {
        let remote = Repository::open_bare(self.remote_dir.as_ref()?.path()).ok()?;
        let reference = remote
            .find_reference(&format!("refs/heads/{branch}"))
            .ok()?;
        reference.target().map(|oid| oid.to_string())
    }

    pub fn upstream_of(&self, branch: &str) -> Option<String> {
        let repo = self.git();
        let upstream = repo
            .branch_upstream_name(&format!("refs/heads/{branch}"))
            .ok()?;
        upstream.as_str().map(str::to_string)
    }

    pub fn parents_of(&self, commit: &str) -> Vec<String> {
        let repo = self.git();
        let commit = repo.find_commit(Oid::from_str(commit).unwrap()).unwrap();
        commit.parent_ids().map(|oid| oid.to_string()).collect()
    }

    pub fn commit_message(&self, commit: &str) -> String {
        let repo = self.git();
        let commit = repo.find_commit(Oid::from_str(commit).unwrap()).unwrap();
        commit.message().unwrap_or("").trim_end().to_string()
    }

    /// Contents of a file as committed on a branch
    pub fn file_at(&self, branch: &str, filename: &str) -> Option<String> {
        let repo = self.git();
        let spec = format!("refs/heads/{branch}:{filename}");
        let object = repo.revparse_single(&spec).ok()?;
        let blob = object.peel_to_blob().ok()?;
        Some(String::from_utf8_lossy(blob.content()).into_owned())
    }

    pub fn read_file(&self, filename: &str) -> String {
        std::fs::read_to_string(self.path().join(filename)).unwrap()
    }

    // ===================== Assert functions ==================

    pub fn assert_current_branch(&self, branch: &str) -> &Self {
        let repo = self.git();
        let head = repo.find_reference("HEAD").unwrap();
        let expected = format!("refs/heads/{branch}");
        match head.symbolic_target() {
            Some(actual) if actual == expected => {}
            Some(actual) => {
                panic!("HEAD symbolic target mismatch. Expected: '{expected}', Found: '{actual}'")
            }
            None => panic!("HEAD is detached, expected '{expected}'"),
        }
        self
    }

    /// No merge in progress and no tracked changes in index or work tree
    pub fn assert_clean(&self) -> &Self {
        let repo = self.git();
        assert_eq!(repo.state(), RepositoryState::Clean, "repository state");

        let mut options = StatusOptions::new();
        options.include_untracked(false).include_ignored(false);
        let statuses = repo.statuses(Some(&mut options)).unwrap();
        let dirty: Vec<_> = statuses
            .iter()
            .filter_map(|entry| entry.path().map(str::to_string))
            .collect();
        assert!(dirty.is_empty(), "expected clean tree, found changes in {dirty:?}");
        self
    }

    pub fn assert_file_exists(&self, filename: &str) -> &Self {
        let file_path = self.path().join(filename);
        if !file_path.exists() {
            panic!("Expected file '{filename}' to exist at path: {file_path:?}");
        }
        self
    }

    pub fn assert_file_not_exists(&self, filename: &str) -> &Self {
        let file_path = self.path().join(filename);
        if file_path.exists() {
            panic!("Expected file '{filename}' to not exist at path: {file_path:?}");
        }
        self
    }

    /// Assert commit messages reachable from HEAD, newest first
    pub fn assert_commit_messages(&self, expected_messages: &[&str]) -> &Self {
        let repo = self.git();
        let mut revwalk = repo.revwalk().unwrap();
        revwalk.push_head().unwrap();

        let messages: Vec<String> = revwalk
            .map(|oid| {
                let commit = repo.find_commit(oid.unwrap()).unwrap();
                commit.message().unwrap_or("").trim_end().to_string()
            })
            .collect();

        assert_eq!(messages, expected_messages, "commit messages");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{create_test_repo, create_test_repo_with_remote};

    #[test]
    fn add_file_and_commit_works() {
        let repo = create_test_repo();

        let first = repo.add_file_and_commit("a.txt", "a", "Add a");
        let second = repo.add_file_and_commit("b.txt", "b", "Add b");

        repo.assert_commit_messages(&["Add b", "Add a"]);
        assert_eq!(repo.parents_of(&second), vec![first]);
        assert_eq!(repo.branch_tip("master"), Some(second));
        repo.assert_clean();
    }

    #[test]
    fn branches_and_checkout_work() {
        let repo = create_test_repo();
        repo.add_file_and_commit("README.md", "initial", "Initial commit");

        repo.create_and_checkout_branch("feature");
        repo.add_file_and_commit("feature.txt", "feature", "Feature commit");
        repo.assert_current_branch("feature");

        repo.checkout_branch("master");
        repo.assert_current_branch("master");
        repo.assert_file_not_exists("feature.txt");
        assert_eq!(repo.file_at("feature", "feature.txt"), Some("feature".to_string()));
        assert_eq!(repo.file_at("master", "feature.txt"), None);
    }

    #[test]
    fn remote_starts_empty() {
        let repo = create_test_repo_with_remote();
        repo.add_file_and_commit("README.md", "initial", "Initial commit");

        assert_eq!(repo.remote_branch_tip("master"), None);
        assert_eq!(create_test_repo().remote_branch_tip("master"), None);
    }
}
