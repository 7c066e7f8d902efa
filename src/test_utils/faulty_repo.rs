use std::cell::Cell;

use crate::git::{ConflictPolicy, GitCli, Repository, RepositoryError};

/// Repository operations a [`FaultyRepo`] can intercept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultOp {
    Checkout,
    CheckoutNewBranch,
    MergeSquash,
    Commit,
    Push,
}

enum Fault {
    /// Fail without running the operation
    Fail,
    /// Run the operation, then the action
    After(Box<dyn Fn()>),
}

/// Test decorator that delegates to a real [`GitCli`] and interferes with
/// the n-th call (1-based) of one operation
pub struct FaultyRepo {
    inner: GitCli,
    op: FaultOp,
    on_call: usize,
    fault: Fault,
    calls: Cell<usize>,
}

impl FaultyRepo {
    /// Fail the n-th call of `op`
    pub fn new(inner: GitCli, op: FaultOp, on_call: usize) -> Self {
        Self::with_fault(inner, op, on_call, Fault::Fail)
    }

    /// Run `action` right after the n-th call of `op` completes
    pub fn after(
        inner: GitCli,
        op: FaultOp,
        on_call: usize,
        action: impl Fn() + 'static,
    ) -> Self {
        Self::with_fault(inner, op, on_call, Fault::After(Box::new(action)))
    }

    fn with_fault(inner: GitCli, op: FaultOp, on_call: usize, fault: Fault) -> Self {
        Self {
            inner,
            op,
            on_call,
            fault,
            calls: Cell::new(0),
        }
    }

    fn intercept<T>(
        &self,
        op: FaultOp,
        command: &str,
        call: impl FnOnce() -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        if op != self.op {
            return call();
        }

        let count = self.calls.get() + 1;
        self.calls.set(count);
        if count != self.on_call {
            return call();
        }

        match &self.fault {
            Fault::Fail => Err(RepositoryError::Failed {
                command: format!("git {command}"),
                status: Some(1),
                stderr: "injected failure".to_string(),
            }),
            Fault::After(action) => {
                let result = call();
                action();
                result
            }
        }
    }
}

impl Repository for FaultyRepo {
    fn checkout(&self, branch: &str) -> Result<(), RepositoryError> {
        self.intercept(FaultOp::Checkout, &format!("checkout {branch}"), || {
            self.inner.checkout(branch)
        })
    }

    fn checkout_new_branch(&self, branch: &str) -> Result<(), RepositoryError> {
        self.intercept(
            FaultOp::CheckoutNewBranch,
            &format!("checkout -b {branch}"),
            || self.inner.checkout_new_branch(branch),
        )
    }

    fn current_branch(&self) -> Result<String, RepositoryError> {
        self.inner.current_branch()
    }

    fn branch_exists(&self, branch: &str) -> bool {
        self.inner.branch_exists(branch)
    }

    fn delete_branch(&self, branch: &str) -> Result<(), RepositoryError> {
        self.inner.delete_branch(branch)
    }

    fn force_branch(&self, branch: &str, commit: &str) -> Result<(), RepositoryError> {
        self.inner.force_branch(branch, commit)
    }

    fn commit_hash(&self, reference: &str) -> Result<String, RepositoryError> {
        self.inner.commit_hash(reference)
    }

    fn commits_between(&self, base: &str, head: &str) -> Result<Vec<String>, RepositoryError> {
        self.inner.commits_between(base, head)
    }

    fn merge_squash(&self, branch: &str, policy: ConflictPolicy) -> Result<(), RepositoryError> {
        self.intercept(
            FaultOp::MergeSquash,
            &format!("merge --squash {branch}"),
            || self.inner.merge_squash(branch, policy),
        )
    }

    fn abort_merge(&self) -> Result<(), RepositoryError> {
        self.inner.abort_merge()
    }

    fn commit(&self, message: &str) -> Result<(), RepositoryError> {
        self.intercept(FaultOp::Commit, &format!("commit -m {message}"), || {
            self.inner.commit(message)
        })
    }

    fn reset_hard(&self, commit: &str) -> Result<(), RepositoryError> {
        self.inner.reset_hard(commit)
    }

    fn push_set_upstream(&self, remote: &str, branch: &str) -> Result<(), RepositoryError> {
        self.intercept(
            FaultOp::Push,
            &format!("push -u {remote} {branch}"),
            || self.inner.push_set_upstream(remote, branch),
        )
    }

    fn pull(&self) -> Result<(), RepositoryError> {
        self.inner.pull()
    }

    fn diff(&self, base: &str, head: &str) -> Result<String, RepositoryError> {
        self.inner.diff(base, head)
    }

    fn diff_stat(&self, base: &str, head: &str) -> Result<String, RepositoryError> {
        self.inner.diff_stat(base, head)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::{FaultOp, FaultyRepo};
    use crate::git::Repository;
    use crate::test_utils::create_test_repo;

    #[test]
    fn fails_only_the_chosen_call() {
        let repo = create_test_repo();
        repo.add_file_and_commit("README.md", "initial", "Initial commit");
        repo.create_branch("other");
        let faulty = FaultyRepo::new(repo.cli(), FaultOp::Checkout, 2);

        faulty.checkout("other").unwrap();
        let err = faulty.checkout("master").unwrap_err();
        faulty.checkout("master").unwrap();

        assert_eq!(err.command(), "git checkout master");
        repo.assert_current_branch("master");
    }

    #[test]
    fn other_operations_pass_through() {
        let repo = create_test_repo();
        let head = repo.add_file_and_commit("README.md", "initial", "Initial commit");
        let faulty = FaultyRepo::new(repo.cli(), FaultOp::Commit, 1);

        assert_eq!(faulty.commit_hash("HEAD").unwrap(), head);
        assert_eq!(faulty.current_branch().unwrap(), "master");
        assert!(faulty.commit("anything").is_err());
    }

    #[test]
    fn after_runs_action_once_the_call_succeeded() {
        let repo = create_test_repo();
        repo.add_file_and_commit("README.md", "initial", "Initial commit");
        repo.create_branch("other");
        let ran = Rc::new(Cell::new(0));
        let seen = Rc::clone(&ran);
        let faulty = FaultyRepo::after(repo.cli(), FaultOp::Checkout, 1, move || {
            seen.set(seen.get() + 1)
        });

        faulty.checkout("other").unwrap();
        faulty.checkout("master").unwrap();

        assert_eq!(ran.get(), 1);
        repo.assert_current_branch("master");
    }
}
