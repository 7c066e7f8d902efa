//! The wip/pr branch workflow.
//!
//! A contributor works on `wip/<issue>`, forked from a recorded commit, and
//! periodically folds new work into `pr/<issue>` with an incremental squash
//! merge. [`MergeCoordinator`] owns that protocol:
//!
//! 1. Gather - current branch, fork point, commit range, unmerged delta
//! 2. Apply - select/create `pr`, squash-merge, commit, record, push
//! 3. Finish - return to `wip`, or roll back if a step before the push failed

mod outcome;
mod start;
mod update;

pub use outcome::{MergeReport, UpdateOutcome, UpdateState};
pub use start::StartReport;

use crate::config::Settings;
use crate::error::MobError;
use crate::git::{Repository, RepositoryError};
use crate::tracking::{IssueTracking, TrackingDocument, TrackingStore};

pub const WIP_PREFIX: &str = "wip/";
pub const PR_PREFIX: &str = "pr/";

pub fn wip_branch(issue: &str) -> String {
    format!("{WIP_PREFIX}{issue}")
}

pub fn pr_branch(issue: &str) -> String {
    format!("{PR_PREFIX}{issue}")
}

/// Issue identifier of a `wip/<issue>` branch
pub fn issue_from_branch(branch: &str) -> Option<&str> {
    branch
        .strip_prefix(WIP_PREFIX)
        .filter(|issue| !issue.is_empty())
}

/// Turn free-form input into a branch-safe issue identifier
pub fn normalize_issue(input: &str) -> String {
    input.trim().replace(' ', "-")
}

/// Abbreviated commit hash for display
pub fn short_hash(commit: &str) -> &str {
    commit.get(..7).unwrap_or(commit)
}

/// The issue being worked on, resolved from the current branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingIssue {
    pub issue: String,
    pub wip_branch: String,
    pub pr_branch: String,
    pub fork_point: String,
}

/// Read-only view of an issue's merge progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueStatus {
    pub working: WorkingIssue,
    pub tracking: IssueTracking,
    /// Commits on the working branch past the fork point
    pub total_commits: usize,
    /// Commits not yet squashed into the target branch, newest first
    pub unmerged: Vec<String>,
    pub target_exists: bool,
}

/// Drives the update protocol against a repository and a tracking store.
///
/// Built once per command invocation; holds no state of its own beyond the
/// handles it was given.
pub struct MergeCoordinator<'a, R: Repository + ?Sized> {
    repo: &'a R,
    store: &'a TrackingStore,
    settings: &'a Settings,
}

impl<'a, R: Repository + ?Sized> MergeCoordinator<'a, R> {
    pub fn new(repo: &'a R, store: &'a TrackingStore, settings: &'a Settings) -> Self {
        Self {
            repo,
            store,
            settings,
        }
    }

    /// Resolve the issue and fork point for the checked out `wip` branch
    pub fn working_issue(&self) -> Result<WorkingIssue, MobError> {
        let (working, _) = self.resolve()?;
        Ok(working)
    }

    /// Full diff of the working branch against its fork point
    pub fn diff(&self, working: &WorkingIssue) -> Result<String, RepositoryError> {
        self.repo.diff(&working.fork_point, &working.wip_branch)
    }

    pub fn diff_stat(&self, working: &WorkingIssue) -> Result<String, RepositoryError> {
        self.repo.diff_stat(&working.fork_point, &working.wip_branch)
    }

    pub fn status(&self) -> Result<IssueStatus, MobError> {
        let (working, document) = self.resolve()?;
        let all_commits = self
            .repo
            .commits_between(&working.fork_point, &working.wip_branch)?;
        let unmerged = document.unmerged_commits(&working.issue, &all_commits);
        let target_exists = self.repo.branch_exists(&working.pr_branch);

        Ok(IssueStatus {
            tracking: document.issue(&working.issue),
            total_commits: all_commits.len(),
            unmerged,
            target_exists,
            working,
        })
    }

    fn resolve(&self) -> Result<(WorkingIssue, TrackingDocument), MobError> {
        let current = self.repo.current_branch()?;
        let issue = issue_from_branch(&current).ok_or_else(|| {
            MobError::usage("not on a wip branch. Please checkout a wip/<issue> branch first")
        })?;

        let document = self.store.load()?;
        let fork_point = document.fork_point(issue);
        if fork_point.is_empty() {
            return Err(MobError::usage(format!(
                "no fork point found for issue '{issue}'. Was this branch created with 'mob init'?"
            )));
        }

        let working = WorkingIssue {
            issue: issue.to_string(),
            wip_branch: current.clone(),
            pr_branch: pr_branch(issue),
            fork_point: fork_point.to_string(),
        };

        Ok((working, document))
    }
}
