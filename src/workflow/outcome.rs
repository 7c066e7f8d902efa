use std::fmt;

use crate::error::MobError;
use crate::git::RepositoryError;

/// Progress through one `update` invocation.
///
/// Rollback is only attempted while the state is before [`Pushed`]; once
/// the target branch has been pushed its new state is kept.
///
/// [`Pushed`]: UpdateState::Pushed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UpdateState {
    Idle,
    DeltaComputed,
    BranchSelected,
    Merged,
    Committed,
    TrackingPersisted,
    Pushed,
    Done,
}

impl UpdateState {
    pub fn next(self) -> Self {
        match self {
            Self::Idle => Self::DeltaComputed,
            Self::DeltaComputed => Self::BranchSelected,
            Self::BranchSelected => Self::Merged,
            Self::Merged => Self::Committed,
            Self::Committed => Self::TrackingPersisted,
            Self::TrackingPersisted => Self::Pushed,
            Self::Pushed | Self::Done => Self::Done,
        }
    }
}

impl fmt::Display for UpdateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            Self::Idle => "starting",
            Self::DeltaComputed => "computing unmerged commits",
            Self::BranchSelected => "selecting the pr branch",
            Self::Merged => "squash-merging the wip branch",
            Self::Committed => "creating the squash commit",
            Self::TrackingPersisted => "saving tracking data",
            Self::Pushed => "pushing to the remote",
            Self::Done => "returning to the wip branch",
        };
        f.write_str(step)
    }
}

/// What a successful squash update did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub issue: String,
    pub working_branch: String,
    pub target_branch: String,
    /// Newly merged commits, newest first
    pub merged_commits: Vec<String>,
    /// Newest commit of the working branch at update time
    pub last_commit: String,
    /// The target branch did not exist before this update
    pub created_target: bool,
}

/// Result of `update`
#[derive(Debug)]
pub enum UpdateOutcome {
    /// The working branch has no commits past its fork point
    NothingToMerge,
    /// Every commit on the working branch was merged already
    NothingNew,
    /// Merged, committed, tracked, pushed and back on the working branch
    Merged(MergeReport),
    /// Everything up to the push succeeded; only returning to the working
    /// branch failed. Nothing was rolled back.
    PartialSuccess {
        report: MergeReport,
        error: RepositoryError,
    },
    /// A step failed and the repository and tracking data were restored
    RolledBack { failed_at: UpdateState, cause: MobError },
}

impl UpdateOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Self::NothingToMerge | Self::NothingNew | Self::Merged(_)
        )
    }

    pub fn report(&self) -> Option<&MergeReport> {
        match self {
            Self::Merged(report) | Self::PartialSuccess { report, .. } => Some(report),
            _ => None,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NothingToMerge | Self::NothingNew | Self::Merged(_) => 0,
            Self::RolledBack { .. } => 1,
            Self::PartialSuccess { .. } => 2,
        }
    }
}
