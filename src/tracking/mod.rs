//! Per-issue merge tracking.
//!
//! Squash merges discard commit identity on the `pr` branch, so this
//! document is the only record of which `wip` commits were already folded
//! in.

mod store;

pub use store::TrackingStore;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// Tracking state for a single issue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTracking {
    /// Commit the `wip` branch was created from
    #[serde(default)]
    pub fork_point: String,
    /// Newest `wip` commit included in the last update
    #[serde(default)]
    pub last_merged_commit: String,
    /// Commits already squashed into the `pr` branch, in insertion order
    #[serde(default)]
    pub merged_commits: Vec<String>,
}

/// All tracked issues, keyed by issue identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingDocument {
    #[serde(default)]
    pub issues: BTreeMap<String, IssueTracking>,
}

impl TrackingDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracking for an issue, or the empty default if it is unknown
    pub fn issue(&self, issue: &str) -> IssueTracking {
        self.issues.get(issue).cloned().unwrap_or_default()
    }

    /// Recorded fork point, or `""` when none is known
    pub fn fork_point(&self, issue: &str) -> &str {
        self.issues
            .get(issue)
            .map(|tracking| tracking.fork_point.as_str())
            .unwrap_or("")
    }

    /// Record the fork point, keeping any merge history for the issue
    pub fn set_fork_point(&mut self, issue: &str, commit: &str) {
        self.issues.entry(issue.to_string()).or_default().fork_point = commit.to_string();
    }

    /// Filter `all_commits` down to those not yet merged, keeping their order
    pub fn unmerged_commits(&self, issue: &str, all_commits: &[String]) -> Vec<String> {
        let Some(tracking) = self.issues.get(issue) else {
            return all_commits.to_vec();
        };

        let merged: HashSet<&str> = tracking.merged_commits.iter().map(String::as_str).collect();

        all_commits
            .iter()
            .filter(|commit| !merged.contains(commit.as_str()))
            .cloned()
            .collect()
    }

    /// Record a successful update. Commits already present are skipped.
    pub fn update_issue_tracking(&mut self, issue: &str, last_commit: &str, commits: &[String]) {
        let tracking = self.issues.entry(issue.to_string()).or_default();
        tracking.last_merged_commit = last_commit.to_string();

        let mut seen: HashSet<String> = tracking.merged_commits.iter().cloned().collect();
        for commit in commits {
            if seen.insert(commit.clone()) {
                tracking.merged_commits.push(commit.clone());
            }
        }
    }
}
