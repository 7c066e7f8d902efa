use tracing::{info, warn};

use super::{normalize_issue, short_hash, wip_branch, MergeCoordinator};
use crate::config::ReinitPolicy;
use crate::error::MobError;
use crate::git::Repository;

/// Result of starting work on an issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartReport {
    pub issue: String,
    pub branch: String,
    pub fork_point: String,
    /// Fork point that was recorded before and has now been replaced
    pub replaced: Option<String>,
}

impl<'a, R: Repository + ?Sized> MergeCoordinator<'a, R> {
    /// Create `wip/<issue>` from HEAD (or from a freshly pulled base branch)
    /// and record HEAD as the issue's fork point.
    pub fn start_issue(
        &self,
        issue: &str,
        base_branch: Option<&str>,
    ) -> Result<StartReport, MobError> {
        let issue = normalize_issue(issue);
        if issue.is_empty() {
            return Err(MobError::usage("issue identifier must not be empty"));
        }
        let branch = wip_branch(&issue);

        let mut document = self.store.load()?;
        let previous = document.fork_point(&issue).to_string();
        if !previous.is_empty() && self.settings.reinit == ReinitPolicy::Reject {
            return Err(MobError::usage(format!(
                "issue '{issue}' already has a fork point ({}); set reinit = \"overwrite\" in .mob/config.toml to replace it",
                short_hash(&previous)
            )));
        }

        if let Some(base) = base_branch {
            info!(base, "Updating base branch");
            self.repo.checkout(base)?;
            self.repo.pull()?;
        }

        let fork_point = self.repo.commit_hash("HEAD")?;
        self.repo.checkout_new_branch(&branch)?;

        document.set_fork_point(&issue, &fork_point);
        self.store.save(&document)?;

        let replaced = if previous.is_empty() {
            None
        } else {
            warn!(
                issue = %issue,
                old = short_hash(&previous),
                new = short_hash(&fork_point),
                "Replaced existing fork point"
            );
            Some(previous)
        };

        info!(issue = %issue, branch = %branch, fork_point = short_hash(&fork_point), "Started issue");

        Ok(StartReport {
            issue,
            branch,
            fork_point,
            replaced,
        })
    }
}
