use std::fmt::Display;

use tracing::{debug, info, warn};

use super::outcome::{MergeReport, UpdateOutcome, UpdateState};
use super::{short_hash, MergeCoordinator, WorkingIssue};
use crate::error::MobError;
use crate::git::Repository;
use crate::tracking::TrackingDocument;

/// Everything the mutating phase needs, gathered before anything changes
struct UpdatePlan<'m> {
    working: WorkingIssue,
    message: &'m str,
    /// Working-branch commits past the fork point, newest first
    all_commits: Vec<String>,
    unmerged: Vec<String>,
    /// Pre-update tip of the target branch, if it existed
    checkpoint: Option<String>,
}

impl<'a, R: Repository + ?Sized> MergeCoordinator<'a, R> {
    /// Fold the unmerged commits of the current `wip` branch into its `pr`
    /// branch as one squash commit, then push.
    ///
    /// Usage problems and failures while gathering return `Err` with nothing
    /// mutated. Failures after that are reported through the outcome.
    pub fn update(&self, message: &str) -> Result<UpdateOutcome, MobError> {
        if message.trim().is_empty() {
            return Err(MobError::usage(
                "a commit message is required for the squash commit (use -m)",
            ));
        }

        let (working, mut document) = self.resolve()?;

        let all_commits = self
            .repo
            .commits_between(&working.fork_point, &working.wip_branch)?;
        if all_commits.is_empty() {
            info!(issue = %working.issue, "No commits to merge");
            return Ok(UpdateOutcome::NothingToMerge);
        }

        let unmerged = document.unmerged_commits(&working.issue, &all_commits);
        if unmerged.is_empty() {
            info!(issue = %working.issue, "No new commits to merge");
            return Ok(UpdateOutcome::NothingNew);
        }

        info!(
            issue = %working.issue,
            new = unmerged.len(),
            total = all_commits.len(),
            "Found commits to merge"
        );

        let checkpoint = if self.repo.branch_exists(&working.pr_branch) {
            Some(self.repo.commit_hash(&working.pr_branch)?)
        } else {
            None
        };

        let plan = UpdatePlan {
            working,
            message,
            all_commits,
            unmerged,
            checkpoint,
        };

        let snapshot = document.clone();
        let mut reached = UpdateState::DeltaComputed;

        if let Err(cause) = self.apply(&plan, &mut document, &mut reached) {
            let failed_at = reached.next();
            warn!(step = %failed_at, error = %cause, "Update failed, rolling back");
            self.rollback(&plan, reached, &snapshot);
            return Ok(UpdateOutcome::RolledBack { failed_at, cause });
        }

        let report = MergeReport {
            issue: plan.working.issue.clone(),
            working_branch: plan.working.wip_branch.clone(),
            target_branch: plan.working.pr_branch.clone(),
            merged_commits: plan.unmerged.clone(),
            last_commit: plan.all_commits[0].clone(),
            created_target: plan.checkpoint.is_none(),
        };

        match self.repo.checkout(&plan.working.wip_branch) {
            Ok(()) => {
                advance(&mut reached, UpdateState::Done);
                Ok(UpdateOutcome::Merged(report))
            }
            Err(error) => {
                warn!(
                    command = error.command(),
                    "Merge pushed but could not return to the wip branch"
                );
                Ok(UpdateOutcome::PartialSuccess { report, error })
            }
        }
    }

    fn apply(
        &self,
        plan: &UpdatePlan<'_>,
        document: &mut TrackingDocument,
        reached: &mut UpdateState,
    ) -> Result<(), MobError> {
        let working = &plan.working;

        if plan.checkpoint.is_some() {
            self.repo.checkout(&working.pr_branch)?;
        } else {
            // New target branches start at the fork point, not the wip tip
            self.repo.checkout(&working.fork_point)?;
            self.repo.checkout_new_branch(&working.pr_branch)?;
        }
        advance(reached, UpdateState::BranchSelected);

        self.repo
            .merge_squash(&working.wip_branch, self.settings.conflict)?;
        advance(reached, UpdateState::Merged);

        self.repo.commit(plan.message)?;
        advance(reached, UpdateState::Committed);

        document.update_issue_tracking(&working.issue, &plan.all_commits[0], &plan.unmerged);
        self.store.save(document)?;
        advance(reached, UpdateState::TrackingPersisted);

        self.repo
            .push_set_upstream(&self.settings.remote, &working.pr_branch)?;
        advance(reached, UpdateState::Pushed);

        Ok(())
    }

    /// Restore the pre-update state. Every step is best effort: a failing
    /// step means there was nothing left to undo there.
    ///
    /// Only the target branch is ever reset. The working branch is never
    /// moved, so a failed checkout cannot turn a reset onto `wip`.
    fn rollback(&self, plan: &UpdatePlan<'_>, reached: UpdateState, snapshot: &TrackingDocument) {
        let working = &plan.working;
        info!(issue = %working.issue, reached = ?reached, "Rolling back changes");

        // Squash merges leave no MERGE_HEAD, so this usually has nothing to do
        best_effort("abort merge", self.repo.abort_merge());

        if self.on_branch(&working.pr_branch) {
            // Drop staged squash results left on the target
            best_effort("discard squash", self.repo.reset_hard("HEAD"));
        }

        best_effort("return to wip", self.repo.checkout(&working.wip_branch));
        let on_target = self.on_branch(&working.pr_branch);

        match &plan.checkpoint {
            Some(commit) => {
                debug!(branch = %working.pr_branch, commit = short_hash(commit), "Restoring target branch");
                if on_target {
                    best_effort("reset target", self.repo.reset_hard(commit));
                } else {
                    best_effort(
                        "reset target",
                        self.repo.force_branch(&working.pr_branch, commit),
                    );
                }
            }
            None if reached >= UpdateState::BranchSelected && !on_target => {
                best_effort(
                    "delete new target",
                    self.repo.delete_branch(&working.pr_branch),
                );
            }
            None => {}
        }

        // A failed save may have left a partial file behind
        if reached >= UpdateState::Committed {
            best_effort("restore tracking", self.store.save(snapshot));
        }
    }

    fn on_branch(&self, branch: &str) -> bool {
        matches!(self.repo.current_branch(), Ok(current) if current == branch)
    }
}

fn advance(reached: &mut UpdateState, to: UpdateState) {
    debug!(from = ?*reached, to = ?to, "Update step complete");
    *reached = to;
}

fn best_effort<E: Display>(step: &str, result: Result<(), E>) {
    if let Err(e) = result {
        debug!(step, error = %e, "Ignoring rollback step failure");
    }
}
