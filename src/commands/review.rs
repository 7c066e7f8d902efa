use anyhow::Result;
use console::style;
use tracing::warn;

use super::Workspace;
use crate::config::Checklist;
use crate::tui::{ReviewInput, ReviewSurface};

const NO_DIFF_STAT: &str = "Unable to get diff stats";

pub fn handle_review(workspace: &Workspace, surface: &dyn ReviewSurface) -> Result<i32> {
    let coordinator = workspace.coordinator();
    let working = coordinator.working_issue()?;

    let diff = coordinator.diff(&working)?;
    if diff.trim().is_empty() {
        println!("{} No changes to review", style("⚠").yellow().bold());
        return Ok(0);
    }

    let diff_stat = coordinator.diff_stat(&working).unwrap_or_else(|e| {
        warn!(error = %e, "Diff stat failed");
        NO_DIFF_STAT.to_string()
    });
    let checklist = Checklist::load(&workspace.workdir)?;

    let complete = surface.review(ReviewInput {
        issue: &working.issue,
        diff: &diff,
        diff_stat: &diff_stat,
        checklist: &checklist,
    })?;

    if complete {
        println!("{} Review complete", style("✓").green().bold());
    } else {
        println!(
            "{} Review incomplete: not every checklist item was checked",
            style("⚠").yellow().bold()
        );
    }

    Ok(0)
}
