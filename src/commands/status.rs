use anyhow::Result;
use console::style;

use super::Workspace;
use crate::workflow::short_hash;

pub fn handle_status(workspace: &Workspace) -> Result<i32> {
    let status = workspace.coordinator().status()?;
    let working = &status.working;

    println!(
        "{} Issue {}",
        style("📋").cyan().bold(),
        style(&working.issue).cyan().bold()
    );
    println!(
        "  {} {}",
        style("Fork point:").dim(),
        style(short_hash(&working.fork_point)).yellow()
    );

    let target = if status.target_exists {
        style(working.pr_branch.as_str()).cyan()
    } else {
        style(working.pr_branch.as_str()).dim()
    };
    println!(
        "  {} {}{}",
        style("Target:").dim(),
        target,
        if status.target_exists {
            ""
        } else {
            " (not created yet)"
        }
    );

    let last = &status.tracking.last_merged_commit;
    if last.is_empty() {
        println!("  {} {}", style("Last merged:").dim(), style("never").dim());
    } else {
        println!(
            "  {} {} ({} commit(s) merged)",
            style("Last merged:").dim(),
            style(short_hash(last)).yellow(),
            status.tracking.merged_commits.len()
        );
    }

    if status.unmerged.is_empty() {
        println!(
            "{} Up to date ({} commit(s) on {})",
            style("✓").green().bold(),
            status.total_commits,
            style(&working.wip_branch).cyan()
        );
    } else {
        println!(
            "{} {} of {} commit(s) not merged yet",
            style("⚠").yellow().bold(),
            status.unmerged.len(),
            status.total_commits
        );
    }

    Ok(0)
}
