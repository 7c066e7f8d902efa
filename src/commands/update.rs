use anyhow::Result;
use console::style;

use super::Workspace;
use crate::workflow::{short_hash, MergeReport, UpdateOutcome};

pub fn handle_update(workspace: &Workspace, message: &str) -> Result<i32> {
    let outcome = workspace.coordinator().update(message)?;

    match &outcome {
        UpdateOutcome::NothingToMerge => {
            println!("{} No commits to merge", style("⚠").yellow().bold());
        }
        UpdateOutcome::NothingNew => {
            println!(
                "{} No new commits to merge since the last update",
                style("⚠").yellow().bold()
            );
        }
        _ => {}
    }

    if let Some(report) = outcome.report() {
        print_report(report);
    }

    if !outcome.is_success() {
        if let Some(message) = failure_message(&outcome) {
            eprintln!("{} {}", style("✗").red().bold(), style(message).red());
        }
    }

    Ok(outcome.exit_code())
}

fn print_report(report: &MergeReport) {
    let verb = if report.created_target {
        "Created"
    } else {
        "Updated"
    };

    println!(
        "{} {} {} with {} commit(s) from {} (up to {})",
        style("✓").green().bold(),
        verb,
        style(&report.target_branch).cyan(),
        report.merged_commits.len(),
        style(&report.working_branch).cyan(),
        style(short_hash(&report.last_commit)).yellow()
    );
}

/// User-facing text for outcomes that did not fully succeed
fn failure_message(outcome: &UpdateOutcome) -> Option<String> {
    match outcome {
        UpdateOutcome::RolledBack { failed_at, cause } => {
            Some(format!("Failed while {failed_at}: {cause} (changes rolled back)"))
        }
        UpdateOutcome::PartialSuccess { error, .. } => {
            Some(format!("{error} (but merge was successful)"))
        }
        _ => None,
    }
}
