use anyhow::Result;
use console::style;

use super::Workspace;
use crate::issues::IssueSelector;
use crate::workflow::{short_hash, StartReport};

pub fn handle_init(
    workspace: &Workspace,
    issue: Option<&str>,
    base_branch: Option<&str>,
    selector: &dyn IssueSelector,
) -> Result<i32> {
    let issue = match issue {
        Some(issue) => issue.to_string(),
        None => selector.select()?,
    };

    let report = workspace.coordinator().start_issue(&issue, base_branch)?;
    print_report(&report);

    Ok(0)
}

fn print_report(report: &StartReport) {
    if let Some(previous) = &report.replaced {
        println!(
            "{} Replaced fork point {} for issue {}",
            style("⚠").yellow().bold(),
            style(short_hash(previous)).dim(),
            style(&report.issue).cyan()
        );
    }

    println!(
        "{} Created {} from {}",
        style("✓").green().bold(),
        style(&report.branch).cyan(),
        style(short_hash(&report.fork_point)).yellow()
    );
}
