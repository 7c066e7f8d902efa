use anyhow::Result;
use console::{style, StyledObject};
use inquire::MultiSelect;

use crate::config::Checklist;

/// What a reviewer is shown for one issue
#[derive(Debug, Clone, Copy)]
pub struct ReviewInput<'a> {
    pub issue: &'a str,
    pub diff: &'a str,
    pub diff_stat: &'a str,
    pub checklist: &'a Checklist,
}

/// Presents a diff and checklist; returns whether the review is complete
pub trait ReviewSurface {
    fn review(&self, input: ReviewInput<'_>) -> Result<bool>;
}

/// Prints the diff to the terminal and asks for the checklist interactively
pub struct TerminalReview;

impl ReviewSurface for TerminalReview {
    fn review(&self, input: ReviewInput<'_>) -> Result<bool> {
        println!(
            "{} Reviewing {}",
            style("🔍").blue().bold(),
            style(input.issue).cyan().bold()
        );
        println!();
        println!("{}", style(input.diff_stat).dim());
        println!();

        for line in input.diff.lines() {
            println!("{}", style_diff_line(line));
        }
        println!();

        if input.checklist.items.is_empty() {
            return Ok(true);
        }

        let options: Vec<String> = input
            .checklist
            .items
            .iter()
            .map(|item| format!("{} ({})", item.description, item.id))
            .collect();
        let total = options.len();

        let checked = MultiSelect::new("Checklist:", options)
            .with_help_message("space to check, enter to finish")
            .prompt()?;

        Ok(is_complete(checked.len(), total))
    }
}

fn is_complete(checked: usize, total: usize) -> bool {
    checked == total
}

fn style_diff_line(line: &str) -> StyledObject<&str> {
    if line.starts_with("+++") || line.starts_with("---") {
        style(line).bold()
    } else if line.starts_with('+') {
        style(line).green()
    } else if line.starts_with('-') {
        style(line).red()
    } else if line.starts_with("@@") {
        style(line).cyan()
    } else if line.starts_with("diff ") {
        style(line).yellow().bold()
    } else {
        style(line)
    }
}
