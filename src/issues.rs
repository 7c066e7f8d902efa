use anyhow::Result;
use inquire::validator::Validation;
use inquire::Text;

use crate::workflow::normalize_issue;

/// Source of the issue identifier when `mob init` is run without one
pub trait IssueSelector {
    fn select(&self) -> Result<String>;
}

/// Asks for the issue on the terminal
pub struct PromptIssueSelector;

impl IssueSelector for PromptIssueSelector {
    fn select(&self) -> Result<String> {
        let answer = Text::new("Issue to work on:")
            .with_help_message("e.g. 42 or fix login redirect")
            .with_validator(|input: &str| {
                if input.trim().is_empty() {
                    Ok(Validation::Invalid("issue must not be empty".into()))
                } else {
                    Ok(Validation::Valid)
                }
            })
            .prompt()?;

        Ok(normalize_issue(&answer))
    }
}
