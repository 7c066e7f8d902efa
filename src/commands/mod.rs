pub mod init;
pub mod review;
pub mod setup;
pub mod status;
pub mod update;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::cli::Commands;
use crate::config::Settings;
use crate::git::GitCli;
use crate::issues::PromptIssueSelector;
use crate::tracking::TrackingStore;
use crate::tui::TerminalReview;
use crate::workflow::MergeCoordinator;

/// Everything a command needs, opened once per invocation
pub struct Workspace {
    pub workdir: PathBuf,
    pub repo: GitCli,
    pub store: TrackingStore,
    pub settings: Settings,
}

impl Workspace {
    /// Open the repository containing `dir`. `.mob/` lives at its top level.
    pub fn open(dir: &Path) -> Result<Self> {
        if !GitCli::new(dir).is_work_tree() {
            bail!("{} is not inside a git work tree", dir.display());
        }

        let workdir = GitCli::new(dir)
            .toplevel()
            .context("failed to locate the repository root")?;
        let settings = Settings::load(&workdir)?;

        Ok(Self {
            repo: GitCli::new(&workdir),
            store: TrackingStore::in_workdir(&workdir),
            settings,
            workdir,
        })
    }

    pub fn coordinator(&self) -> MergeCoordinator<'_, GitCli> {
        MergeCoordinator::new(&self.repo, &self.store, &self.settings)
    }
}

/// Run one command; returns the process exit code
pub fn dispatch(command: &Commands, workspace: &Workspace) -> Result<i32> {
    match command {
        Commands::Init { issue, base_branch } => init::handle_init(
            workspace,
            issue.as_deref(),
            base_branch.as_deref(),
            &PromptIssueSelector,
        ),
        Commands::Update { message } => update::handle_update(workspace, message),
        Commands::Review => review::handle_review(workspace, &TerminalReview),
        Commands::Status => status::handle_status(workspace),
        Commands::Setup => setup::handle_setup(workspace),
    }
}
