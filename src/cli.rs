use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mob")]
#[command(about = "Incremental squash merges from wip/<issue> to pr/<issue> branches")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run as if started in DIR
    #[arg(short = 'C', value_name = "DIR", global = true)]
    pub directory: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start working on an issue on a new wip/<issue> branch
    Init {
        /// Issue identifier; prompted for when omitted
        issue: Option<String>,
        /// Check out and pull this branch before forking
        #[arg(short, long)]
        base_branch: Option<String>,
    },
    /// Squash new wip commits into pr/<issue> and push it
    Update {
        /// Message for the squash commit
        #[arg(short, long)]
        message: String,
    },
    /// Review the wip branch against its fork point
    Review,
    /// Show merge progress for the current issue
    Status,
    /// Write default config and checklist files under .mob/
    Setup,
}
