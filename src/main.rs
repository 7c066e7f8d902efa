mod cli;
mod commands;
mod config;
mod error;
mod git;
mod issues;
mod logging;
mod tracking;
mod tui;
mod workflow;

#[cfg(test)]
mod test_utils;

use std::path::PathBuf;

use clap::Parser;
use cli::Cli;
use commands::Workspace;
use console::style;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let dir = cli.directory.clone().unwrap_or_else(|| PathBuf::from("."));
    let result =
        Workspace::open(&dir).and_then(|workspace| commands::dispatch(&cli.command, &workspace));

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    }
}
