use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use super::error::RepositoryError;

/// Runs an external program inside a fixed working directory.
///
/// `run` hands the terminal to the child (interactive or long-running
/// commands), `output` captures stdout for queries.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: String,
    workdir: PathBuf,
}

impl ProcessRunner {
    pub fn new<P: AsRef<Path>>(program: &str, workdir: P) -> Self {
        Self {
            program: program.to_string(),
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run with stdout and stderr connected to the terminal
    pub fn run(&self, args: &[&str]) -> Result<(), RepositoryError> {
        let command_line = self.command_line(args);
        debug!(command = %command_line, workdir = %self.workdir.display(), "Running");

        let status = Command::new(&self.program)
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| RepositoryError::Spawn {
                command: command_line.clone(),
                source,
            })?;

        debug!(command = %command_line, exit_code = status.code().unwrap_or(-1), "Finished");

        if !status.success() {
            return Err(RepositoryError::Failed {
                command: command_line,
                status: status.code(),
                stderr: String::new(),
            });
        }

        Ok(())
    }

    /// Run and return trimmed stdout
    pub fn output(&self, args: &[&str]) -> Result<String, RepositoryError> {
        let command_line = self.command_line(args);
        debug!(command = %command_line, workdir = %self.workdir.display(), "Querying");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| RepositoryError::Spawn {
                command: command_line.clone(),
                source,
            })?;

        debug!(
            command = %command_line,
            exit_code = output.status.code().unwrap_or(-1),
            stdout_len = output.stdout.len(),
            "Finished"
        );

        if !output.status.success() {
            return Err(RepositoryError::Failed {
                command: command_line,
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn command_line(&self, args: &[&str]) -> String {
        let mut line = self.program.clone();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}
