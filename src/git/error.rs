use thiserror::Error;

/// Failure of a version-control subprocess.
///
/// The exit status is carried as-is; callers only distinguish zero from
/// non-zero.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` {}{}", describe_exit(.status), stderr_suffix(.stderr))]
    Failed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
}

impl RepositoryError {
    /// The command line that failed, e.g. `git checkout pr/42`
    pub fn command(&self) -> &str {
        match self {
            Self::Spawn { command, .. } | Self::Failed { command, .. } => command,
        }
    }
}

fn describe_exit(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}
