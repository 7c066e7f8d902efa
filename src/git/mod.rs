//! Version-control adapter
//!
//! The `git` binary is driven as a subprocess; nothing here talks to the
//! object database directly.
//!
//! - `runner`: spawns processes, streaming or capturing output
//! - `repository`: the [`GitCli`] handle and the [`Repository`] seam
//! - `branches`: checkout, branch creation and lookup
//! - `commits`: hashes, commit ranges, commits, resets and diffs
//! - `merge`: squash merges and merge aborts
//! - `remotes`: push and pull

pub mod branches;
pub mod commits;
pub mod error;
pub mod merge;
pub mod remotes;
pub mod repository;
pub mod runner;

pub use error::RepositoryError;
pub use merge::operations::ConflictPolicy;
pub use repository::core::GitCli;
pub use repository::Repository;
