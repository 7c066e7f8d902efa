#[cfg(test)]
pub mod faulty_repo;

#[cfg(test)]
pub mod repo_extensions;

#[cfg(test)]
pub use faulty_repo::{FaultOp, FaultyRepo};

#[cfg(test)]
pub use repo_extensions::{create_test_repo, create_test_repo_with_remote, TestRepo};
