//! Commit counting abstraction layer
//!
//! This module provides a trait-based abstraction over "how many commits are
//! reachable from HEAD in this repository", allowing for multiple
//! implementations including the git command-line tool, libgit2, and a mock
//! for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [CommitCounter] trait. The concrete
//! implementations include:
//!
//! - [cli::GitCliCounter]: Runs `git rev-list --count HEAD` as a subprocess
//! - [repository::Git2Counter]: Walks history in-process using the `git2` crate
//! - [mock::MockCounter]: A mock implementation for testing
//!
//! # Usage
//!
//! ```rust
//! # use chart_version::git::{CommitCounter, MockCounter};
//! # use std::path::Path;
//! let mut counter = MockCounter::new();
//! counter.set_count(".", 42);
//! assert_eq!(counter.count_commits(Path::new(".")).unwrap(), 42);
//! ```

pub mod cli;
pub mod mock;
pub mod repository;

pub use cli::GitCliCounter;
pub use mock::MockCounter;
pub use repository::Git2Counter;

use crate::error::Result;
use std::path::Path;

/// Common commit counting trait
///
/// ## Error Handling
///
/// Every failure is reported as [crate::error::ChartVersionError::Count]
/// carrying the repository path, so callers can log it and move on.
pub trait CommitCounter {
    /// Count the commits reachable from the checked-out revision of `path`
    ///
    /// # Arguments
    /// * `path` - Repository working tree (or a directory inside one)
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of reachable commits
    /// * `Err` - If the repository cannot be queried
    fn count_commits(&self, path: &Path) -> Result<u64>;
}
