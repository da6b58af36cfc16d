use crate::error::{ChartVersionError, Result};
use crate::git::CommitCounter;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock counter for testing without actual git operations
///
/// Paths without a configured count fail the same way an unreadable
/// repository would.
pub struct MockCounter {
    counts: HashMap<PathBuf, u64>,
    failures: HashMap<PathBuf, String>,
}

impl MockCounter {
    /// Create a new empty mock counter
    pub fn new() -> Self {
        MockCounter {
            counts: HashMap::new(),
            failures: HashMap::new(),
        }
    }

    /// Report `count` commits for `path`
    pub fn set_count(&mut self, path: impl Into<PathBuf>, count: u64) {
        self.counts.insert(path.into(), count);
    }

    /// Fail with `message` for `path`
    pub fn set_failure(&mut self, path: impl Into<PathBuf>, message: impl Into<String>) {
        self.failures.insert(path.into(), message.into());
    }
}

impl Default for MockCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitCounter for MockCounter {
    fn count_commits(&self, path: &Path) -> Result<u64> {
        if let Some(message) = self.failures.get(path) {
            return Err(ChartVersionError::count(path, message));
        }

        self.counts
            .get(path)
            .copied()
            .ok_or_else(|| ChartVersionError::count(path, "not a git repository"))
    }
}
