use crate::error::{ChartVersionError, Result};
use crate::executor::CommandExecutor;
use crate::git::CommitCounter;
use std::path::Path;

/// Counts commits by shelling out to the git command-line tool
pub struct GitCliCounter<E: CommandExecutor> {
    binary: String,
    executor: E,
}

impl<E: CommandExecutor> GitCliCounter<E> {
    /// Create a counter invoking `binary` (usually just `git`) through `executor`
    pub fn new(binary: impl Into<String>, executor: E) -> Self {
        GitCliCounter {
            binary: binary.into(),
            executor,
        }
    }
}

impl<E: CommandExecutor> CommitCounter for GitCliCounter<E> {
    fn count_commits(&self, path: &Path) -> Result<u64> {
        let stdout = self
            .executor
            .run(&self.binary, &["rev-list", "--count", "HEAD"], Some(path))
            .map_err(|e| ChartVersionError::count(path, e))?;

        stdout.trim().parse::<u64>().map_err(|e| {
            ChartVersionError::count(
                path,
                format!("cannot convert '{}' to integer: {}", stdout.trim(), e),
            )
        })
    }
}
