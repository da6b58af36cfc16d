use crate::error::{ChartVersionError, Result};
use crate::git::CommitCounter;
use git2::Repository as Git2Repo;
use std::path::Path;

/// Counts commits in-process with libgit2
#[derive(Debug, Default, Clone, Copy)]
pub struct Git2Counter;

impl Git2Counter {
    pub fn new() -> Self {
        Git2Counter
    }

    fn walk(path: &Path) -> std::result::Result<u64, git2::Error> {
        // discover() climbs parent directories, the same lookup the git CLI does
        let repo = Git2Repo::discover(path)?;

        let mut revwalk = repo.revwalk()?;
        revwalk.push_head()?;

        let mut count = 0u64;
        for oid_result in revwalk {
            oid_result?;
            count += 1;
        }

        Ok(count)
    }
}

impl CommitCounter for Git2Counter {
    fn count_commits(&self, path: &Path) -> Result<u64> {
        Self::walk(path).map_err(|e| ChartVersionError::count(path, e.message()))
    }
}
