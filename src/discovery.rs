//! Repository discovery in the working directory
//!
//! The scanned root is always a candidate, whether or not it carries the
//! marker itself. Immediate subdirectories are candidates only when they
//! contain an entry named exactly like the marker. Nothing deeper is visited.

use crate::error::{ChartVersionError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Conventional metadata directory name of a git working tree.
pub const DEFAULT_MARKER: &str = ".git";

/// Lists the repositories to count, in directory-listing order
///
/// # Arguments
/// * `root` - Directory to scan; always returned as the first entry
/// * `marker` - Entry name identifying a repository root (e.g. `.git`)
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` - `root` followed by each matching subdirectory
/// * `Err` - If `root` itself cannot be listed
pub fn discover_repositories(root: &Path, marker: &str) -> Result<Vec<PathBuf>> {
    info!("Found path {}", root.display());
    let mut repositories = vec![root.to_path_buf()];

    let entries = fs::read_dir(root).map_err(|source| ChartVersionError::Discovery {
        path: root.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Cannot read entry in {} due to {}", root.display(), e);
                continue;
            }
        };

        let path = entry.path();
        match entry.file_type() {
            Ok(file_type) if file_type.is_dir() => {}
            Ok(_) => continue,
            Err(e) => {
                warn!("Cannot read {} due to {}", path.display(), e);
                continue;
            }
        }

        if contains_marker(&path, marker) {
            info!("Found path {}", path.display());
            repositories.push(path);
        }
    }

    Ok(repositories)
}

/// Whether `dir` has an immediate child named `marker`
///
/// Unreadable directories are logged and treated as not being repositories.
fn contains_marker(dir: &Path, marker: &str) -> bool {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read {} due to {}", dir.display(), e);
            return false;
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_name() == marker)
}
