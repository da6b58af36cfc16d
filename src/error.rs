use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for chart-version operations
#[derive(Error, Debug)]
pub enum ChartVersionError {
    #[error("Cannot read directory {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot get commit count for git repo in {}: {message}", .path.display())]
    Count { path: PathBuf, message: String },

    #[error("Cannot set version in {}: {message}", .path.display())]
    Patch { path: PathBuf, message: String },

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results in chart-version
pub type Result<T> = std::result::Result<T, ChartVersionError>;

impl ChartVersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChartVersionError::Config(msg.into())
    }

    /// Create a command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        ChartVersionError::Command(msg.into())
    }

    /// Create a commit count error for a repository path
    pub fn count(path: impl Into<PathBuf>, msg: impl ToString) -> Self {
        ChartVersionError::Count {
            path: path.into(),
            message: msg.to_string(),
        }
    }

    /// Create a manifest patch error for a file path
    pub fn patch(path: impl Into<PathBuf>, msg: impl ToString) -> Self {
        ChartVersionError::Patch {
            path: path.into(),
            message: msg.to_string(),
        }
    }
}
