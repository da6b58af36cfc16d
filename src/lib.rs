pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod git;
pub mod logging;
pub mod manifest;
pub mod ui;
pub mod version;

#[cfg(test)]
mod test_utils;

pub use error::{ChartVersionError, Result};
