use console::style;

use crate::version::ChartVersion;

/// Dry-run result on stdout
///
/// `console` drops the styling when stdout is not a terminal, so pipelines
/// capture the bare version.
pub fn display_version(version: &ChartVersion) {
    println!("{}", style(version).green().bold());
}
