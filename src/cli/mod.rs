//! Command-line surface: argument definitions and the run workflow

pub mod orchestration;

use clap::Parser;
use std::path::PathBuf;

pub use orchestration::{RunArgs, RunOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "chart-version",
    version,
    about = "Set a chart's version from the commit count of the repositories around it"
)]
pub struct Args {
    #[arg(value_name = "CHART_FILE", help = "Manifest file whose 'version:' line is rewritten")]
    pub chart_file: PathBuf,

    #[arg(short, long, value_name = "FILE", help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'C',
        long,
        value_name = "DIR",
        default_value = ".",
        help = "Directory scanned for repositories"
    )]
    pub directory: PathBuf,

    #[arg(long, help = "Print the derived version without changing the chart file")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

impl Args {
    pub fn run_args(&self) -> RunArgs {
        RunArgs {
            chart_file: self.chart_file.clone(),
            root: self.directory.clone(),
            dry_run: self.dry_run,
        }
    }
}
