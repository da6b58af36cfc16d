use anyhow::Result;
use clap::Parser;
use tracing::error;

use chart_version::cli::{orchestration, Args};
use chart_version::{config, logging, ui};

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let counter = orchestration::build_counter(&config.git);
    let patcher = match orchestration::build_patcher(&config.manifest) {
        Ok(patcher) => patcher,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let run_args = args.run_args();
    match orchestration::run(&run_args, &config, counter.as_ref(), patcher.as_ref()) {
        Ok(outcome) => {
            if run_args.dry_run {
                ui::display_version(&outcome.version);
            }
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
