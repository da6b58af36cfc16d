//! Main workflow orchestration logic
//!
//! Discover → count → derive → patch, kept apart from argument parsing so the
//! whole run can be driven programmatically with substituted collaborators.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::{Config, CountBackend, GitConfig, ManifestConfig, PatcherKind};
use crate::discovery::discover_repositories;
use crate::error::Result;
use crate::executor::SystemExecutor;
use crate::git::{CommitCounter, Git2Counter, GitCliCounter};
use crate::manifest::{InPlacePatcher, ManifestPatcher, SedPatcher};
use crate::version::ChartVersion;

/// Arguments for a versioning run
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq)]
pub struct RunArgs {
    /// Manifest whose version declaration is rewritten
    pub chart_file: PathBuf,

    /// Directory scanned for repositories
    pub root: PathBuf,

    /// Derive the version without touching the manifest
    pub dry_run: bool,
}

impl RunArgs {
    pub fn new(chart_file: impl Into<PathBuf>) -> Self {
        RunArgs {
            chart_file: chart_file.into(),
            root: PathBuf::from("."),
            dry_run: false,
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// Repositories that were queried, root first
    pub repositories: Vec<PathBuf>,

    /// Sum of every successfully counted repository
    pub commit_count: u64,

    /// Version derived from `commit_count`
    pub version: ChartVersion,

    /// Whether the manifest was handed to the patcher
    pub patched: bool,
}

/// Sums commit counts over `repositories`
///
/// A repository that cannot be counted is logged and contributes nothing;
/// the remaining repositories are still counted.
pub fn aggregate_commit_counts<C: CommitCounter + ?Sized>(
    repositories: &[PathBuf],
    counter: &C,
) -> u64 {
    let mut total = 0u64;

    for path in repositories {
        match counter.count_commits(path) {
            Ok(count) => total = total.saturating_add(count),
            Err(e) => warn!("{}", e),
        }
    }

    total
}

/// Main versioning workflow
///
/// # Returns
///
/// * `Ok(RunOutcome)` - even when every repository failed to count
/// * `Err` - if the root cannot be listed or the manifest cannot be patched
pub fn run(
    args: &RunArgs,
    config: &Config,
    counter: &dyn CommitCounter,
    patcher: &dyn ManifestPatcher,
) -> Result<RunOutcome> {
    let repositories = discover_repositories(&args.root, &config.marker)?;

    let commit_count = aggregate_commit_counts(&repositories, counter);
    let version = ChartVersion::from_commit_count(commit_count);
    info!("Total commit count: {}", commit_count);
    info!("Semantic version: {}", version);

    if args.dry_run {
        info!("Dry run, not updating {}", args.chart_file.display());
    } else {
        patcher.patch(&args.chart_file, &version.to_string())?;
        info!("Updated {}", args.chart_file.display());
    }

    Ok(RunOutcome {
        repositories,
        commit_count,
        version,
        patched: !args.dry_run,
    })
}

/// Counter selected by the `[git]` configuration section
pub fn build_counter(config: &GitConfig) -> Box<dyn CommitCounter> {
    match config.backend {
        CountBackend::Cli => Box::new(GitCliCounter::new(config.binary.clone(), SystemExecutor)),
        CountBackend::Libgit2 => Box::new(Git2Counter::new()),
    }
}

/// Patcher selected by the `[manifest]` configuration section
pub fn build_patcher(config: &ManifestConfig) -> Result<Box<dyn ManifestPatcher>> {
    Ok(match config.patcher {
        PatcherKind::Inplace => Box::new(InPlacePatcher::new(&config.field)?),
        PatcherKind::Sed => Box::new(SedPatcher::new(
            config.field.clone(),
            config.sed_binary.clone(),
            SystemExecutor,
        )),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartVersionError;
    use crate::git::MockCounter;
    use crate::test_utils::with_logs;
    use std::cell::RefCell;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Records every version it is asked to write instead of touching disk.
    #[derive(Default)]
    struct RecordingPatcher {
        seen: RefCell<Vec<(PathBuf, String)>>,
        fail: bool,
    }

    impl ManifestPatcher for RecordingPatcher {
        fn patch(&self, manifest: &Path, version: &str) -> Result<()> {
            if self.fail {
                return Err(ChartVersionError::patch(manifest, "read-only file system"));
            }
            self.seen
                .borrow_mut()
                .push((manifest.to_path_buf(), version.to_string()));
            Ok(())
        }
    }

    fn workspace(children: &[(&str, bool)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, is_repo) in children {
            let child = dir.path().join(name);
            fs::create_dir(&child).unwrap();
            if *is_repo {
                fs::create_dir(child.join(".git")).unwrap();
            }
        }
        dir
    }

    fn args_for(dir: &TempDir) -> RunArgs {
        RunArgs {
            chart_file: dir.path().join("Chart.yaml"),
            root: dir.path().to_path_buf(),
            dry_run: false,
        }
    }

    #[test]
    fn test_aggregate_sums_successes() {
        let mut counter = MockCounter::new();
        counter.set_count(".", 20);
        counter.set_count("api", 7);
        counter.set_count("web", 20);

        let repos: Vec<PathBuf> = [".", "api", "web"].iter().map(PathBuf::from).collect();
        assert_eq!(aggregate_commit_counts(&repos, &counter), 47);
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let mut counter = MockCounter::new();
        counter.set_count("a", 3);
        counter.set_count("b", 50);
        counter.set_count("c", 900);

        let forward: Vec<PathBuf> = ["a", "b", "c"].iter().map(PathBuf::from).collect();
        let mut backward = forward.clone();
        backward.reverse();

        assert_eq!(
            aggregate_commit_counts(&forward, &counter),
            aggregate_commit_counts(&backward, &counter)
        );
    }

    #[test]
    fn test_failed_repository_contributes_zero() {
        let mut counter = MockCounter::new();
        counter.set_count("a", 10);
        counter.set_failure("b", "exit status: 128");
        counter.set_count("c", 5);

        let repos: Vec<PathBuf> = ["a", "b", "c"].iter().map(PathBuf::from).collect();
        let (total, logs) = with_logs(|| aggregate_commit_counts(&repos, &counter));

        assert_eq!(total, 15);
        assert!(logs.contains("Cannot get commit count for git repo in b"));
    }

    #[test]
    fn test_run_patches_derived_version() {
        let dir = workspace(&[("api", true), ("docs", false)]);
        let mut counter = MockCounter::new();
        counter.set_count(dir.path(), 40);
        counter.set_count(dir.path().join("api"), 7);
        let patcher = RecordingPatcher::default();

        let (outcome, logs) =
            with_logs(|| run(&args_for(&dir), &Config::default(), &counter, &patcher));
        let outcome = outcome.unwrap();

        assert_eq!(outcome.repositories.len(), 2);
        assert_eq!(outcome.commit_count, 47);
        assert_eq!(outcome.version, ChartVersion::new(0, 4, 7));
        assert!(outcome.patched);
        assert_eq!(
            patcher.seen.borrow().as_slice(),
            &[(dir.path().join("Chart.yaml"), "0.4.7".to_string())]
        );

        assert!(logs.contains(&format!("Found path {}", dir.path().display())));
        assert!(logs.contains(&format!(
            "Found path {}",
            dir.path().join("api").display()
        )));
        assert!(logs.contains("Total commit count: 47"));
        assert!(logs.contains("Semantic version: 0.4.7"));
    }

    #[test]
    fn test_run_with_every_count_failing_still_patches() {
        let dir = workspace(&[("api", true)]);
        let counter = MockCounter::new();
        let patcher = RecordingPatcher::default();

        let outcome = run(&args_for(&dir), &Config::default(), &counter, &patcher).unwrap();

        assert_eq!(outcome.commit_count, 0);
        assert_eq!(patcher.seen.borrow()[0].1, "0.0.0");
    }

    #[test]
    fn test_run_dry_run_skips_patcher() {
        let dir = workspace(&[]);
        let mut counter = MockCounter::new();
        counter.set_count(dir.path(), 100);
        let patcher = RecordingPatcher::default();
        let args = RunArgs {
            dry_run: true,
            ..args_for(&dir)
        };

        let outcome = run(&args, &Config::default(), &counter, &patcher).unwrap();

        assert_eq!(outcome.version.to_string(), "1.0.0");
        assert!(!outcome.patched);
        assert!(patcher.seen.borrow().is_empty());
    }

    #[test]
    fn test_run_patch_failure_is_fatal() {
        let dir = workspace(&[]);
        let counter = MockCounter::new();
        let patcher = RecordingPatcher {
            fail: true,
            ..Default::default()
        };

        let err = run(&args_for(&dir), &Config::default(), &counter, &patcher).unwrap_err();
        assert!(matches!(err, ChartVersionError::Patch { .. }));
    }

    #[test]
    fn test_run_unreadable_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let counter = MockCounter::new();
        let patcher = RecordingPatcher::default();
        let args = RunArgs {
            root: dir.path().join("missing"),
            ..args_for(&dir)
        };

        let err = run(&args, &Config::default(), &counter, &patcher).unwrap_err();
        assert!(matches!(err, ChartVersionError::Discovery { .. }));
        assert!(patcher.seen.borrow().is_empty());
    }

    #[test]
    fn test_run_honours_configured_marker() {
        let dir = workspace(&[]);
        fs::create_dir_all(dir.path().join("legacy/.hg")).unwrap();
        let mut counter = MockCounter::new();
        counter.set_count(dir.path().join("legacy"), 3);
        let config = Config {
            marker: ".hg".to_string(),
            ..Config::default()
        };

        let outcome = run(
            &args_for(&dir),
            &config,
            &counter,
            &RecordingPatcher::default(),
        )
        .unwrap();
        assert_eq!(outcome.commit_count, 3);
    }

    #[test]
    fn test_run_args_default_root() {
        let args = RunArgs::new("Chart.yaml");
        assert_eq!(args.root, PathBuf::from("."));
        assert!(!args.dry_run);
    }

    #[test]
    fn test_build_patcher_from_config() {
        assert!(build_patcher(&ManifestConfig::default()).is_ok());

        let sed = ManifestConfig {
            patcher: PatcherKind::Sed,
            ..ManifestConfig::default()
        };
        assert!(build_patcher(&sed).is_ok());
    }
}
