use crate::error::{ChartVersionError, Result};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Runs external programs and captures their standard output
///
/// Every subprocess the tool starts (the git CLI, sed) goes through this
/// trait so that tests can substitute canned results.
pub trait CommandExecutor {
    /// Run `program` with `args`, optionally inside `dir`
    ///
    /// # Returns
    /// * `Ok(String)` - Captured stdout (lossy UTF-8) if the program exits with code 0
    /// * `Err` - If the program cannot be launched or exits non-zero
    fn run(&self, program: &str, args: &[&str], dir: Option<&Path>) -> Result<String>;
}

/// Executes commands as real child processes, blocking until they exit
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn run(&self, program: &str, args: &[&str], dir: Option<&Path>) -> Result<String> {
        debug!(program, ?args, ?dir, "running command");

        let mut cmd = Command::new(program);
        cmd.args(args);

        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| {
            ChartVersionError::command(format!("Failed to execute {}: {}", program, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ChartVersionError::command(format!(
                "{} failed with exit code {}: {}",
                program,
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Executor returning scripted results, recording each invocation
#[derive(Debug, Default)]
pub struct MockExecutor {
    responses: RefCell<VecDeque<std::result::Result<String, String>>>,
    calls: RefCell<Vec<RecordedCall>>,
}

/// A single invocation captured by [MockExecutor]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub dir: Option<PathBuf>,
}

impl MockExecutor {
    /// Create a mock with no scripted responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful run printing `stdout`
    pub fn push_output(&self, stdout: impl Into<String>) {
        self.responses.borrow_mut().push_back(Ok(stdout.into()));
    }

    /// Queue a failed run
    pub fn push_failure(&self, message: impl Into<String>) {
        self.responses.borrow_mut().push_back(Err(message.into()));
    }

    /// All invocations seen so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }
}

impl CommandExecutor for MockExecutor {
    fn run(&self, program: &str, args: &[&str], dir: Option<&Path>) -> Result<String> {
        self.calls.borrow_mut().push(RecordedCall {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            dir: dir.map(Path::to_path_buf),
        });

        match self.responses.borrow_mut().pop_front() {
            Some(Ok(stdout)) => Ok(stdout),
            Some(Err(message)) => Err(ChartVersionError::command(message)),
            None => Err(ChartVersionError::command(format!(
                "no scripted response for {}",
                program
            ))),
        }
    }
}
