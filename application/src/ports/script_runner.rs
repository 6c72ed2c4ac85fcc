//! Script-runner port
//!
//! Defines how the generation script is launched and how its output is
//! surfaced while it runs.

use async_trait::async_trait;
use knobpanel_domain::RunOutcome;
use std::path::PathBuf;
use std::sync::Arc;

/// Which child stream a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Receives child-process output line by line as it arrives.
///
/// Implementations live in the presentation layer (console, spinner, ...).
pub trait LogSink: Send + Sync {
    /// Called once, right before the child is spawned.
    fn on_start(&self, _command: &str) {}

    /// Called for every line of output, without the trailing newline.
    fn on_line(&self, stream: OutputStream, line: &str);

    /// Called once with the final outcome.
    fn on_finish(&self, _success: bool, _exit_code: i32, _message: &str) {}
}

/// Discards all output.
pub struct NoLogSink;

impl LogSink for NoLogSink {
    fn on_line(&self, _stream: OutputStream, _line: &str) {}
}

/// Everything needed to launch one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// Working directory of the child.
    pub workdir: PathBuf,
    /// Script to execute.
    pub script: PathBuf,
    /// Extra environment variables on top of the inherited environment.
    pub env: Vec<(String, String)>,
}

impl RunRequest {
    pub fn new(workdir: impl Into<PathBuf>, script: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            script: script.into(),
            env: Vec::new(),
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

/// Launches the generation script.
///
/// `run` never fails: spawn errors are reported as a failed [`RunOutcome`]
/// with the sentinel exit code.
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    async fn run(&self, request: RunRequest, sink: Arc<dyn LogSink>) -> RunOutcome;
}
