//! Run Download use case.
//!
//! Launches the download-and-extract script in the working directory. No
//! configuration is written first.

use crate::config::ArtifactPaths;
use crate::ports::script_runner::{LogSink, RunRequest, ScriptRunner};
use knobpanel_domain::RunOutcome;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RunDownloadError {
    #[error("Download script not found at {0}")]
    ScriptNotFound(PathBuf),
}

pub struct RunDownloadUseCase {
    runner: Arc<dyn ScriptRunner>,
    paths: ArtifactPaths,
}

impl RunDownloadUseCase {
    pub fn new(runner: Arc<dyn ScriptRunner>, paths: ArtifactPaths) -> Self {
        Self { runner, paths }
    }

    /// Run the script to completion. A missing script is rejected before
    /// anything is spawned.
    pub async fn execute(&self, sink: Arc<dyn LogSink>) -> Result<RunOutcome, RunDownloadError> {
        let script = &self.paths.download_script;
        if !script.is_file() {
            return Err(RunDownloadError::ScriptNotFound(script.clone()));
        }

        info!("Launching {} in {}", script.display(), self.paths.workdir.display());
        let request = RunRequest::new(&self.paths.workdir, script);
        let outcome = self.runner.run(request, sink.clone()).await;
        sink.on_finish(outcome.success, outcome.exit_code, &outcome.message);
        Ok(outcome)
    }
}
