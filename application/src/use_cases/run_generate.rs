//! Run Generate use case.
//!
//! Writes the configuration, then launches the generation script in the
//! background. Writes complete before the child is spawned, so the script
//! always observes the just-written state. At most one run is active at a
//! time; a second start is rejected.

use crate::config::ArtifactPaths;
use crate::ports::script_runner::{LogSink, RunRequest, ScriptRunner};
use crate::use_cases::write_configs::{WriteConfigsError, WriteConfigsUseCase, WriteSummary};
use knobpanel_domain::{RunKind, RunOutcome, ValueBag};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Environment variable naming the single input file of a `run-one`.
pub const SINGLE_INPUT_FILE_ENV: &str = "SINGLE_INPUT_FILE";

/// Errors that prevent a run from starting.
#[derive(Error, Debug)]
pub enum RunGenerateError {
    #[error("A generation run is already in progress")]
    AlreadyRunning,

    #[error(transparent)]
    Write(#[from] WriteConfigsError),
}

/// Clears the active flag when the run task ends, however it ends.
struct ActiveRunGuard(Arc<AtomicBool>);

impl Drop for ActiveRunGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// A run in flight.
pub struct RunHandle {
    /// What the write step did before launch.
    pub summary: WriteSummary,
    task: JoinHandle<RunOutcome>,
}

impl RunHandle {
    /// Wait for the child to exit.
    pub async fn wait(self) -> RunOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Generation task ended abnormally: {}", e);
                RunOutcome::failed(format!("Generation task ended abnormally: {}", e))
            }
        }
    }
}

/// Use case for launching the generation script.
pub struct RunGenerateUseCase {
    writer: WriteConfigsUseCase,
    runner: Arc<dyn ScriptRunner>,
    paths: ArtifactPaths,
    active: Arc<AtomicBool>,
}

impl RunGenerateUseCase {
    pub fn new(
        writer: WriteConfigsUseCase,
        runner: Arc<dyn ScriptRunner>,
        paths: ArtifactPaths,
    ) -> Self {
        Self {
            writer,
            runner,
            paths,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Write `bag` to every artifact, then spawn the script.
    ///
    /// Must be called from within a tokio runtime. If any write fails the
    /// script is not launched.
    pub fn start(
        &self,
        bag: &ValueBag,
        kind: RunKind,
        sink: Arc<dyn LogSink>,
    ) -> Result<RunHandle, RunGenerateError> {
        if self
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(RunGenerateError::AlreadyRunning);
        }
        let guard = ActiveRunGuard(self.active.clone());

        // Dropping the guard on the error path releases the slot.
        let summary = self.writer.execute(bag)?;

        let mut request = RunRequest::new(&self.paths.workdir, &self.paths.script);
        if let RunKind::SingleFile(file) = &kind {
            request = request.with_env(SINGLE_INPUT_FILE_ENV, file.to_string_lossy());
        }

        info!(
            "Launching {} in {}",
            self.paths.script_name(),
            self.paths.workdir.display()
        );

        let runner = self.runner.clone();
        let task = tokio::spawn(async move {
            let _guard = guard;
            let outcome = runner.run(request, sink.clone()).await;
            sink.on_finish(outcome.success, outcome.exit_code, &outcome.message);
            outcome
        });

        Ok(RunHandle { summary, task })
    }

    /// Start a run and wait for it.
    pub async fn execute(
        &self,
        bag: &ValueBag,
        kind: RunKind,
        sink: Arc<dyn LogSink>,
    ) -> Result<RunOutcome, RunGenerateError> {
        Ok(self.start(bag, kind, sink)?.wait().await)
    }
}
