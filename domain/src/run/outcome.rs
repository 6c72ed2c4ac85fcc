//! Outcome of a generation-script run.

use std::path::PathBuf;

/// Exit code reported when the child process could not be started or
/// terminated without one (e.g. killed by a signal).
pub const SPAWN_FAILURE_EXIT_CODE: i32 = -1;

/// What to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunKind {
    /// Process the whole configured input folder.
    Full,
    /// Process a single input file (exported to the child as `SINGLE_INPUT_FILE`).
    SingleFile(PathBuf),
}

/// Final status of a run. Success is exit code zero, nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub success: bool,
    pub exit_code: i32,
    pub message: String,
}

impl RunOutcome {
    /// Outcome for a process that exited with `exit_code`.
    pub fn from_exit_code(script: &str, exit_code: i32) -> Self {
        let success = exit_code == 0;
        let message = if success {
            format!("{} finished successfully", script)
        } else {
            format!("{} exited with code {}", script, exit_code)
        };
        Self {
            success,
            exit_code,
            message,
        }
    }

    /// Outcome for a process that could not be run at all.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code: SPAWN_FAILURE_EXIT_CODE,
            message: message.into(),
        }
    }
}
