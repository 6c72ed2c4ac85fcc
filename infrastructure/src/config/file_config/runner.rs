//! Generation script runner configuration from TOML (`[runner]` section)

use serde::{Deserialize, Serialize};

/// Raw runner configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRunnerConfig {
    /// Interpreter command, looked up on PATH
    pub interpreter: String,
    /// Arguments placed before the script path
    pub args: Vec<String>,
    /// Value for PYTHONIOENCODING when the caller's environment leaves it unset
    pub io_encoding: String,
}

impl Default for FileRunnerConfig {
    fn default() -> Self {
        Self {
            interpreter: "python".to_string(),
            args: vec!["-u".to_string()],
            io_encoding: "utf-8".to_string(),
        }
    }
}
