//! `[output]` section: terminal presentation switches

use serde::{Deserialize, Serialize};

/// Both switches default to on; `--no-color` and `--quiet` can only turn them off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    pub color: bool,
    /// Spinner under the streamed script output
    pub spinner: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            spinner: true,
        }
    }
}
