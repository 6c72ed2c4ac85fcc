//! Presentation-level configuration

use serde::{Deserialize, Serialize};

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Show a spinner while the generation script runs
    pub spinner: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            spinner: true,
        }
    }
}

impl OutputConfig {
    /// Apply the `--quiet` / `--no-color` flags on top of the file settings.
    pub fn with_flags(self, quiet: bool, no_color: bool) -> Self {
        Self {
            color: self.color && !no_color,
            spinner: self.spinner && !quiet,
        }
    }
}
