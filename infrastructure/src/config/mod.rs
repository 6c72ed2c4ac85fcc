//! Configuration file loading for knobpanel
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `KNOBPANEL_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./knobpanel.toml` or `./.knobpanel.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/knobpanel/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileOutputConfig, FilePatcherConfig, FilePathsConfig, FileRangeConfig,
    FileRunnerConfig,
};
pub use loader::{ConfigLoadError, ConfigLoader};
