//! Infrastructure layer for knobpanel
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: file-backed settings stores, the literal
//! patcher, the generation-script runner, and configuration file loading.

pub mod config;
pub mod env_file;
pub mod process;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigLoadError, ConfigLoader, FileConfig, FileOutputConfig};
pub use env_file::{EnvFileError, EnvInstall, install_env};
pub use process::ProcessScriptRunner;
pub use store::{
    JsonDocumentStore, LiteralPatcher, LiteralSourceStore, YamlDocumentStore, artifact_stores,
    presets_store,
};
