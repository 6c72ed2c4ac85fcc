//! Application layer for knobpanel
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ArtifactPaths;
pub use ports::{
    document_store::{DocumentStore, StoreError},
    literal_store::{LiteralStore, PatchReport},
    script_runner::{LogSink, NoLogSink, OutputStream, RunRequest, ScriptRunner},
};
pub use use_cases::load_settings::{LoadReport, LoadSettingsUseCase};
pub use use_cases::presets::{PresetError, PresetsUseCase};
pub use use_cases::run_download::{RunDownloadError, RunDownloadUseCase};
pub use use_cases::run_generate::{
    RunGenerateError, RunGenerateUseCase, RunHandle, SINGLE_INPUT_FILE_ENV,
};
pub use use_cases::shared::ArtifactStores;
pub use use_cases::write_configs::{
    ArtifactReport, WriteConfigsError, WriteConfigsUseCase, WriteSummary,
};
