//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod load_settings;
pub mod presets;
pub mod run_download;
pub mod run_generate;
pub mod shared;
pub mod write_configs;
