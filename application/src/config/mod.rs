//! Application configuration
//!
//! Where the artifacts live. The TOML side of this lives in the
//! infrastructure layer, which produces an [`ArtifactPaths`].

mod artifact_paths;

pub use artifact_paths::{
    ArtifactPaths, DEFAULT_ENV_DIR, DEFAULT_PRESETS, DEFAULT_PRIMARY, DEFAULT_SCRIPT,
    DEFAULT_SECONDARY, DEFAULT_SOURCE, DEFAULT_TASK,
};
