//! File-backed settings stores
//!
//! - [`YamlDocumentStore`] — primary, secondary and presets documents
//! - [`JsonDocumentStore`] — task descriptor
//! - [`LiteralSourceStore`] — source-text artifact, edited via [`LiteralPatcher`]
//!
//! Every write takes a one-time `.bak` copy of the file first.

pub mod backup;
mod json;
mod literal;
pub mod patcher;
mod yaml;

pub use json::JsonDocumentStore;
pub use literal::LiteralSourceStore;
pub use patcher::{DEFAULT_BLOCK_MARKER, LiteralPatcher, format_number};
pub use yaml::YamlDocumentStore;

use knobpanel_application::ports::document_store::StoreError;
use knobpanel_application::{ArtifactPaths, ArtifactStores};
use std::path::Path;
use std::sync::Arc;

/// Overwrite `path` with `text`, creating parent directories as needed.
pub(crate) fn write_text(path: &Path, text: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    std::fs::write(path, text).map_err(|e| StoreError::io(path, e))
}

/// File-backed stores for every artifact under `paths`.
pub fn artifact_stores(paths: &ArtifactPaths, patcher: LiteralPatcher) -> ArtifactStores {
    ArtifactStores {
        primary: Arc::new(YamlDocumentStore::new(&paths.primary)),
        secondary: Arc::new(YamlDocumentStore::new(&paths.secondary)),
        source: Arc::new(LiteralSourceStore::new(&paths.source, patcher)),
        task: Arc::new(JsonDocumentStore::new(&paths.task)),
    }
}

/// Store for the presets document.
pub fn presets_store(paths: &ArtifactPaths) -> Arc<YamlDocumentStore> {
    Arc::new(YamlDocumentStore::new(&paths.presets))
}
