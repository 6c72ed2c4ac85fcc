//! JSON task descriptor.

use super::backup::backup_once;
use super::write_text;
use knobpanel_application::ports::document_store::{DocumentStore, StoreError};
use knobpanel_domain::ConfigDocument;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A JSON document store bound to one file. Written pretty-printed with a
/// two-space indent, keys in document order.
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    path: PathBuf,
}

impl JsonDocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentStore for JsonDocumentStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<ConfigDocument, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ConfigDocument::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        if text.trim().is_empty() {
            return Ok(ConfigDocument::new());
        }

        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| StoreError::parse(&self.path, e))?;
        if !value.is_object() {
            warn!(
                "{} does not contain an object at the top level; treating as empty",
                self.path.display()
            );
            return Ok(ConfigDocument::new());
        }
        serde_json::from_value(value).map_err(|e| StoreError::parse(&self.path, e))
    }

    fn write(&self, document: &ConfigDocument) -> Result<(), StoreError> {
        let mut text =
            serde_json::to_string_pretty(document).map_err(|e| StoreError::serialize(&self.path, e))?;
        text.push('\n');
        backup_once(&self.path);
        write_text(&self.path, &text)
    }
}
