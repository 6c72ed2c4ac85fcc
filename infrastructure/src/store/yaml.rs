//! YAML settings documents.

use super::backup::backup_once;
use super::write_text;
use knobpanel_application::ports::document_store::{DocumentStore, StoreError};
use knobpanel_domain::ConfigDocument;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A YAML document store bound to one file.
///
/// Keys are written back in the order they were read (new keys appended),
/// never alphabetized.
#[derive(Debug, Clone)]
pub struct YamlDocumentStore {
    path: PathBuf,
}

impl YamlDocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse YAML text into a document.
    ///
    /// An empty text or a top level that is not a mapping yields an empty
    /// document; malformed YAML is a parse error.
    pub fn parse(path: &Path, text: &str) -> Result<ConfigDocument, StoreError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|e| StoreError::parse(path, e))?;
        match value {
            serde_yaml::Value::Null => Ok(ConfigDocument::new()),
            serde_yaml::Value::Mapping(_) => {
                serde_yaml::from_value(value).map_err(|e| StoreError::parse(path, e))
            }
            _ => {
                warn!(
                    "{} does not contain a mapping at the top level; treating as empty",
                    path.display()
                );
                Ok(ConfigDocument::new())
            }
        }
    }
}

impl DocumentStore for YamlDocumentStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<ConfigDocument, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Self::parse(&self.path, &text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigDocument::new()),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    fn write(&self, document: &ConfigDocument) -> Result<(), StoreError> {
        let text = serde_yaml::to_string(document).map_err(|e| StoreError::serialize(&self.path, e))?;
        backup_once(&self.path);
        write_text(&self.path, &text)
    }
}
