//! Source-text artifact edited through the literal patcher.

use super::backup::backup_once;
use super::patcher::LiteralPatcher;
use super::write_text;
use knobpanel_application::ports::document_store::StoreError;
use knobpanel_application::ports::literal_store::{LiteralStore, PatchReport};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A literal store bound to one source file.
#[derive(Debug, Clone)]
pub struct LiteralSourceStore {
    path: PathBuf,
    patcher: LiteralPatcher,
}

impl LiteralSourceStore {
    pub fn new(path: impl Into<PathBuf>, patcher: LiteralPatcher) -> Self {
        Self {
            path: path.into(),
            patcher,
        }
    }

    fn read_text(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }
}

impl LiteralStore for LiteralSourceStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, f64>, StoreError> {
        Ok(self
            .read_text()?
            .map(|text| self.patcher.extract_all(&text))
            .unwrap_or_default())
    }

    fn write(&self, values: &[(String, f64)]) -> Result<PatchReport, StoreError> {
        let text = self
            .read_text()?
            .filter(|t| !t.is_empty())
            .ok_or_else(|| StoreError::MissingSource {
                path: self.path.clone(),
            })?;

        let mut report = PatchReport::default();
        let mut patched = text;
        for (key, value) in values {
            let (next, replaced) = self.patcher.replace(&patched, key, *value);
            if replaced {
                debug!("Patched {} = {} in {}", key, value, self.path.display());
                report.updated.push(key.clone());
                patched = next;
            } else {
                warn!("Key not found for update in {}: {}", self.path.display(), key);
                report.missing.push(key.clone());
            }
        }

        if report.wrote_file() {
            backup_once(&self.path);
            write_text(&self.path, &patched)?;
        }
        Ok(report)
    }
}
