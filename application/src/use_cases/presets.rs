//! Presets use case.
//!
//! A preset is a named [`ValueBag`] snapshot stored in the presets document
//! (name → snapshot). Snapshots are saved flat; nested snapshots written by
//! other tools are flattened on load.

use crate::ports::document_store::{DocumentStore, StoreError};
use knobpanel_domain::{ConfigValue, SettingsModel, ValueBag};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised by preset operations.
#[derive(Error, Debug)]
pub enum PresetError {
    #[error("Preset not found: {0}")]
    NotFound(String),

    #[error("Invalid preset name: '{0}'")]
    InvalidName(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Use case for listing, saving and loading presets.
pub struct PresetsUseCase {
    store: Arc<dyn DocumentStore>,
}

impl PresetsUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Preset names, in document order.
    pub fn list(&self) -> Result<Vec<String>, PresetError> {
        let document = self.store.read()?;
        Ok(document
            .iter()
            .filter(|(_, v)| v.is_map())
            .map(|(k, _)| k.clone())
            .collect())
    }

    /// Save `bag` under `name`, replacing any existing preset of that name.
    ///
    /// Other presets are kept in place; a new name is appended.
    pub fn save(&self, name: &str, bag: &ValueBag) -> Result<(), PresetError> {
        let name = validate_name(name)?;
        let mut document = self.store.read()?;
        document.insert(name.to_string(), ConfigValue::Map(bag.to_document()));
        self.store.write(&document)?;
        info!(
            "Saved preset '{}' ({} values) to {}",
            name,
            bag.len(),
            self.store.path().display()
        );
        Ok(())
    }

    /// The snapshot stored under `name`.
    pub fn load(&self, name: &str) -> Result<ValueBag, PresetError> {
        let name = validate_name(name)?;
        let document = self.store.read()?;
        document
            .get(name)
            .and_then(ConfigValue::as_map)
            .map(ValueBag::from_document)
            .ok_or_else(|| PresetError::NotFound(name.to_string()))
    }

    /// Apply the snapshot stored under `name` to `model`.
    ///
    /// Returns the keys the model did not recognize.
    pub fn apply(&self, name: &str, model: &mut SettingsModel) -> Result<Vec<String>, PresetError> {
        let bag = self.load(name)?;
        let ignored = model.apply_bag(&bag);
        if !ignored.is_empty() {
            warn!("Preset '{}': ignored {}", name, ignored.join(", "));
        }
        Ok(ignored)
    }
}

fn validate_name(name: &str) -> Result<&str, PresetError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains('.') {
        return Err(PresetError::InvalidName(name.to_string()));
    }
    Ok(trimmed)
}
