//! Settings-document port
//!
//! A document store reads and writes one structured settings artifact
//! (YAML or JSON) as a whole. Implementations live in the infrastructure
//! layer.

use knobpanel_domain::ConfigDocument;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by settings stores.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize {path}: {message}")]
    Serialize { path: PathBuf, message: String },

    #[error("{path} not found or empty")]
    MissingSource { path: PathBuf },
}

impl StoreError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn parse(path: &Path, message: impl ToString) -> Self {
        StoreError::Parse {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    pub fn serialize(path: &Path, message: impl ToString) -> Self {
        StoreError::Serialize {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}

/// A whole-document settings store bound to one file.
///
/// Contract:
/// - `read` returns an empty document when the file does not exist or its
///   top level is not a mapping; it fails only on I/O or syntax errors.
/// - `write` takes the one-time backup, then overwrites the file with a
///   deterministic serialization of `document`.
pub trait DocumentStore: Send + Sync {
    /// Path of the underlying file.
    fn path(&self) -> &Path;

    fn read(&self) -> Result<ConfigDocument, StoreError>;

    fn write(&self, document: &ConfigDocument) -> Result<(), StoreError>;
}
