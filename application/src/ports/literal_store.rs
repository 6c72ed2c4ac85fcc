//! Literal-source port
//!
//! A literal store edits numeric literals inside a source-text artifact
//! without parsing the enclosing language. Only `"KEY": <number>` sites are
//! read or replaced; everything else in the file is left byte-for-byte intact.

use super::document_store::StoreError;
use std::collections::BTreeMap;
use std::path::Path;

/// Result of patching a batch of keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchReport {
    /// Keys whose literal was replaced, in request order.
    pub updated: Vec<String>,
    /// Keys for which no literal site was found.
    pub missing: Vec<String>,
}

impl PatchReport {
    /// Whether the file was rewritten (at least one replacement happened).
    pub fn wrote_file(&self) -> bool {
        !self.updated.is_empty()
    }
}

/// A literal-patching store bound to one source file.
pub trait LiteralStore: Send + Sync {
    fn path(&self) -> &Path;

    /// Every `"KEY": <number>` pair found in the file. A missing file is empty.
    fn read(&self) -> Result<BTreeMap<String, f64>, StoreError>;

    /// Replace the literal of each key, in order.
    ///
    /// Missing keys are collected in the report and never abort the batch.
    /// The file is written (after the one-time backup) only if at least one
    /// replacement happened. A missing or empty file is an error.
    fn write(&self, values: &[(String, f64)]) -> Result<PatchReport, StoreError>;
}
