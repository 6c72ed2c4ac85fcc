//! Shared wiring for use cases.
//!
//! Contains the bundle of artifact stores used by both the load and the
//! write path, plus in-memory port fakes for tests.

use crate::ports::document_store::DocumentStore;
use crate::ports::literal_store::LiteralStore;
use std::sync::Arc;

/// The four settings artifacts the panel synchronizes.
#[derive(Clone)]
pub struct ArtifactStores {
    /// Primary settings document (YAML).
    pub primary: Arc<dyn DocumentStore>,
    /// Secondary settings document (YAML).
    pub secondary: Arc<dyn DocumentStore>,
    /// Source-text artifact (literal patching).
    pub source: Arc<dyn LiteralStore>,
    /// JSON task descriptor.
    pub task: Arc<dyn DocumentStore>,
}
