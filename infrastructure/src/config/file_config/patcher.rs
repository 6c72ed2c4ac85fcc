//! Literal patcher configuration from TOML (`[patcher]` section)

use crate::store::{DEFAULT_BLOCK_MARKER, LiteralPatcher};
use serde::{Deserialize, Serialize};

/// Raw patcher configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePatcherConfig {
    /// Name introducing the configuration block in the source artifact
    pub block_marker: String,
}

impl Default for FilePatcherConfig {
    fn default() -> Self {
        Self {
            block_marker: DEFAULT_BLOCK_MARKER.to_string(),
        }
    }
}

impl FilePatcherConfig {
    pub fn to_patcher(&self) -> Result<LiteralPatcher, regex::Error> {
        LiteralPatcher::new(&self.block_marker)
    }
}
