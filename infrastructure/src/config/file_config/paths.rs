//! Artifact locations from TOML (`[paths]` section)

use knobpanel_application::ArtifactPaths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Raw artifact path overrides. Relative paths are resolved against the
/// working directory; unset paths use the default layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePathsConfig {
    pub primary: Option<PathBuf>,
    pub secondary: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub task: Option<PathBuf>,
    pub presets: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub download_script: Option<PathBuf>,
    pub env_dir: Option<PathBuf>,
}

impl FilePathsConfig {
    /// Named entries, for validation and display.
    pub fn entries(&self) -> [(&'static str, Option<&Path>); 8] {
        [
            ("paths.primary", self.primary.as_deref()),
            ("paths.secondary", self.secondary.as_deref()),
            ("paths.source", self.source.as_deref()),
            ("paths.task", self.task.as_deref()),
            ("paths.presets", self.presets.as_deref()),
            ("paths.script", self.script.as_deref()),
            ("paths.download_script", self.download_script.as_deref()),
            ("paths.env_dir", self.env_dir.as_deref()),
        ]
    }

    /// Default layout under `workdir` with these overrides applied.
    pub fn resolve(&self, workdir: &Path) -> ArtifactPaths {
        let mut paths = ArtifactPaths::under(workdir);
        let slots = [
            (&mut paths.primary, &self.primary),
            (&mut paths.secondary, &self.secondary),
            (&mut paths.source, &self.source),
            (&mut paths.task, &self.task),
            (&mut paths.presets, &self.presets),
            (&mut paths.script, &self.script),
            (&mut paths.download_script, &self.download_script),
            (&mut paths.env_dir, &self.env_dir),
        ];
        for (slot, value) in slots {
            if let Some(value) = value.as_ref().filter(|v| !v.as_os_str().is_empty()) {
                *slot = workdir.join(value);
            }
        }
        paths
    }
}
