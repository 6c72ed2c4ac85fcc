//! Locations of the artifacts the panel edits and the script it launches.
//!
//! [`ArtifactPaths`] is resolved once from the working directory (plus any
//! per-path overrides) and handed to the use cases. Use cases never build
//! paths themselves.

use std::path::{Path, PathBuf};

/// Default relative locations under the working directory.
pub const DEFAULT_PRIMARY: &str = "config.yaml";
pub const DEFAULT_SECONDARY: &str = "FilePromptForge/default_config.yaml";
pub const DEFAULT_SOURCE: &str = "gpt-researcher/gpt_researcher/config/variables/default.py";
pub const DEFAULT_TASK: &str = "gpt-researcher/multi_agents/task.json";
pub const DEFAULT_PRESETS: &str = "presets.yaml";
pub const DEFAULT_SCRIPT: &str = "generate.py";
pub const DEFAULT_DOWNLOAD_SCRIPT: &str = "download_and_extract.py";
pub const DEFAULT_ENV_DIR: &str = "gpt-researcher";

/// Absolute (or workdir-relative) paths of every artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Directory the generation script runs in.
    pub workdir: PathBuf,
    /// Primary settings document (YAML).
    pub primary: PathBuf,
    /// Secondary settings document (YAML).
    pub secondary: PathBuf,
    /// Source-text artifact with the literal configuration block.
    pub source: PathBuf,
    /// JSON task descriptor.
    pub task: PathBuf,
    /// Presets document (YAML).
    pub presets: PathBuf,
    /// Generation script.
    pub script: PathBuf,
    /// Script that downloads and unpacks the pipeline components.
    pub download_script: PathBuf,
    /// Directory holding `.env` / `.env.example`.
    pub env_dir: PathBuf,
}

impl ArtifactPaths {
    /// Default layout under `workdir`.
    pub fn under(workdir: impl AsRef<Path>) -> Self {
        let workdir = workdir.as_ref();
        Self {
            workdir: workdir.to_path_buf(),
            primary: workdir.join(DEFAULT_PRIMARY),
            secondary: workdir.join(DEFAULT_SECONDARY),
            source: workdir.join(DEFAULT_SOURCE),
            task: workdir.join(DEFAULT_TASK),
            presets: workdir.join(DEFAULT_PRESETS),
            script: workdir.join(DEFAULT_SCRIPT),
            download_script: workdir.join(DEFAULT_DOWNLOAD_SCRIPT),
            env_dir: workdir.join(DEFAULT_ENV_DIR),
        }
    }

    /// Display name of the script (file name only).
    pub fn script_name(&self) -> String {
        self.script
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.script.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let paths = ArtifactPaths::under("/work/pm");
        assert_eq!(paths.primary, PathBuf::from("/work/pm/config.yaml"));
        assert_eq!(
            paths.task,
            PathBuf::from("/work/pm/gpt-researcher/multi_agents/task.json")
        );
        assert_eq!(paths.script_name(), "generate.py");
        assert_eq!(
            paths.download_script,
            PathBuf::from("/work/pm/download_and_extract.py")
        );
    }
}
