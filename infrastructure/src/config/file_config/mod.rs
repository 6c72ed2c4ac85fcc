//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of `knobpanel.toml`.
//! They are deserialized directly and converted into application types
//! ([`ArtifactPaths`], [`FieldRanges`], [`LiteralPatcher`]) at the edge.

mod output;
mod paths;
mod patcher;
mod ranges;
mod runner;

pub use output::FileOutputConfig;
pub use paths::FilePathsConfig;
pub use patcher::FilePatcherConfig;
pub use ranges::{FileRangeConfig, to_field_ranges};
pub use runner::FileRunnerConfig;

use crate::process::ProcessScriptRunner;
use knobpanel_application::ArtifactPaths;
use knobpanel_domain::{ConfigIssue, ConfigIssueCode, FieldRanges};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Directory holding the artifacts and the generation script
    pub workdir: Option<PathBuf>,
    /// Artifact path overrides
    pub paths: FilePathsConfig,
    /// Generation script runner
    pub runner: FileRunnerConfig,
    /// Source-artifact literal patcher
    pub patcher: FilePatcherConfig,
    /// Control range overrides, keyed by field name
    pub ranges: BTreeMap<String, FileRangeConfig>,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks:
    /// 1. Range overrides (unknown fields, `min > max`)
    /// 2. Empty artifact paths
    /// 3. Empty interpreter / block marker
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = to_field_ranges(&self.ranges).1;

        for (key, path) in self.paths.entries() {
            if path.is_some_and(|p| p.as_os_str().is_empty()) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::EmptyPath {
                        key: key.to_string(),
                    },
                    format!("{}: empty path, using the default location", key),
                ));
            }
        }

        if self.runner.interpreter.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyPath {
                    key: "runner.interpreter".to_string(),
                },
                "runner.interpreter cannot be empty",
            ));
        }
        if self.patcher.block_marker.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyPath {
                    key: "patcher.block_marker".to_string(),
                },
                "patcher.block_marker cannot be empty",
            ));
        }

        issues
    }

    /// Working directory: the CLI flag wins over the file, then the current directory.
    pub fn resolve_workdir(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.workdir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn to_artifact_paths(&self, workdir: &Path) -> ArtifactPaths {
        self.paths.resolve(workdir)
    }

    /// Range overrides; invalid entries are dropped (see [`FileConfig::validate`]).
    pub fn to_field_ranges(&self) -> FieldRanges {
        to_field_ranges(&self.ranges).0
    }

    pub fn to_script_runner(&self) -> ProcessScriptRunner {
        ProcessScriptRunner::new(self.runner.interpreter.trim())
            .with_args(self.runner.args.iter().cloned())
            .with_io_encoding(self.runner.io_encoding.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knobpanel_domain::{Field, Range};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
workdir = "/srv/pm"

[paths]
source = "gpt-researcher/custom/default.py"

[runner]
interpreter = "python3"
args = ["-u", "-X", "utf8"]

[patcher]
block_marker = "BASE_CONFIG"

[ranges.TOTAL_WORDS]
min = 200
max = 8000

[output]
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.workdir, Some(PathBuf::from("/srv/pm")));
        assert_eq!(config.runner.interpreter, "python3");
        assert_eq!(config.runner.args.len(), 3);
        assert_eq!(config.runner.io_encoding, "utf-8");
        assert_eq!(config.patcher.block_marker, "BASE_CONFIG");
        assert!(!config.output.color);

        let paths = config.to_artifact_paths(Path::new("/srv/pm"));
        assert_eq!(
            paths.source,
            PathBuf::from("/srv/pm/gpt-researcher/custom/default.py")
        );
        assert_eq!(
            config.to_field_ranges().range(Field::TotalWords),
            Range { min: 200, max: 8000 }
        );
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.workdir.is_none());
        assert_eq!(config.runner.interpreter, "python");
        assert_eq!(config.runner.args, vec!["-u".to_string()]);
        assert_eq!(config.patcher.block_marker, "DEFAULT_CONFIG");
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_issues() {
        let toml_str = r#"
[paths]
task = ""

[runner]
interpreter = " "

[ranges.MAX_SECTIONS]
min = 5
max = 2
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 1);
        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::InvertedRange { field, .. } if field == "MAX_SECTIONS"
        )));
    }

    #[test]
    fn test_resolve_workdir_priority() {
        let config = FileConfig {
            workdir: Some(PathBuf::from("/from/file")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_workdir(Some(Path::new("/from/flag"))),
            PathBuf::from("/from/flag")
        );
        assert_eq!(config.resolve_workdir(None), PathBuf::from("/from/file"));
        assert_eq!(
            FileConfig::default().resolve_workdir(None),
            PathBuf::from(".")
        );
    }
}
