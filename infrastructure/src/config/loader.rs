//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project-level config file names, in lookup order.
const PROJECT_FILES: [&str; 2] = ["knobpanel.toml", ".knobpanel.toml"];

/// Prefix of environment overrides (`KNOBPANEL_RUNNER__INTERPRETER=python3`).
const ENV_PREFIX: &str = "KNOBPANEL_";

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `KNOBPANEL_*` (`__` separates nested keys)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./knobpanel.toml` or `./.knobpanel.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/knobpanel/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigLoadError> {
        if let Some(path) = config_path
            && !path.is_file()
        {
            return Err(ConfigLoadError::NotFound(path.to_path_buf()));
        }

        Self::figment(
            Self::global_config_path().filter(|p| p.exists()),
            Self::project_config_path(),
            config_path,
        )
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigLoadError::Invalid(Box::new(e)))
    }

    /// File sources only, lowest priority first.
    fn figment(global: Option<PathBuf>, project: Option<PathBuf>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
        for path in [global, project, explicit.map(Path::to_path_buf)]
            .into_iter()
            .flatten()
        {
            figment = figment.merge(Toml::file(path));
        }
        figment
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/knobpanel/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("knobpanel").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = explicit {
            let mark = if path.is_file() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./knobpanel.toml or ./.knobpanel.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.workdir.is_none());
        assert!(config.ranges.is_empty());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("knobpanel"));
    }

    #[test]
    fn test_later_files_override_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("knobpanel.toml");
        std::fs::write(&global, "workdir = \"/global\"\n[runner]\ninterpreter = \"python3\"\n").unwrap();
        std::fs::write(&project, "workdir = \"/project\"\n").unwrap();

        let config: FileConfig = ConfigLoader::figment(Some(global), Some(project), None)
            .extract()
            .unwrap();
        assert_eq!(config.workdir, Some(PathBuf::from("/project")));
        assert_eq!(config.runner.interpreter, "python3");
        assert_eq!(config.runner.args, vec!["-u".to_string()]);
    }

    #[test]
    fn test_explicit_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("knobpanel.toml");
        let explicit = dir.path().join("custom.toml");
        std::fs::write(&project, "[output]\ncolor = true\n").unwrap();
        std::fs::write(&explicit, "[output]\ncolor = false\n").unwrap();

        let config: FileConfig = ConfigLoader::figment(None, Some(project), Some(&explicit))
            .extract()
            .unwrap();
        assert!(!config.output.color);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            ConfigLoader::load(Some(&missing)),
            Err(ConfigLoadError::NotFound(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[ranges.TOTAL_WORDS]\nmin = \"low\"\nmax = 5\n").unwrap();
        let result: Result<FileConfig, _> = ConfigLoader::figment(None, None, Some(&path)).extract();
        assert!(result.is_err());
    }
}
