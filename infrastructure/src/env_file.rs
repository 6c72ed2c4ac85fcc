//! `.env` installation from `.env.example`.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const ENV_FILE: &str = ".env";
pub const ENV_EXAMPLE_FILE: &str = ".env.example";

#[derive(Error, Debug)]
#[error("Failed to install {target}: {source}")]
pub struct EnvFileError {
    pub target: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// What `install_env` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvInstall {
    /// `.env` was created (or overwritten) from the example.
    Installed(PathBuf),
    /// `.env` already exists and overwriting was not requested.
    AlreadyExists(PathBuf),
    /// There is no `.env.example` to install from.
    NoExample(PathBuf),
}

/// Copy `dir/.env.example` to `dir/.env`. An existing `.env` is only
/// replaced when `force` is set.
pub fn install_env(dir: &Path, force: bool) -> Result<EnvInstall, EnvFileError> {
    let example = dir.join(ENV_EXAMPLE_FILE);
    let target = dir.join(ENV_FILE);

    if !example.is_file() {
        return Ok(EnvInstall::NoExample(example));
    }
    if target.exists() && !force {
        return Ok(EnvInstall::AlreadyExists(target));
    }

    std::fs::copy(&example, &target).map_err(|source| EnvFileError {
        target: target.clone(),
        source,
    })?;
    info!("Installed {} from {}", target.display(), example.display());
    Ok(EnvInstall::Installed(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_and_refuse_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ENV_EXAMPLE_FILE), "OPENAI_API_KEY=\n").unwrap();

        let first = install_env(dir.path(), false).unwrap();
        assert_eq!(first, EnvInstall::Installed(dir.path().join(ENV_FILE)));

        std::fs::write(dir.path().join(ENV_FILE), "OPENAI_API_KEY=secret\n").unwrap();
        let second = install_env(dir.path(), false).unwrap();
        assert!(matches!(second, EnvInstall::AlreadyExists(_)));
        assert_eq!(
            std::fs::read_to_string(dir.path().join(ENV_FILE)).unwrap(),
            "OPENAI_API_KEY=secret\n"
        );

        install_env(dir.path(), true).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join(ENV_FILE)).unwrap(),
            "OPENAI_API_KEY=\n"
        );
    }

    #[test]
    fn test_missing_example() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            install_env(dir.path(), false).unwrap(),
            EnvInstall::NoExample(_)
        ));
    }
}
