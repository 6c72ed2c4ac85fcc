//! One-time backup of an artifact before it is first overwritten.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Path of the backup for `path`: the full file name plus `.bak`
/// (`config.yaml` → `config.yaml.bak`).
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

/// Copy `path` to its backup if the file exists and no backup exists yet.
///
/// Never fails: a backup that cannot be taken is logged and the caller
/// proceeds with its write. Returns whether a backup was created.
pub fn backup_once(path: &Path) -> bool {
    let backup = backup_path(path);
    if !path.is_file() || backup.exists() {
        return false;
    }

    match std::fs::copy(path, &backup) {
        Ok(_) => {
            debug!("Backed up {} to {}", path.display(), backup.display());
            true
        }
        Err(e) => {
            warn!("Could not back up {}: {}", path.display(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("/tmp/pm/config.yaml")),
            PathBuf::from("/tmp/pm/config.yaml.bak")
        );
    }

    #[test]
    fn test_backup_taken_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("task.json");
        std::fs::write(&path, "first").unwrap();

        assert!(backup_once(&path));
        std::fs::write(&path, "second").unwrap();
        assert!(!backup_once(&path));

        let backup = std::fs::read_to_string(backup_path(&path)).unwrap();
        assert_eq!(backup, "first");
    }

    #[test]
    fn test_no_backup_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        assert!(!backup_once(&path));
        assert!(!backup_path(&path).exists());
    }
}
