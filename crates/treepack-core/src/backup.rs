//! Moving a previous archive aside before it is replaced.

use crate::Result;
use std::path::Path;
use std::path::PathBuf;
use tracing::info;

/// Extension given to backup files, replacing the output's own extension.
pub const BACKUP_EXTENSION: &str = "bak.zip";

/// Returns the sibling path an existing `output` is moved to.
///
/// # Examples
///
/// ```
/// use treepack_core::backup::backup_path;
/// use std::path::Path;
///
/// assert_eq!(backup_path(Path::new("dist/project.zip")), Path::new("dist/project.bak.zip"));
/// assert_eq!(backup_path(Path::new("out")), Path::new("out.bak.zip"));
/// ```
#[must_use]
pub fn backup_path(output: &Path) -> PathBuf {
    output.with_extension(BACKUP_EXTENSION)
}

/// Renames an existing file at `output` to its backup path.
///
/// Returns the backup path, or `None` if nothing existed at `output`. A
/// previous backup at that path is overwritten.
///
/// # Errors
///
/// Returns an error if the rename fails.
pub fn backup_existing(output: &Path) -> Result<Option<PathBuf>> {
    if !output.exists() {
        return Ok(None);
    }

    let backup = backup_path(output);
    std::fs::rename(output, &backup)?;
    info!(from = %output.display(), to = %backup.display(), "previous archive backed up");
    Ok(Some(backup))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_backup_path_replaces_extension() {
        assert_eq!(
            backup_path(Path::new("project.zip")),
            Path::new("project.bak.zip")
        );
        assert_eq!(
            backup_path(Path::new("a.tar.gz")),
            Path::new("a.tar.bak.zip")
        );
        assert_eq!(backup_path(Path::new("out")), Path::new("out.bak.zip"));
    }

    #[test]
    fn test_backup_missing_output_is_noop() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("project.zip");

        assert_eq!(backup_existing(&output).unwrap(), None);
        assert!(!temp.path().join("project.bak.zip").exists());
    }

    #[test]
    fn test_backup_moves_file() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("project.zip");
        fs::write(&output, b"old archive").unwrap();

        let backup = backup_existing(&output).unwrap().unwrap();
        assert_eq!(backup, temp.path().join("project.bak.zip"));
        assert!(!output.exists());
        assert_eq!(fs::read(&backup).unwrap(), b"old archive");
    }

    #[test]
    fn test_backup_overwrites_previous_backup() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("project.zip");
        fs::write(temp.path().join("project.bak.zip"), b"oldest").unwrap();
        fs::write(&output, b"newer").unwrap();

        let backup = backup_existing(&output).unwrap().unwrap();
        assert_eq!(fs::read(&backup).unwrap(), b"newer");
    }
}
