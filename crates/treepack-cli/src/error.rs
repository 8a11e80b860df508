//! Error conversion utilities for CLI.
//!
//! Converts treepack-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use treepack_core::PackError;

/// Converts `PackError` to user-friendly anyhow error with context
pub fn convert_pack_error(err: PackError, output: &Path) -> anyhow::Error {
    match err {
        PackError::RootNotFound { path } => {
            anyhow!(
                "Directory to pack does not exist: {}\n\
                 HINT: Pass an existing directory with --root.",
                path.display()
            )
        }
        PackError::RootNotDirectory { path } => {
            anyhow!(
                "Directory to pack is not a directory: {}",
                path.display()
            )
        }
        PackError::InvalidOutput { path } => {
            anyhow!(
                "Cannot write archive to '{}': path is a directory\n\
                 HINT: Give a file name such as '{}'.",
                path.display(),
                path.join(treepack_core::DEFAULT_ARCHIVE_NAME).display()
            )
        }
        PackError::Io(io_err) => {
            anyhow!(
                "I/O error while writing '{}': {}",
                output.display(),
                io_err
            )
        }
        PackError::ManifestMissing { archive, entry } => {
            anyhow!(
                "Archive '{}' has no '{}' entry after writing\n\
                 HINT: The file may have been replaced by another process.",
                archive.display(),
                entry
            )
        }
        PackError::ManifestMismatch { archive } => {
            anyhow!(
                "Manifest read back from '{}' differs from the one written\n\
                 HINT: Another run may be writing the same output path.",
                archive.display()
            )
        }
        err if err.is_filesystem() => anyhow::Error::from(err).context(format!(
            "Error packing into '{}'\n\
             HINT: Check that every file under the root is readable.",
            output.display()
        )),
        _ => anyhow::Error::from(err)
            .context(format!("Error packing into '{}'", output.display())),
    }
}

/// Adds context to a packing result
pub fn add_output_context<T>(
    result: Result<T, PackError>,
    output: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_pack_error(e, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_root_not_found() {
        let err = PackError::RootNotFound {
            path: PathBuf::from("/missing/root"),
        };
        let converted = convert_pack_error(err, Path::new("project.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("/missing/root"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such directory");
        let converted = convert_pack_error(PackError::Io(io_err), Path::new("out/a.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("out/a.zip"));
    }

    #[test]
    fn test_convert_walk_error_adds_hint() {
        let err = PackError::Walk {
            path: PathBuf::from("/srv/tree/locked"),
            message: "Permission denied".to_string(),
        };
        let converted = convert_pack_error(err, Path::new("a.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("Error packing into 'a.zip'"));
        assert!(msg.contains("HINT: Check that every file under the root is readable."));
        assert!(msg.contains("/srv/tree/locked"));
    }

    #[test]
    fn test_convert_other_error_keeps_source() {
        let err = PackError::Zip("bad central directory".to_string());
        let converted = convert_pack_error(err, Path::new("a.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("Error packing into 'a.zip'"));
        assert!(msg.contains("bad central directory"));
        assert!(!msg.contains("HINT"));
    }
}
