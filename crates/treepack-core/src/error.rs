//! Error types for tree packing operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackError`.
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors that can occur while packing a directory tree.
#[derive(Error, Debug)]
pub enum PackError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The root directory does not exist.
    #[error("root directory not found: {path}")]
    RootNotFound {
        /// The missing root path.
        path: PathBuf,
    },

    /// The root path exists but is not a directory.
    #[error("root is not a directory: {path}")]
    RootNotDirectory {
        /// The offending root path.
        path: PathBuf,
    },

    /// Directory traversal failed below the root.
    #[error("cannot walk {path}: {message}")]
    Walk {
        /// The path being visited when traversal failed.
        path: PathBuf,
        /// Description reported by the walker.
        message: String,
    },

    /// ZIP container could not be written or read.
    #[error("invalid archive: {0}")]
    Zip(String),

    /// The archive has no manifest entry.
    #[error("manifest entry '{entry}' not found in {archive}")]
    ManifestMissing {
        /// The archive that was inspected.
        archive: PathBuf,
        /// Name of the expected manifest entry.
        entry: String,
    },

    /// The manifest read back from an archive differs from the one written.
    #[error("manifest in {archive} does not match the packed tree")]
    ManifestMismatch {
        /// The archive that was inspected.
        archive: PathBuf,
    },

    /// The manifest could not be serialized or parsed.
    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Compression level is outside 0-9.
    #[error("invalid compression level {level}, expected 0-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// The output path cannot hold an archive file.
    #[error("invalid output path: {path}")]
    InvalidOutput {
        /// The rejected output path.
        path: PathBuf,
    },
}

impl From<zip::result::ZipError> for PackError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => Self::Io(io),
            other => Self::Zip(other.to_string()),
        }
    }
}

impl From<walkdir::Error> for PackError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_default();
        match err.into_io_error() {
            Some(io) if path.as_os_str().is_empty() => Self::Io(io),
            Some(io) => Self::Walk {
                path,
                message: io.to_string(),
            },
            None => Self::Walk {
                path,
                message: "file system loop detected".to_string(),
            },
        }
    }
}

impl PackError {
    /// Returns `true` if the error came from the filesystem rather than the
    /// archive or manifest format.
    ///
    /// # Examples
    ///
    /// ```
    /// use treepack_core::PackError;
    /// use std::path::PathBuf;
    ///
    /// let err = PackError::RootNotFound {
    ///     path: PathBuf::from("/missing"),
    /// };
    /// assert!(err.is_filesystem());
    ///
    /// let err = PackError::Zip("bad central directory".to_string());
    /// assert!(!err.is_filesystem());
    /// ```
    #[must_use]
    pub const fn is_filesystem(&self) -> bool {
        matches!(
            self,
            Self::Io(_)
                | Self::RootNotFound { .. }
                | Self::RootNotDirectory { .. }
                | Self::Walk { .. }
                | Self::InvalidOutput { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PackError::RootNotFound {
            path: PathBuf::from("/no/such/dir"),
        };
        assert_eq!(err.to_string(), "root directory not found: /no/such/dir");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PackError = io_err.into();
        assert!(matches!(err, PackError::Io(_)));
        assert!(err.is_filesystem());
    }

    #[test]
    fn test_zip_error_conversion() {
        let err: PackError = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(err, PackError::Zip(_)));
        assert!(!err.is_filesystem());
    }

    #[test]
    fn test_zip_io_error_unwrapped() {
        let io_err = std::io::Error::other("disk full");
        let err: PackError = zip::result::ZipError::Io(io_err).into();
        assert!(matches!(err, PackError::Io(_)));
    }

    #[test]
    fn test_manifest_missing_display() {
        let err = PackError::ManifestMissing {
            archive: PathBuf::from("out.zip"),
            entry: "metadata.json".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("metadata.json"));
        assert!(msg.contains("out.zip"));
    }

    #[test]
    fn test_invalid_compression_level_display() {
        let err = PackError::InvalidCompressionLevel { level: 12 };
        assert!(err.to_string().contains("12"));
    }
}
