//! Packing operation reporting.

use crate::manifest::Manifest;
use std::path::PathBuf;
use std::time::Duration;

/// Report of a packing run.
///
/// # Examples
///
/// ```
/// use treepack_core::Manifest;
/// use treepack_core::PackReport;
/// use std::path::PathBuf;
/// use std::time::Duration;
///
/// let report = PackReport {
///     output: PathBuf::from("project.zip"),
///     backup: None,
///     manifest: Manifest::new(vec!["a.txt".to_string()]),
///     files_added: 1,
///     files_skipped: 0,
///     bytes_written: 1000,
///     bytes_compressed: 500,
///     duration: Duration::ZERO,
/// };
///
/// assert_eq!(report.files_listed(), 1);
/// assert_eq!(report.compression_ratio(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct PackReport {
    /// Where the archive was written.
    pub output: PathBuf,

    /// Where the previous archive was moved, if one existed.
    pub backup: Option<PathBuf>,

    /// The manifest embedded in the archive.
    pub manifest: Manifest,

    /// Number of file entries in the archive body.
    pub files_added: usize,

    /// Files left out of the body because their name collides with the
    /// manifest entry.
    pub files_skipped: usize,

    /// Total uncompressed bytes of the body entries.
    pub bytes_written: u64,

    /// Size of the archive file on disk.
    pub bytes_compressed: u64,

    /// Wall-clock time of the run. [`crate::pack_tree`] measures the whole
    /// run from validation to read-back; [`crate::creation::write_archive`]
    /// alone measures only the build and write.
    pub duration: Duration,
}

impl PackReport {
    /// Number of files listed in the manifest.
    #[must_use]
    pub fn files_listed(&self) -> usize {
        self.manifest.file_count()
    }

    /// Returns the compression ratio (uncompressed / compressed).
    ///
    /// Returns 0.0 if either size is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.bytes_compressed as f64
    }
}
