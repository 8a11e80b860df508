//! Configuration for packing operations.

use crate::PackError;
use crate::Result;
use crate::creation::filters::IgnoreSet;
use std::path::Path;
use std::path::PathBuf;

/// Default name of the output archive, placed in the root directory.
pub const DEFAULT_ARCHIVE_NAME: &str = "project.zip";

/// Name of the synthetic manifest entry inside the archive.
pub const MANIFEST_ENTRY: &str = "metadata.json";

/// Which traversals the ignore set applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IgnoreScope {
    /// Ignored paths are left out of both the manifest and the archive body.
    #[default]
    All,

    /// Ignored paths are left out of the manifest only; the archive body
    /// still contains every regular file under the root.
    ManifestOnly,
}

/// Configuration for packing a directory tree.
///
/// # Examples
///
/// ```
/// use treepack_core::IgnoreScope;
/// use treepack_core::IgnoreSet;
/// use treepack_core::PackConfig;
///
/// let config = PackConfig::new("./project")
///     .with_ignore(IgnoreSet::parse("target:.git"))
///     .with_ignore_scope(IgnoreScope::ManifestOnly)
///     .with_compression_level(9);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct PackConfig {
    /// Directory whose contents are packed.
    ///
    /// Default: `.` (the current working directory).
    pub root: PathBuf,

    /// Path segments excluded from the manifest (and the body, depending on
    /// `ignore_scope`).
    ///
    /// Default: empty.
    pub ignore: IgnoreSet,

    /// Where the ignore set applies.
    ///
    /// Default: [`IgnoreScope::All`].
    pub ignore_scope: IgnoreScope,

    /// Deflate level (1-9), or 0 to store entries uncompressed.
    ///
    /// `None` uses the zip crate's default level.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            ignore: IgnoreSet::default(),
            ignore_scope: IgnoreScope::default(),
            compression_level: Some(6),
        }
    }
}

impl PackConfig {
    /// Creates a configuration packing `root` with default settings.
    #[must_use]
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Sets the ignore set.
    #[must_use]
    pub fn with_ignore(mut self, ignore: IgnoreSet) -> Self {
        self.ignore = ignore;
        self
    }

    /// Sets where the ignore set applies.
    #[must_use]
    pub fn with_ignore_scope(mut self, scope: IgnoreScope) -> Self {
        self.ignore_scope = scope;
        self
    }

    /// Sets the compression level.
    ///
    /// Out-of-range values are reported by [`PackConfig::validate`].
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = Some(level);
        self
    }

    /// Returns the default output path, `<root>/project.zip`.
    #[must_use]
    pub fn default_output(&self) -> PathBuf {
        self.root.join(DEFAULT_ARCHIVE_NAME)
    }

    /// Returns the ignore set the archive body traversal must apply.
    #[must_use]
    pub fn body_filter(&self) -> Option<&IgnoreSet> {
        match self.ignore_scope {
            IgnoreScope::All => Some(&self.ignore),
            IgnoreScope::ManifestOnly => None,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The root does not exist or is not a directory
    /// - The compression level is above 9
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && level > 9
        {
            return Err(PackError::InvalidCompressionLevel { level });
        }

        if !self.root.exists() {
            return Err(PackError::RootNotFound {
                path: self.root.clone(),
            });
        }
        if !self.root.is_dir() {
            return Err(PackError::RootNotDirectory {
                path: self.root.clone(),
            });
        }
        Ok(())
    }
}
