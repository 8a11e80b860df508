//! The metadata manifest embedded in every archive.

use crate::Result;
use crate::creation::filters::IgnoreSet;
use crate::creation::walker::collect_files;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Generation time and file listing of a packed tree.
///
/// Serialized as `{"generated_at": "...Z", "files": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// When the manifest was generated (UTC).
    pub generated_at: DateTime<Utc>,

    /// Root-relative, `/`-separated file paths in traversal order.
    pub files: Vec<String>,
}

impl Manifest {
    /// Creates a manifest stamped with the current time.
    #[must_use]
    pub fn new(files: Vec<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            files,
        }
    }

    /// Number of files listed.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns whether `name` is listed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.files.iter().any(|f| f == name)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a manifest from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the manifest with `name` removed from the listing, keeping the
    /// original timestamp.
    #[must_use]
    pub fn without(self, name: &str) -> Self {
        Self {
            generated_at: self.generated_at,
            files: self.files.into_iter().filter(|f| f != name).collect(),
        }
    }
}

/// Walks `root` and builds a manifest of every regular file not excluded by
/// `ignore`.
///
/// # Examples
///
/// ```no_run
/// use treepack_core::IgnoreSet;
/// use treepack_core::collect_metadata;
/// use std::path::Path;
///
/// let manifest = collect_metadata(Path::new("."), &IgnoreSet::parse("target"))?;
/// println!("{} files", manifest.file_count());
/// # Ok::<(), treepack_core::PackError>(())
/// ```
///
/// # Errors
///
/// Returns an error if the root or any directory below it cannot be read.
pub fn collect_metadata(root: &Path, ignore: &IgnoreSet) -> Result<Manifest> {
    let files: Vec<String> = collect_files(root, Some(ignore))?
        .into_iter()
        .map(|entry| entry.entry_name)
        .collect();

    debug!(root = %root.display(), files = files.len(), "collected metadata");

    Ok(Manifest::new(files))
}
